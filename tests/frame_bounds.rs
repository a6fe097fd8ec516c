use carousel_studio::editor::{EditorNotice, EditorSession};
use carousel_studio::model::{Project, MAX_FRAMES, MIN_FRAMES};

fn in_bounds(session: &EditorSession) -> bool {
    (MIN_FRAMES..=MAX_FRAMES).contains(&session.project().frames.len())
}

#[test]
fn add_frame_caps_at_ten_with_notice() {
    // Scenario A: a default project has one frame; nine more succeed,
    // the eleventh is rejected.
    let mut session = EditorSession::new(Project::new("caps"));
    assert_eq!(session.project().frames.len(), 1);

    for _ in 0..9 {
        session.add_frame().unwrap();
    }
    assert_eq!(session.project().frames.len(), MAX_FRAMES);

    assert_eq!(session.add_frame(), Err(EditorNotice::FrameLimitReached));
    assert_eq!(session.project().frames.len(), MAX_FRAMES);
}

#[test]
fn remove_frame_protects_the_last_one() {
    // Scenario D
    let mut session = EditorSession::new(Project::new("last"));
    let only = session.project().frames[0].id;

    assert_eq!(
        session.remove_frame(only),
        Err(EditorNotice::LastFrameProtected)
    );
    assert_eq!(session.project().frames.len(), 1);
    assert_eq!(session.project().frames[0].id, only);
}

#[test]
fn bounds_hold_through_mixed_sequences() {
    // P1: arbitrary interleavings of add/remove keep 1..=10.
    let mut session = EditorSession::new(Project::new("mixed"));

    for step in 0u32..200 {
        if step % 3 == 0 {
            let id = session.project().frames[0].id;
            let _ = session.remove_frame(id);
        } else {
            let _ = session.add_frame();
        }
        assert!(in_bounds(&session), "step {step} broke the frame bound");
        assert!(session.active_frame_index() < session.project().frames.len());
    }
}

#[test]
fn new_frame_becomes_active() {
    let mut session = EditorSession::new(Project::new("active"));
    let id = session.add_frame().unwrap();
    assert_eq!(session.active_frame_id(), id);
    assert_eq!(session.active_frame_index(), 1);
}

#[test]
fn removing_unknown_frame_is_a_soft_failure() {
    let mut session = EditorSession::new(Project::new("unknown"));
    session.add_frame().unwrap();
    let before = session.project().clone();

    assert_eq!(
        session.remove_frame(uuid::Uuid::new_v4()),
        Err(EditorNotice::FrameNotFound)
    );
    assert_eq!(session.project(), &before);
}
