use crate::editor::{EditorNotice, EditorSession};

/// Frame strip: one row per frame with select/remove, plus the add
/// button. Returns a notice when an edit was rejected so the app can
/// toast it.
pub fn frames_panel(ui: &mut egui::Ui, session: &mut EditorSession) -> Option<EditorNotice> {
    let mut notice = None;

    ui.heading("Frames");
    ui.separator();

    let active = session.active_frame_index();
    let rows: Vec<_> = session
        .project()
        .frames
        .iter()
        .map(|f| (f.id, f.text.clone()))
        .collect();

    for (index, (id, text)) in rows.iter().enumerate() {
        ui.horizontal(|ui| {
            let first_line = text.trim().lines().next().unwrap_or("");
            let mut label: String = first_line.chars().take(18).collect();
            if first_line.chars().count() > 18 {
                label.push('…');
            }
            let selected = index == active;
            if ui
                .selectable_label(selected, format!("{}. {label}", index + 1))
                .clicked()
            {
                if let Err(n) = session.select_frame(*id) {
                    notice = Some(n);
                }
            }
            if ui.small_button("✕").clicked() {
                if let Err(n) = session.remove_frame(*id) {
                    notice = Some(n);
                }
            }
        });
    }

    ui.separator();
    if ui.button("➕ Add frame").clicked() {
        if let Err(n) = session.add_frame() {
            notice = Some(n);
        }
    }
    ui.label(format!(
        "{} / {} frames",
        session.project().frames.len(),
        crate::model::MAX_FRAMES
    ));

    notice
}
