//! The in-session mutation layer.
//!
//! [`EditorSession`] owns the one project being edited and is the only
//! place frames are added, removed or modified. Every mutation either
//! fully applies or is rejected with an [`EditorNotice`]; the project is
//! never observable in a state that violates the 1..=10 frame bound or
//! an out-of-range active selection.

use std::fmt;

use uuid::Uuid;

use crate::model::{
    Frame, FrameElement, FramePatch, Project, ProjectPatch, MAX_FRAMES, MIN_FRAMES,
};

/// Soft, user-facing rejection of an edit. Shown as a toast, never a
/// crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorNotice {
    /// `add_frame` at the 10-frame cap
    FrameLimitReached,
    /// `remove_frame` on the only remaining frame
    LastFrameProtected,
    /// Operation referenced a frame id not in the project
    FrameNotFound,
    /// Operation referenced an element id not on the frame
    ElementNotFound,
}

impl fmt::Display for EditorNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorNotice::FrameLimitReached => {
                write!(f, "A carousel can hold at most {MAX_FRAMES} frames")
            }
            EditorNotice::LastFrameProtected => {
                write!(f, "A carousel needs at least one frame")
            }
            EditorNotice::FrameNotFound => write!(f, "That frame no longer exists"),
            EditorNotice::ElementNotFound => write!(f, "That element no longer exists"),
        }
    }
}

/// Owns the single in-memory project for an editing session.
pub struct EditorSession {
    project: Project,
    active_frame: usize,
    /// Bumped on every successful mutation; preview caches key off it.
    revision: u64,
}

impl EditorSession {
    pub fn new(project: Project) -> Self {
        debug_assert!((MIN_FRAMES..=MAX_FRAMES).contains(&project.frames.len()));
        Self {
            project,
            active_frame: 0,
            revision: 0,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Consumes the session, handing the project back (used when
    /// replacing the session after a load).
    pub fn into_project(self) -> Project {
        self.project
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn active_frame_index(&self) -> usize {
        self.active_frame
    }

    pub fn active_frame(&self) -> &Frame {
        // active_frame is kept in range by every mutation
        &self.project.frames[self.active_frame]
    }

    pub fn active_frame_id(&self) -> Uuid {
        self.active_frame().id
    }

    /// Appends a frame seeded with default typography and no style
    /// overrides, so it picks up the project globals. The new frame
    /// becomes active.
    pub fn add_frame(&mut self) -> Result<Uuid, EditorNotice> {
        if self.project.frames.len() >= MAX_FRAMES {
            log::warn!("add_frame rejected: project already has {MAX_FRAMES} frames");
            return Err(EditorNotice::FrameLimitReached);
        }
        let frame = Frame::new();
        let id = frame.id;
        self.project.frames.push(frame);
        self.active_frame = self.project.frames.len() - 1;
        self.revision += 1;
        Ok(id)
    }

    /// Removes the identified frame. If the active frame was removed,
    /// selection falls back to the first remaining frame; otherwise it
    /// keeps pointing at the same frame.
    pub fn remove_frame(&mut self, id: Uuid) -> Result<(), EditorNotice> {
        if self.project.frames.len() <= MIN_FRAMES {
            log::warn!("remove_frame rejected: cannot remove the last frame");
            return Err(EditorNotice::LastFrameProtected);
        }
        let index = self
            .project
            .frame_index(id)
            .ok_or(EditorNotice::FrameNotFound)?;
        self.project.frames.remove(index);
        if index == self.active_frame {
            self.active_frame = 0;
        } else if index < self.active_frame {
            self.active_frame -= 1;
        }
        self.revision += 1;
        Ok(())
    }

    pub fn select_frame(&mut self, id: Uuid) -> Result<(), EditorNotice> {
        let index = self
            .project
            .frame_index(id)
            .ok_or(EditorNotice::FrameNotFound)?;
        self.active_frame = index;
        self.revision += 1;
        Ok(())
    }

    /// Merges the patch into the identified frame; unset patch fields
    /// are untouched. Does not stamp `updated_at`; that happens at
    /// persistence time.
    pub fn update_frame(&mut self, id: Uuid, patch: FramePatch) -> Result<(), EditorNotice> {
        let frame = self
            .project
            .frame_mut(id)
            .ok_or(EditorNotice::FrameNotFound)?;
        patch.apply(frame);
        self.revision += 1;
        Ok(())
    }

    /// Records the `updated_at` stamp of a completed save. Kept apart
    /// from the mutation ops: a save is not an edit and does not bump
    /// the revision.
    pub fn mark_saved(&mut self, stamp: u64) {
        self.project.updated_at = stamp;
    }

    /// Merges the patch into the project-wide settings. Frames holding
    /// their own override for a changed global are visually unaffected.
    pub fn update_project(&mut self, patch: ProjectPatch) {
        patch.apply(&mut self.project);
        self.revision += 1;
    }

    pub fn add_element(&mut self, frame_id: Uuid, element: FrameElement) -> Result<(), EditorNotice> {
        let frame = self
            .project
            .frame_mut(frame_id)
            .ok_or(EditorNotice::FrameNotFound)?;
        frame.elements.push(element);
        self.revision += 1;
        Ok(())
    }

    pub fn remove_element(&mut self, frame_id: Uuid, element_id: Uuid) -> Result<(), EditorNotice> {
        let frame = self
            .project
            .frame_mut(frame_id)
            .ok_or(EditorNotice::FrameNotFound)?;
        let index = frame
            .elements
            .iter()
            .position(|e| e.id() == element_id)
            .ok_or(EditorNotice::ElementNotFound)?;
        frame.elements.remove(index);
        self.revision += 1;
        Ok(())
    }

    /// Moves/resizes an element in place.
    pub fn update_element_bounds(
        &mut self,
        frame_id: Uuid,
        element_id: Uuid,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), EditorNotice> {
        let frame = self
            .project
            .frame_mut(frame_id)
            .ok_or(EditorNotice::FrameNotFound)?;
        let element = frame
            .elements
            .iter_mut()
            .find(|e| e.id() == element_id)
            .ok_or(EditorNotice::ElementNotFound)?;
        element.set_bounds(x, y, width, height);
        self.revision += 1;
        Ok(())
    }
}
