//! Project serialization and the storage boundary.
//!
//! The serialized blob is plain JSON mirroring the model structs; it is
//! the sole durable representation, so it must round-trip losslessly.
//! The remote side of storage is only a trait here; the core never
//! prescribes transport or schema beyond owner-scoped string keys with
//! last-write-wins overwrite.

use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;

use crate::model::{Project, MAX_FRAMES, MIN_FRAMES};
use crate::util::time;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize project: {0}")]
    Serialize(serde_json::Error),

    #[error("could not load project: {0}")]
    Deserialize(serde_json::Error),

    #[error("could not load project: frame count {0} out of range")]
    FrameCountOutOfRange(usize),

    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type for persistence operations
pub type StoreResult<T> = Result<T, StoreError>;

pub fn serialize_project(project: &Project) -> StoreResult<String> {
    serde_json::to_string(project).map_err(StoreError::Serialize)
}

/// Parses a stored blob back into a project, re-validating the frame
/// bound so a corrupt blob cannot smuggle an invariant violation into
/// an editing session.
pub fn deserialize_project(blob: &str) -> StoreResult<Project> {
    let project: Project = serde_json::from_str(blob).map_err(StoreError::Deserialize)?;
    let count = project.frames.len();
    if !(MIN_FRAMES..=MAX_FRAMES).contains(&count) {
        return Err(StoreError::FrameCountOutOfRange(count));
    }
    Ok(project)
}

/// The storage boundary the core consumes. Blobs are opaque to the
/// store; keys are owner-scoped; save overwrites (last write wins).
pub trait ProjectStore {
    fn save(&self, owner: &str, key: &str, blob: &str) -> StoreResult<()>;

    /// `Ok(None)` when no project is stored under the key.
    fn load(&self, owner: &str, key: &str) -> StoreResult<Option<String>>;
}

/// Stamps `updated_at` on a copy, serializes and saves, returning the
/// stamp on success. The caller applies the stamp to its in-memory
/// project only after the store accepted the blob, so a failed save
/// leaves the session exactly as it was.
pub fn save_project<S: ProjectStore>(
    store: &S,
    owner: &str,
    project: &Project,
) -> StoreResult<u64> {
    let stamp = time::timestamp_secs();
    let mut copy = project.clone();
    copy.updated_at = stamp;
    let blob = serialize_project(&copy)?;
    store.save(owner, &copy.name, &blob)?;
    log::info!("saved project {:?} for owner {owner:?}", project.name);
    Ok(stamp)
}

pub fn load_project<S: ProjectStore>(
    store: &S,
    owner: &str,
    key: &str,
) -> StoreResult<Option<Project>> {
    match store.load(owner, key)? {
        Some(blob) => deserialize_project(&blob).map(Some),
        None => Ok(None),
    }
}

/// Directory-backed store: one `<root>/<owner>/<key>.json` file per
/// project.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, owner: &str, key: &str) -> PathBuf {
        self.root
            .join(sanitize(owner))
            .join(format!("{}.json", sanitize(key)))
    }
}

/// Keeps owner/key strings usable as file names.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

impl ProjectStore for LocalStore {
    fn save(&self, owner: &str, key: &str, blob: &str) -> StoreResult<()> {
        let path = self.path_for(owner, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, blob)?;
        Ok(())
    }

    fn load(&self, owner: &str, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(owner, key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

enum SaveSlot {
    Idle,
    InFlight { queued: Option<String> },
}

/// Serializes save traffic for one project: at most one save in flight,
/// and a save requested while one is running replaces whatever is
/// queued, so a slow earlier save can never finish after (and clobber)
/// a newer one.
pub struct SaveCoordinator {
    slot: Mutex<SaveSlot>,
}

impl SaveCoordinator {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(SaveSlot::Idle),
        }
    }

    /// Requests a save of `blob`. Returns the blob to transmit now, or
    /// `None` if a save is already in flight and this one was queued.
    pub fn begin(&self, blob: String) -> Option<String> {
        let mut slot = self.slot.lock();
        match &mut *slot {
            SaveSlot::Idle => {
                *slot = SaveSlot::InFlight { queued: None };
                Some(blob)
            }
            SaveSlot::InFlight { queued } => {
                // Coalesce: only the newest pending blob matters.
                *queued = Some(blob);
                None
            }
        }
    }

    /// Marks the in-flight save complete (success or failure). Returns
    /// the coalesced follow-up blob, if any; the caller must transmit
    /// it and call `finish` again when done.
    pub fn finish(&self) -> Option<String> {
        let mut slot = self.slot.lock();
        match std::mem::replace(&mut *slot, SaveSlot::Idle) {
            SaveSlot::Idle => None,
            SaveSlot::InFlight { queued: None } => None,
            SaveSlot::InFlight {
                queued: Some(blob),
            } => {
                *slot = SaveSlot::InFlight { queued: None };
                Some(blob)
            }
        }
    }
}

impl Default for SaveCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinator_allows_single_save() {
        let coordinator = SaveCoordinator::new();
        assert_eq!(coordinator.begin("a".into()), Some("a".into()));
        assert_eq!(coordinator.finish(), None);
        // Back to idle, next save goes straight through.
        assert_eq!(coordinator.begin("b".into()), Some("b".into()));
    }

    #[test]
    fn coordinator_coalesces_overlapping_saves() {
        let coordinator = SaveCoordinator::new();
        assert_eq!(coordinator.begin("v1".into()), Some("v1".into()));
        // Two more saves while v1 is in flight: only the newest survives.
        assert_eq!(coordinator.begin("v2".into()), None);
        assert_eq!(coordinator.begin("v3".into()), None);

        // Finishing v1 releases v3 (v2 was superseded) as in-flight.
        assert_eq!(coordinator.finish(), Some("v3".into()));
        assert_eq!(coordinator.finish(), None);
    }

    #[test]
    fn local_store_round_trips_and_misses_cleanly() {
        let root = std::env::temp_dir().join(format!("carousel_store_{}", uuid::Uuid::new_v4()));
        let store = LocalStore::new(&root);

        assert!(store.load("u1", "deck").unwrap().is_none());
        store.save("u1", "deck", "{\"x\":1}").unwrap();
        assert_eq!(store.load("u1", "deck").unwrap().as_deref(), Some("{\"x\":1}"));

        // Last write wins.
        store.save("u1", "deck", "{\"x\":2}").unwrap();
        assert_eq!(store.load("u1", "deck").unwrap().as_deref(), Some("{\"x\":2}"));

        // Other owners don't see it.
        assert!(store.load("u2", "deck").unwrap().is_none());

        let _ = std::fs::remove_dir_all(root);
    }
}
