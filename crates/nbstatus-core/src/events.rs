use serde::{Deserialize, Serialize};

use crate::checkpoint::Checkpoint;

/// Document lifecycle events delivered by the event bus.
///
/// Each variant describes _what happened_ to the document. JSON form is
/// `{"event": "<name>", "data": <payload>}`; payload-free events omit `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum DocumentEvent {
    /// The document finished loading.
    NotebookLoaded,
    /// The document was saved.
    NotebookSaved,
    /// A rename completed.
    NotebookRenamed,
    /// An autosave attempt failed.
    SaveFailed,
    /// Checkpoints were listed, most recent first.
    CheckpointsListed(Vec<Checkpoint>),
    /// A new checkpoint was created.
    CheckpointCreated(Checkpoint),
    /// The unsaved-changes flag changed.
    DirtyChanged { value: bool },
}

impl DocumentEvent {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentEvent::NotebookLoaded => "notebook_loaded",
            DocumentEvent::NotebookSaved => "notebook_saved",
            DocumentEvent::NotebookRenamed => "notebook_renamed",
            DocumentEvent::SaveFailed => "save_failed",
            DocumentEvent::CheckpointsListed(_) => "checkpoints_listed",
            DocumentEvent::CheckpointCreated(_) => "checkpoint_created",
            DocumentEvent::DirtyChanged { .. } => "dirty_changed",
        }
    }
}
