//! Diagnostic channel port.
//!
//! Persistence and upload failures are recorded here. Adapters decide where
//! the records go.

use crate::form::domain::{AttachmentOwner, EntityKind, TaskId};
use std::fmt;

/// A failure worth recording for operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A create or update call rejected; the submission stopped.
    EntityPersistFailed {
        /// Kind of the draft being saved.
        kind: EntityKind,
        /// Whether the call was an update.
        editing: bool,
        /// Rendered remote error.
        error: String,
    },
    /// Staged files failed to upload after the entity was saved.
    AttachmentUploadFailed {
        /// Entity the files were meant for.
        owner: AttachmentOwner,
        /// Number of files in the failed upload.
        file_count: usize,
        /// Rendered remote error.
        error: String,
    },
    /// A confirmed delete call rejected.
    DeleteFailed {
        /// Task that was not deleted.
        id: TaskId,
        /// Rendered remote error.
        error: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntityPersistFailed {
                kind,
                editing,
                error,
            } => {
                let verb = if *editing { "update" } else { "create" };
                write!(f, "failed to {verb} {}: {error}", kind.as_str())
            }
            Self::AttachmentUploadFailed {
                owner,
                file_count,
                error,
            } => write!(
                f,
                "failed to upload {file_count} file(s) to {} {}: {error}",
                owner.owner_type(),
                owner.owner_id()
            ),
            Self::DeleteFailed { id, error } => write!(f, "failed to delete task {id}: {error}"),
        }
    }
}

/// Sink for [`Diagnostic`] records.
pub trait Diagnostics: Send + Sync {
    /// Records a diagnostic.
    fn record(&self, diagnostic: Diagnostic);
}
