//! Diagnostic channel adapters.

use std::sync::Mutex;
use tracing::{error, warn};

use crate::form::ports::{Diagnostic, Diagnostics};

/// Emits diagnostics as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::EntityPersistFailed {
                kind,
                editing,
                error,
            } => error!(
                kind = kind.as_str(),
                editing,
                error = %error,
                "failed to save entity"
            ),
            Diagnostic::AttachmentUploadFailed {
                owner,
                file_count,
                error,
            } => warn!(
                owner_type = owner.owner_type(),
                owner_id = owner.owner_id(),
                file_count,
                error = %error,
                "failed to upload attachments"
            ),
            Diagnostic::DeleteFailed { id, error } => {
                error!(task_id = %id, error = %error, "failed to delete task");
            }
        }
    }
}

/// Keeps diagnostics in memory for inspection.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded diagnostics in order.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Returns whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|entries| entries.is_empty()).unwrap_or(true)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}
