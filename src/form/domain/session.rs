//! Session context injected into the composer.

use super::WorkspaceId;

/// What the form needs from the signed-in session: the current workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    workspace_id: WorkspaceId,
}

impl SessionContext {
    /// Creates a context for the given workspace.
    #[must_use]
    pub const fn new(workspace_id: WorkspaceId) -> Self {
        Self { workspace_id }
    }

    /// Returns the current workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }
}
