//! Sequencing of the remote calls behind submit and delete.

use crate::form::{
    domain::{
        AttachmentOwner, Draft, EntityKind, EntityRef, EventDraft, EventId, SessionContext,
        TaskDraft, TaskId, WorkspaceId,
    },
    ports::{Diagnostic, Diagnostics, EventPayload, RemoteApis, RemoteError, TaskPayload},
    services::AttachmentStager,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// What the coordinator is currently waiting on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmitPhase {
    /// No call in flight.
    #[default]
    Idle,
    /// The entity create or update call is in flight.
    Saving,
    /// Staged files are uploading.
    Uploading,
}

impl SubmitPhase {
    /// Returns whether a submission is in flight.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Whether a submission creates a new entity or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    /// Create a new entity of the draft's kind.
    Create,
    /// Update the referenced entity.
    ///
    /// A reference of a different kind than the draft is ignored and a new
    /// entity is created.
    Update(EntityRef),
}

impl SubmitMode {
    const fn task_target(&self) -> Option<&TaskId> {
        match self {
            Self::Update(EntityRef::Task(id)) => Some(id),
            Self::Create | Self::Update(EntityRef::Event(_)) => None,
        }
    }

    const fn event_target(&self) -> Option<&EventId> {
        match self {
            Self::Update(EntityRef::Event(id)) => Some(id),
            Self::Create | Self::Update(EntityRef::Task(_)) => None,
        }
    }
}

/// Terminal result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The saved entity.
    pub entity: EntityRef,
    /// Whether the entity was newly created.
    pub created: bool,
    /// Number of staged files uploaded; zero when the upload failed.
    pub uploaded: usize,
}

/// A delete the user has explicitly confirmed.
///
/// Only the form issues these, after its confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDeletion {
    id: TaskId,
}

impl ConfirmedDeletion {
    pub(crate) const fn new(id: TaskId) -> Self {
        Self { id }
    }

    /// Returns the task to delete.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.id
    }
}

/// Errors returned by [`PersistenceCoordinator`].
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    /// The session carries no workspace to save into.
    #[error("no workspace selected")]
    MissingWorkspace,

    /// The entity create or update call rejected.
    #[error("failed to save {}: {source}", .kind.as_str())]
    Persist {
        /// Kind of the draft.
        kind: EntityKind,
        /// Remote failure.
        source: RemoteError,
    },

    /// The delete call rejected.
    #[error("failed to delete task: {0}")]
    Delete(RemoteError),
}

/// Result type for coordinator operations.
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Resets the published phase when a submission ends, however it ends.
struct PhaseGuard<'a>(&'a watch::Sender<SubmitPhase>);

impl<'a> PhaseGuard<'a> {
    fn enter(sender: &'a watch::Sender<SubmitPhase>, phase: SubmitPhase) -> Self {
        sender.send_replace(phase);
        Self(sender)
    }

    fn advance(&self, phase: SubmitPhase) {
        self.0.send_replace(phase);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(SubmitPhase::Idle);
    }
}

/// Issues create, update, upload and delete calls in order.
///
/// Entity failures abort the submission. Upload failures are recorded to the
/// diagnostic channel and never undo the saved entity.
#[derive(Clone)]
pub struct PersistenceCoordinator {
    session: SessionContext,
    remote: RemoteApis,
    diagnostics: Arc<dyn Diagnostics>,
    phase: Arc<watch::Sender<SubmitPhase>>,
}

impl PersistenceCoordinator {
    /// Creates a coordinator for `session`.
    #[must_use]
    pub fn new(
        session: SessionContext,
        remote: RemoteApis,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let (phase, _) = watch::channel(SubmitPhase::Idle);
        Self {
            session,
            remote,
            diagnostics,
            phase: Arc::new(phase),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        *self.phase.borrow()
    }

    /// Subscribes to phase changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmitPhase> {
        self.phase.subscribe()
    }

    /// Saves `draft` and then uploads any staged files to the saved task.
    ///
    /// Calls are awaited one after another. Event drafts never upload.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Persist`] when the entity call rejects and
    /// [`SubmissionError::MissingWorkspace`] when the session has no
    /// workspace. Upload failures are not errors.
    pub async fn submit(
        &self,
        draft: &Draft,
        stager: &mut AttachmentStager,
        mode: &SubmitMode,
    ) -> SubmissionResult<SubmitOutcome> {
        let workspace_id = self.workspace_id()?;
        let guard = PhaseGuard::enter(&self.phase, SubmitPhase::Saving);

        let editing = match draft {
            Draft::Task(_) => mode.task_target().is_some(),
            Draft::Event(_) => mode.event_target().is_some(),
        };
        let saved = match draft {
            Draft::Task(task) => self
                .save_task(task, mode.task_target(), workspace_id)
                .await
                .map(EntityRef::Task),
            Draft::Event(event) => self
                .save_event(event, mode.event_target(), workspace_id)
                .await
                .map(EntityRef::Event),
        };
        let entity = saved.map_err(|source| {
            self.diagnostics.record(Diagnostic::EntityPersistFailed {
                kind: draft.kind(),
                editing,
                error: source.to_string(),
            });
            SubmissionError::Persist {
                kind: draft.kind(),
                source,
            }
        })?;
        let created = !editing;
        debug!(%entity, created, "entity saved");

        let uploaded = match &entity {
            EntityRef::Task(id) if !stager.is_empty() => {
                guard.advance(SubmitPhase::Uploading);
                self.upload(stager, id).await
            }
            EntityRef::Task(_) | EntityRef::Event(_) => 0,
        };

        Ok(SubmitOutcome {
            entity,
            created,
            uploaded,
        })
    }

    /// Deletes a confirmed task.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Delete`] when the call rejects.
    pub async fn delete_task(&self, deletion: ConfirmedDeletion) -> SubmissionResult<()> {
        let ConfirmedDeletion { id } = deletion;
        match self.remote.tasks.delete(&id).await {
            Ok(()) => {
                debug!(task_id = %id, "task deleted");
                Ok(())
            }
            Err(err) => {
                self.diagnostics.record(Diagnostic::DeleteFailed {
                    id,
                    error: err.to_string(),
                });
                Err(SubmissionError::Delete(err))
            }
        }
    }

    fn workspace_id(&self) -> SubmissionResult<&WorkspaceId> {
        let workspace_id = self.session.workspace_id();
        if workspace_id.as_str().trim().is_empty() {
            return Err(SubmissionError::MissingWorkspace);
        }
        Ok(workspace_id)
    }

    async fn save_task(
        &self,
        task: &TaskDraft,
        target: Option<&TaskId>,
        workspace_id: &WorkspaceId,
    ) -> Result<TaskId, RemoteError> {
        let payload = task_payload(task, workspace_id);
        match target {
            Some(id) => {
                self.remote.tasks.update(id, &payload).await?;
                Ok(id.clone())
            }
            None => Ok(self.remote.tasks.create(&payload).await?.id),
        }
    }

    async fn save_event(
        &self,
        event: &EventDraft,
        target: Option<&EventId>,
        workspace_id: &WorkspaceId,
    ) -> Result<EventId, RemoteError> {
        let payload = event_payload(event, workspace_id);
        match target {
            Some(id) => {
                self.remote.calendar.update(id, &payload).await?;
                Ok(id.clone())
            }
            None => Ok(self.remote.calendar.create(&payload).await?.id),
        }
    }

    async fn upload(&self, stager: &mut AttachmentStager, id: &TaskId) -> usize {
        let owner = AttachmentOwner::Task(id.clone());
        let file_count = stager.pending().len();
        match stager.flush(owner.clone()).await {
            Ok(count) => {
                debug!(task_id = %id, count, "attachments uploaded");
                count
            }
            Err(err) => {
                self.diagnostics.record(Diagnostic::AttachmentUploadFailed {
                    owner,
                    file_count,
                    error: err.to_string(),
                });
                0
            }
        }
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_owned()
}

fn task_payload(task: &TaskDraft, workspace_id: &WorkspaceId) -> TaskPayload {
    TaskPayload {
        title: trimmed(&task.title),
        description: trimmed(&task.description),
        priority: task.priority,
        status: task.status,
        due_date: task.due_date,
        assignee_id: task.assignee_id.clone(),
        tags: task.tags.clone(),
        workspace_id: workspace_id.clone(),
        column_id: task.column_id.clone(),
    }
}

fn event_payload(event: &EventDraft, workspace_id: &WorkspaceId) -> EventPayload {
    let window = event.window();
    EventPayload {
        title: trimmed(&event.title),
        description: trimmed(&event.description),
        start: window.start(),
        end: window.end(),
        all_day: window.is_all_day(),
        location: event
            .location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .map(str::to_owned),
        event_type: event.event_type,
        color: event.color,
        workspace_id: workspace_id.clone(),
    }
}
