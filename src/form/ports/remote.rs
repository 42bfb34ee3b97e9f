//! Remote data client ports.
//!
//! Each remote operation the form issues is a named method on one of these
//! traits. Transport, caching and retry belong to the adapter.

use crate::form::domain::{
    AttachmentFile, AttachmentId, AttachmentOwner, ColumnId, EventColor, EventId, EventRecord,
    EventType, KanbanId, PriorityLevel, TaskId, TaskRecord, TaskStatus, UserId, WorkspaceId,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Body of `task.create` and `task.update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Priority.
    pub priority: PriorityLevel,
    /// Board status.
    pub status: TaskStatus,
    /// Due date; `None` is sent as null.
    pub due_date: Option<NaiveDate>,
    /// Assignee; `None` is sent as null.
    pub assignee_id: Option<UserId>,
    /// Tag names.
    pub tags: Vec<String>,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Target column; omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<ColumnId>,
}

/// Body of `calendar.create` and `calendar.update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Start time.
    pub start: NaiveDateTime,
    /// End time.
    pub end: NaiveDateTime,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// Location; omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Event category.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Display colour.
    pub color: EventColor,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
}

/// Body of `attachments.upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Files to upload.
    pub files: Vec<AttachmentFile>,
    /// Entity the files attach to.
    pub owner: AttachmentOwner,
}

/// One uploaded file as acknowledged by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAttachment {
    /// Remote identifier.
    pub id: AttachmentId,
    /// File name.
    pub name: String,
}

/// A workspace member offered as an assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceMember {
    /// Member identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl WorkspaceMember {
    /// Returns up to two upper-case initials, falling back to the email.
    #[must_use]
    pub fn initials(&self) -> String {
        let source = if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        };
        source.chars().take(2).flat_map(char::to_uppercase).collect()
    }
}

/// A kanban column offered as a task destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    /// Column identifier.
    pub id: ColumnId,
    /// Column title.
    pub title: String,
}

/// A kanban board with its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Board identifier.
    pub id: KanbanId,
    /// Columns in display order.
    pub columns: Vec<BoardColumn>,
}

/// `task.*` operations.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `task.create(payload)`.
    async fn create(&self, payload: &TaskPayload) -> RemoteResult<TaskRecord>;

    /// `task.update(id, payload)`.
    async fn update(&self, id: &TaskId, payload: &TaskPayload) -> RemoteResult<TaskRecord>;

    /// `task.delete(id)`.
    async fn delete(&self, id: &TaskId) -> RemoteResult<()>;
}

/// `calendar.*` operations.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// `calendar.create(payload)`.
    async fn create(&self, payload: &EventPayload) -> RemoteResult<EventRecord>;

    /// `calendar.update(id, payload)`.
    async fn update(&self, id: &EventId, payload: &EventPayload) -> RemoteResult<EventRecord>;
}

/// `attachments.*` operations.
#[async_trait]
pub trait AttachmentApi: Send + Sync {
    /// `attachments.upload(files, ownerType, ownerId)`.
    async fn upload(&self, request: &UploadRequest) -> RemoteResult<Vec<UploadedAttachment>>;
}

/// Read-only lookups that populate the form's choices.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `workspace.listUsers(workspaceId)`.
    async fn list_users(&self, workspace_id: &WorkspaceId) -> RemoteResult<Vec<WorkspaceMember>>;

    /// `kanban.get(kanbanId)`.
    async fn get_board(&self, kanban_id: &KanbanId) -> RemoteResult<Board>;
}

/// The remote data client, as one handle per named interface.
#[derive(Clone)]
pub struct RemoteApis {
    /// Task operations.
    pub tasks: Arc<dyn TaskApi>,
    /// Calendar operations.
    pub calendar: Arc<dyn CalendarApi>,
    /// Attachment operations.
    pub attachments: Arc<dyn AttachmentApi>,
    /// Directory lookups.
    pub directory: Arc<dyn DirectoryApi>,
}

impl RemoteApis {
    /// Uses a single client for every interface.
    #[must_use]
    pub fn shared<R>(remote: Arc<R>) -> Self
    where
        R: TaskApi + CalendarApi + AttachmentApi + DirectoryApi + 'static,
    {
        Self {
            tasks: remote.clone(),
            calendar: remote.clone(),
            attachments: remote.clone(),
            directory: remote,
        }
    }
}

/// Errors returned by remote data client adapters.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The remote API rejected the operation.
    #[error("{operation} rejected: {reason}")]
    Rejected {
        /// Operation name, e.g. `task.create`.
        operation: &'static str,
        /// Reason given by the API.
        reason: String,
    },

    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The request did not complete.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
