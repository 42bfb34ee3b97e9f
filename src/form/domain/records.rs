//! Persisted entity records as returned by the remote API.

use super::{
    ColumnId, EntityRef, EventColor, EventId, EventType, PriorityLevel, TaskId, TaskStatus,
    UserId, WorkspaceId,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A persisted task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority.
    pub priority: PriorityLevel,
    /// Board status.
    pub status: TaskStatus,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Tag names.
    pub tags: Vec<String>,
    /// Board column, if any.
    pub column_id: Option<ColumnId>,
}

/// A persisted calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Event identifier.
    pub id: EventId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Start time.
    pub start: NaiveDateTime,
    /// End time.
    pub end: NaiveDateTime,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// Location, if any.
    pub location: Option<String>,
    /// Event category.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Display colour.
    pub color: EventColor,
}

/// An existing entity the form was opened to edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistingEntity {
    /// Editing a task card.
    Task(TaskRecord),
    /// Editing a calendar event.
    Event(EventRecord),
}

impl ExistingEntity {
    /// Returns the reference of the edited entity.
    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            Self::Task(record) => EntityRef::Task(record.id.clone()),
            Self::Event(record) => EntityRef::Event(record.id.clone()),
        }
    }
}
