//! The in-progress draft edited by the composer form.
//!
//! A draft is either a task card or a calendar event. Switching kind keeps
//! the title and description and reseeds everything else from mode defaults.

use super::{
    ColumnId, EventRecord, EventWindow, FormDomainError, PriorityLevel, TaskRecord, UserId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The entity kind a draft targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A kanban task card.
    #[default]
    Task,
    /// A calendar event.
    Event,
}

impl EntityKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Event => "event",
        }
    }
}

/// Board status carried by task cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    InReview,
    /// Finished.
    Done,
    /// Dropped.
    Cancelled,
}

impl TaskStatus {
    /// Derives the initial status from the board column the form was opened
    /// from. Unknown columns start as [`TaskStatus::Todo`].
    #[must_use]
    pub fn from_column(column: Option<&ColumnId>) -> Self {
        match column.map(ColumnId::as_str) {
            Some("progress") => Self::InProgress,
            Some("review") => Self::InReview,
            Some("done") => Self::Done,
            Some("cancelled") => Self::Cancelled,
            _ => Self::Todo,
        }
    }
}

/// Calendar event category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// A meeting or call.
    Meeting,
    /// A scheduled task block.
    Task,
    /// A reminder.
    Reminder,
    /// A generic event.
    #[default]
    Event,
    /// A deadline.
    Deadline,
    /// A milestone.
    Milestone,
}

impl EventType {
    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Meeting => "Meeting",
            Self::Task => "Task",
            Self::Reminder => "Reminder",
            Self::Event => "Event",
            Self::Deadline => "Deadline",
            Self::Milestone => "Milestone",
        }
    }
}

impl TryFrom<&str> for EventType {
    type Error = FormDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MEETING" => Ok(Self::Meeting),
            "TASK" => Ok(Self::Task),
            "REMINDER" => Ok(Self::Reminder),
            "EVENT" => Ok(Self::Event),
            "DEADLINE" => Ok(Self::Deadline),
            "MILESTONE" => Ok(Self::Milestone),
            _ => Err(FormDomainError::UnknownEventType(value.to_owned())),
        }
    }
}

/// Calendar event palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    /// Blue, the default.
    #[default]
    Blue,
    /// Green.
    Green,
    /// Purple.
    Purple,
    /// Orange.
    Orange,
    /// Red.
    Red,
}

impl TryFrom<&str> for EventColor {
    type Error = FormDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "purple" => Ok(Self::Purple),
            "orange" => Ok(Self::Orange),
            "red" => Ok(Self::Red),
            _ => Err(FormDomainError::UnknownEventColor(value.to_owned())),
        }
    }
}

/// Task-mode draft fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description as typed.
    pub description: String,
    /// Selected priority. Heuristic escalation writes here directly; user
    /// selections go through [`TaskDraft::choose_priority`].
    pub priority: PriorityLevel,
    /// Board status.
    pub status: TaskStatus,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Tag names.
    pub tags: Vec<String>,
    /// Target board column, if any.
    pub column_id: Option<ColumnId>,
    priority_touched: bool,
}

impl TaskDraft {
    /// Creates a task draft with mode defaults: medium priority, no due date.
    #[must_use]
    pub fn new(title: String, description: String, column_id: Option<ColumnId>) -> Self {
        Self {
            title,
            description,
            priority: PriorityLevel::default(),
            status: TaskStatus::from_column(column_id.as_ref()),
            due_date: None,
            assignee_id: None,
            tags: Vec::new(),
            column_id,
            priority_touched: false,
        }
    }

    /// Pre-populates a draft from a persisted task.
    ///
    /// Persisted priorities count as user-chosen.
    #[must_use]
    pub fn from_record(record: &TaskRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            priority: record.priority,
            status: record.status,
            due_date: record.due_date,
            assignee_id: record.assignee_id.clone(),
            tags: record.tags.clone(),
            column_id: record.column_id.clone(),
            priority_touched: true,
        }
    }

    /// Sets the priority on explicit user input.
    pub const fn choose_priority(&mut self, priority: PriorityLevel) {
        self.priority = priority;
        self.priority_touched = true;
    }

    /// Returns whether the priority was never chosen by the user.
    #[must_use]
    pub const fn is_priority_untouched(&self) -> bool {
        !self.priority_touched
    }
}

/// Event-mode draft fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Title as typed.
    pub title: String,
    /// Description as typed.
    pub description: String,
    /// Location, if any.
    pub location: Option<String>,
    /// Event category.
    pub event_type: EventType,
    /// Display colour.
    pub color: EventColor,
    window: EventWindow,
    window_touched: bool,
}

impl EventDraft {
    /// Creates an event draft whose window is still the seeded default.
    #[must_use]
    pub fn new(title: String, description: String, window: EventWindow) -> Self {
        Self {
            title,
            description,
            location: None,
            event_type: EventType::default(),
            color: EventColor::default(),
            window,
            window_touched: false,
        }
    }

    /// Pre-populates a draft from a persisted event.
    ///
    /// Persisted windows count as user-chosen.
    #[must_use]
    pub fn from_record(record: &EventRecord) -> Self {
        let window = EventWindow::new(record.start, record.end, record.all_day)
            .unwrap_or_else(|_| EventWindow::starting_at(record.start, chrono::TimeDelta::zero()));
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            location: record.location.clone(),
            event_type: record.event_type,
            color: record.color,
            window,
            window_touched: true,
        }
    }

    /// Returns the event window.
    #[must_use]
    pub const fn window(&self) -> EventWindow {
        self.window
    }

    /// Returns whether the window is still the seeded default.
    #[must_use]
    pub const fn is_window_untouched(&self) -> bool {
        !self.window_touched
    }

    /// Replaces the window on explicit user input.
    pub const fn set_window(&mut self, window: EventWindow) {
        self.window = window;
        self.window_touched = true;
    }

    /// Replaces the window only while it is still the seeded default.
    ///
    /// Returns whether the window changed.
    pub fn align_window(&mut self, window: EventWindow) -> bool {
        if self.window_touched || self.window == window {
            return false;
        }
        self.window = window;
        true
    }
}

/// Defaults used to seed kind-specific fields when the mode changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSeed {
    /// Column a new task lands in.
    pub column_id: Option<ColumnId>,
    /// Default window for a new event.
    pub event_window: EventWindow,
}

/// The form draft: exactly one entity kind at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    /// Task-mode draft.
    Task(TaskDraft),
    /// Event-mode draft.
    Event(EventDraft),
}

impl Draft {
    /// Returns the active kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Task(_) => EntityKind::Task,
            Self::Event(_) => EntityKind::Event,
        }
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Task(task) => &task.title,
            Self::Event(event) => &event.title,
        }
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Task(task) => &task.description,
            Self::Event(event) => &event.description,
        }
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: String) {
        match self {
            Self::Task(task) => task.title = title,
            Self::Event(event) => event.title = title,
        }
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: String) {
        match self {
            Self::Task(task) => task.description = description,
            Self::Event(event) => event.description = description,
        }
    }

    /// Returns the task fields in task mode.
    #[must_use]
    pub const fn as_task(&self) -> Option<&TaskDraft> {
        match self {
            Self::Task(task) => Some(task),
            Self::Event(_) => None,
        }
    }

    /// Returns the event fields in event mode.
    #[must_use]
    pub const fn as_event(&self) -> Option<&EventDraft> {
        match self {
            Self::Task(_) => None,
            Self::Event(event) => Some(event),
        }
    }

    pub(crate) const fn as_task_mut(&mut self) -> Option<&mut TaskDraft> {
        match self {
            Self::Task(task) => Some(task),
            Self::Event(_) => None,
        }
    }

    pub(crate) const fn as_event_mut(&mut self) -> Option<&mut EventDraft> {
        match self {
            Self::Task(_) => None,
            Self::Event(event) => Some(event),
        }
    }

    /// Converts the draft to `kind`, keeping the shared fields and seeding
    /// kind-specific fields from `seed`. Converting to the active kind is a
    /// no-op.
    #[must_use]
    pub fn switch_to(self, kind: EntityKind, seed: &ModeSeed) -> Self {
        if self.kind() == kind {
            return self;
        }
        let (title, description) = match self {
            Self::Task(task) => (task.title, task.description),
            Self::Event(event) => (event.title, event.description),
        };
        match kind {
            EntityKind::Task => {
                Self::Task(TaskDraft::new(title, description, seed.column_id.clone()))
            }
            EntityKind::Event => {
                Self::Event(EventDraft::new(title, description, seed.event_window))
            }
        }
    }
}
