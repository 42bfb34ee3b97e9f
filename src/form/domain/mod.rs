//! Domain model for the composer form.
//!
//! Pure values only: drafts, priorities, schedule arithmetic, suggestions and
//! staged attachments. Remote calls and side effects live behind
//! [`crate::form::ports`].

mod attachment;
mod draft;
mod error;
mod ids;
pub mod keys;
mod priority;
mod records;
mod schedule;
mod session;
mod suggestion;

pub use attachment::{AttachmentFile, AttachmentOwner, PendingAttachment};
pub use draft::{
    Draft, EntityKind, EventColor, EventDraft, EventType, ModeSeed, TaskDraft, TaskStatus,
};
pub use error::FormDomainError;
pub use ids::{
    AttachmentId, ColumnId, EntityRef, EventId, KanbanId, LocalAttachmentId, TaskId, UserId,
    WorkspaceId,
};
pub use keys::{Key, KeyAction, KeyPress, Modifiers};
pub use priority::{PriorityGauge, PriorityLevel};
pub use records::{EventRecord, ExistingEntity, TaskRecord};
pub use schedule::{
    CalendarCursor, Cell, DayCell, EventWindow, MonthGrid, QuickPick, WeekStart,
    next_top_of_hour,
};
pub use session::SessionContext;
pub use suggestion::{
    FormSnapshot, MutationKind, SuggestedMutation, SuggestionMessage, SuggestionRule,
};
