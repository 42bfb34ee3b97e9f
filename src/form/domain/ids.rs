//! Identifier types for the composer domain.
//!
//! Remote identifiers are opaque strings issued by the remote API. The only
//! identifier minted client-side is [`LocalAttachmentId`], which tags a staged
//! file until it is uploaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! remote_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier issued by the remote API.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

remote_id!(
    /// Workspace the form creates entities in.
    WorkspaceId
);
remote_id!(
    /// Persisted task card identifier.
    TaskId
);
remote_id!(
    /// Persisted calendar event identifier.
    EventId
);
remote_id!(
    /// Workspace member identifier, used for assignees.
    UserId
);
remote_id!(
    /// Kanban board identifier.
    KanbanId
);
remote_id!(
    /// Kanban column identifier.
    ColumnId
);
remote_id!(
    /// Identifier of an uploaded attachment.
    AttachmentId
);

/// Client-side identifier for a file staged before its owner exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalAttachmentId(Uuid);

impl LocalAttachmentId {
    /// Creates a new random local identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocalAttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalAttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a persisted entity of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// A task card.
    Task(TaskId),
    /// A calendar event.
    Event(EventId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task:{id}"),
            Self::Event(id) => write!(f, "event:{id}"),
        }
    }
}
