//! Error types for composer domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing composer domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormDomainError {
    /// The gauge only has ordinals `1..=4`.
    #[error("unknown priority ordinal {0}, expected 1 to 4")]
    UnknownPriorityOrdinal(u8),

    /// The priority text is not one of the known levels.
    #[error("unknown priority level: {0}")]
    UnknownPriority(String),

    /// The event type text is not one of the known types.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The event colour text is not one of the palette colours.
    #[error("unknown event colour: {0}")]
    UnknownEventColor(String),

    /// A timed event ends before it starts.
    #[error("event ends at {end} before it starts at {start}")]
    EndBeforeStart {
        /// Requested start.
        start: chrono::NaiveDateTime,
        /// Requested end.
        end: chrono::NaiveDateTime,
    },
}
