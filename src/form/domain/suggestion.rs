//! Advisory suggestions derived from the draft title.
//!
//! Suggestions are plain data. Whether a suggestion may be applied without a
//! user gesture is decided by [`MutationKind::auto_applies`], so the policy
//! lives in one table rather than inside individual heuristics.

use super::{EntityKind, EventType, EventWindow, PriorityLevel};
use chrono::{NaiveDate, NaiveDateTime};

/// Heuristic that produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionRule {
    /// Meeting, call or interview wording.
    Meeting,
    /// Deadline or submission wording.
    Deadline,
    /// Urgency wording.
    Urgency,
    /// Review or feedback wording.
    Review,
    /// Event category inference in event mode.
    EventType,
}

/// A change a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestedMutation {
    /// Switch the draft kind, optionally with the event window to use.
    SwitchMode {
        /// Target kind.
        kind: EntityKind,
        /// Window to apply once the switch happens.
        window: Option<EventWindow>,
    },
    /// Replace a still-default event window.
    AlignEventWindow(EventWindow),
    /// Set the task due date.
    SetDueDate(NaiveDate),
    /// Raise the task priority to at least this level.
    EscalatePriority(PriorityLevel),
    /// Set the event category.
    SetEventType(EventType),
}

/// Discriminant of [`SuggestedMutation`] used by the auto-apply policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// See [`SuggestedMutation::SwitchMode`].
    SwitchMode,
    /// See [`SuggestedMutation::AlignEventWindow`].
    AlignEventWindow,
    /// See [`SuggestedMutation::SetDueDate`].
    SetDueDate,
    /// See [`SuggestedMutation::EscalatePriority`].
    EscalatePriority,
    /// See [`SuggestedMutation::SetEventType`].
    SetEventType,
}

impl MutationKind {
    /// The auto-apply policy table.
    ///
    /// Mode changes are user-only. Window alignment only ever replaces a
    /// default the user has not touched, and priority escalation never lowers
    /// the level, so both may self-apply.
    #[must_use]
    pub const fn auto_applies(self) -> bool {
        match self {
            Self::SwitchMode | Self::SetDueDate | Self::SetEventType => false,
            Self::AlignEventWindow | Self::EscalatePriority => true,
        }
    }
}

impl SuggestedMutation {
    /// Returns the mutation discriminant.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::SwitchMode { .. } => MutationKind::SwitchMode,
            Self::AlignEventWindow(_) => MutationKind::AlignEventWindow,
            Self::SetDueDate(_) => MutationKind::SetDueDate,
            Self::EscalatePriority(_) => MutationKind::EscalatePriority,
            Self::SetEventType(_) => MutationKind::SetEventType,
        }
    }
}

/// An immutable advisory message with an optional proposed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionMessage {
    rule: SuggestionRule,
    text: String,
    mutation: Option<SuggestedMutation>,
}

impl SuggestionMessage {
    /// Creates a message without a proposed change.
    #[must_use]
    pub fn advisory(rule: SuggestionRule, text: impl Into<String>) -> Self {
        Self {
            rule,
            text: text.into(),
            mutation: None,
        }
    }

    /// Creates a message proposing `mutation`.
    #[must_use]
    pub fn proposing(
        rule: SuggestionRule,
        text: impl Into<String>,
        mutation: SuggestedMutation,
    ) -> Self {
        Self {
            rule,
            text: text.into(),
            mutation: Some(mutation),
        }
    }

    /// Returns the originating heuristic.
    #[must_use]
    pub const fn rule(&self) -> SuggestionRule {
        self.rule
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the proposed change, if any.
    #[must_use]
    pub const fn mutation(&self) -> Option<&SuggestedMutation> {
        self.mutation.as_ref()
    }

    /// Returns whether the host applies this suggestion without user action.
    #[must_use]
    pub fn auto_apply(&self) -> bool {
        self.mutation
            .as_ref()
            .is_some_and(|mutation| mutation.kind().auto_applies())
    }
}

/// The slice of form state the suggestion heuristics read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Active draft kind.
    pub mode: EntityKind,
    /// Task due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Whether the event window is still the seeded default.
    pub event_window_untouched: bool,
    /// Whether the task priority was never chosen by the user. False in
    /// event mode.
    pub priority_untouched: bool,
    /// Event category in event mode.
    pub event_type: Option<EventType>,
    /// Evaluation instant.
    pub now: NaiveDateTime,
}
