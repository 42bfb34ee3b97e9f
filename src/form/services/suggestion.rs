//! Title heuristics that produce advisory suggestions.

use crate::config::{ComposerConfig, ConfigError, KeywordConfig};
use crate::form::domain::{
    EntityKind, EventType, EventWindow, FormSnapshot, PriorityLevel, QuickPick,
    SuggestedMutation, SuggestionMessage, SuggestionRule,
};
use chrono::TimeDelta;
use regex::Regex;

/// Case-insensitive whole-word matcher for one keyword list.
///
/// A keyword also matches with a plural, past or progressive ending, so
/// `call` matches `calls` and `calling` but not `recall`.
#[derive(Debug, Clone)]
struct KeywordMatcher(Option<Regex>);

impl KeywordMatcher {
    fn compile(rule: &'static str, keywords: &[String]) -> Result<Self, ConfigError> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Ok(Self(None));
        }
        let pattern = format!(r"(?i)\b(?:{})(?:s|es|d|ed|ing)?\b", alternatives.join("|"));
        Regex::new(&pattern)
            .map(|regex| Self(Some(regex)))
            .map_err(|source| ConfigError::InvalidKeyword { rule, source })
    }

    fn matches(&self, title: &str) -> bool {
        self.0.as_ref().is_some_and(|regex| regex.is_match(title))
    }
}

#[derive(Debug, Clone)]
struct Matchers {
    meeting: KeywordMatcher,
    deadline: KeywordMatcher,
    urgency: KeywordMatcher,
    review: KeywordMatcher,
    milestone: KeywordMatcher,
    reminder: KeywordMatcher,
}

impl Matchers {
    fn compile(keywords: &KeywordConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            meeting: KeywordMatcher::compile("meeting", &keywords.meeting)?,
            deadline: KeywordMatcher::compile("deadline", &keywords.deadline)?,
            urgency: KeywordMatcher::compile("urgency", &keywords.urgency)?,
            review: KeywordMatcher::compile("review", &keywords.review)?,
            milestone: KeywordMatcher::compile("milestone", &keywords.milestone)?,
            reminder: KeywordMatcher::compile("reminder", &keywords.reminder)?,
        })
    }
}

/// Stateless analyser of draft titles.
///
/// [`SuggestionEngine::analyze`] rebuilds the whole suggestion list on every
/// call, so re-running it on an unchanged title and snapshot returns an
/// identical list.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    matchers: Matchers,
    event_duration: TimeDelta,
    next_week_days: u32,
}

impl SuggestionEngine {
    /// Compiles the configured keyword lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKeyword`] when a list cannot be compiled.
    pub fn new(config: &ComposerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            matchers: Matchers::compile(&config.keywords)?,
            event_duration: config.event_duration(),
            next_week_days: config.next_week_days,
        })
    }

    /// Returns the suggestions for `title` given the current form state.
    ///
    /// Heuristics run in a fixed order: meeting, deadline, urgency, review,
    /// event type. Each contributes at most one message.
    #[must_use]
    pub fn analyze(&self, title: &str, snapshot: &FormSnapshot) -> Vec<SuggestionMessage> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        [
            self.meeting(trimmed, snapshot),
            self.deadline(trimmed, snapshot),
            self.urgency(trimmed, snapshot),
            self.review(trimmed, snapshot),
            self.event_type(trimmed, snapshot),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn meeting(&self, title: &str, snapshot: &FormSnapshot) -> Option<SuggestionMessage> {
        if !self.matchers.meeting.matches(title) {
            return None;
        }
        let window = EventWindow::next_full_hour(snapshot.now, self.event_duration);
        match snapshot.mode {
            EntityKind::Task => Some(SuggestionMessage::proposing(
                SuggestionRule::Meeting,
                "This looks like a meeting. Create it as a calendar event instead?",
                SuggestedMutation::SwitchMode {
                    kind: EntityKind::Event,
                    window: Some(window),
                },
            )),
            EntityKind::Event if snapshot.event_window_untouched => {
                Some(SuggestionMessage::proposing(
                    SuggestionRule::Meeting,
                    "Scheduled for the next full hour.",
                    SuggestedMutation::AlignEventWindow(window),
                ))
            }
            EntityKind::Event => None,
        }
    }

    fn deadline(&self, title: &str, snapshot: &FormSnapshot) -> Option<SuggestionMessage> {
        let applies = snapshot.mode == EntityKind::Task
            && snapshot.due_date.is_none()
            && self.matchers.deadline.matches(title);
        applies.then(|| {
            let due = QuickPick::Tomorrow.resolve(snapshot.now.date(), self.next_week_days);
            SuggestionMessage::proposing(
                SuggestionRule::Deadline,
                "Sounds like there is a deadline. Add a due date?",
                SuggestedMutation::SetDueDate(due),
            )
        })
    }

    fn urgency(&self, title: &str, snapshot: &FormSnapshot) -> Option<SuggestionMessage> {
        if !self.matchers.urgency.matches(title) {
            return None;
        }
        if !snapshot.priority_untouched {
            return Some(SuggestionMessage::advisory(
                SuggestionRule::Urgency,
                "Marked as urgent. Priority left as chosen.",
            ));
        }
        Some(SuggestionMessage::proposing(
            SuggestionRule::Urgency,
            "Marked as urgent. Priority raised to high.",
            SuggestedMutation::EscalatePriority(PriorityLevel::High),
        ))
    }

    fn review(&self, title: &str, snapshot: &FormSnapshot) -> Option<SuggestionMessage> {
        let applies = snapshot.mode == EntityKind::Task && self.matchers.review.matches(title);
        applies.then(|| {
            SuggestionMessage::advisory(
                SuggestionRule::Review,
                "Review work: consider assigning a reviewer.",
            )
        })
    }

    fn event_type(&self, title: &str, snapshot: &FormSnapshot) -> Option<SuggestionMessage> {
        let current = snapshot.event_type?;
        let inferred = self.infer_event_type(title)?;
        (inferred != current).then(|| {
            SuggestionMessage::proposing(
                SuggestionRule::EventType,
                format!("Set the event type to {}?", inferred.label()),
                SuggestedMutation::SetEventType(inferred),
            )
        })
    }

    fn infer_event_type(&self, title: &str) -> Option<EventType> {
        if self.matchers.meeting.matches(title) {
            Some(EventType::Meeting)
        } else if self.matchers.deadline.matches(title) {
            Some(EventType::Deadline)
        } else if self.matchers.milestone.matches(title) {
            Some(EventType::Milestone)
        } else if self.matchers.reminder.matches(title) {
            Some(EventType::Reminder)
        } else {
            None
        }
    }
}
