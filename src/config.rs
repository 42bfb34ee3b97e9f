//! Composer configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.
//!
//! # Examples
//!
//! ```
//! use composer::config::ComposerConfig;
//!
//! let config = ComposerConfig::from_json(r#"{ "event_duration_minutes": 30 }"#)
//!     .expect("valid configuration");
//! assert_eq!(config.event_duration_minutes, 30);
//! assert_eq!(config.calendar_day_start_hour, 9);
//! ```

use crate::form::domain::WeekStart;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document is malformed.
    #[error("invalid composer configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// An hour is outside `0..24`.
    #[error("hour {0} is outside 0..24")]
    InvalidHour(u32),

    /// The calendar day window ends before it starts.
    #[error("calendar day window {start}:00-{end}:00 ends before it starts")]
    InvertedDayWindow {
        /// Configured start hour.
        start: u32,
        /// Configured end hour.
        end: u32,
    },

    /// A keyword list could not be compiled into a matcher.
    #[error("invalid keywords for {rule}: {source}")]
    InvalidKeyword {
        /// Keyword list name.
        rule: &'static str,
        /// Underlying matcher error.
        source: regex::Error,
    },
}

/// Keyword lists driving the title heuristics. Matching is case-insensitive
/// on whole words, allowing `s`, `es`, `d`, `ed` and `ing` endings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Words that suggest a calendar event.
    pub meeting: Vec<String>,
    /// Words that suggest a due date.
    pub deadline: Vec<String>,
    /// Words that escalate priority.
    pub urgency: Vec<String>,
    /// Words that mark review work.
    pub review: Vec<String>,
    /// Words that infer the milestone event type.
    pub milestone: Vec<String>,
    /// Words that infer the reminder event type.
    pub reminder: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|word| (*word).to_owned()).collect()
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            meeting: words(&[
                "meeting",
                "meet",
                "call",
                "interview",
                "standup",
                "sync",
                "appointment",
            ]),
            deadline: words(&["deadline", "due", "submit", "deliver"]),
            urgency: words(&["urgent", "asap", "critical"]),
            review: words(&["review", "feedback", "approve"]),
            milestone: words(&["milestone"]),
            reminder: words(&["reminder", "remind"]),
        }
    }
}

/// Tunables for the composer form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Length of new and suggested events.
    pub event_duration_minutes: u32,
    /// Start hour for events opened from a calendar cell.
    pub calendar_day_start_hour: u32,
    /// End hour for events opened from a calendar cell.
    pub calendar_day_end_hour: u32,
    /// First column of the month grid.
    pub week_start: WeekStart,
    /// Days ahead for the "Next Week" quick pick.
    pub next_week_days: u32,
    /// Heuristic keyword lists.
    pub keywords: KeywordConfig,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            event_duration_minutes: 60,
            calendar_day_start_hour: 9,
            calendar_day_end_hour: 10,
            week_start: WeekStart::Sunday,
            next_week_days: 7,
            keywords: KeywordConfig::default(),
        }
    }
}

impl ComposerConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or a value is
    /// out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHour`] or
    /// [`ConfigError::InvertedDayWindow`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let start = self.calendar_day_start_hour;
        let end = self.calendar_day_end_hour;
        if start >= 24 {
            return Err(ConfigError::InvalidHour(start));
        }
        if end >= 24 {
            return Err(ConfigError::InvalidHour(end));
        }
        if end < start {
            return Err(ConfigError::InvertedDayWindow { start, end });
        }
        Ok(())
    }

    /// Returns the event length as a duration.
    #[must_use]
    pub fn event_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.event_duration_minutes))
    }
}
