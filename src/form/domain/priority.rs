//! Task priority levels and the dot gauge that selects them.

use super::FormDomainError;
use serde::{Deserialize, Serialize};

/// Ordered task priority.
///
/// `Critical` is only reachable through explicit selection; heuristics cap
/// their escalation at `High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    /// Low priority.
    Low,
    /// Medium priority, the default for new tasks.
    #[default]
    Medium,
    /// High priority.
    High,
    /// Critical priority.
    Critical,
}

impl PriorityLevel {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Priority",
            Self::Medium => "Medium Priority",
            Self::High => "High Priority",
            Self::Critical => "Critical Priority",
        }
    }
}

impl TryFrom<&str> for PriorityLevel {
    type Error = FormDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(FormDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

/// Stateless mapping between gauge positions and priority levels.
///
/// The gauge renders three dots. Ordinals `1..=3` select low, medium and
/// high; ordinal `4` is the explicit critical selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityGauge;

impl PriorityGauge {
    /// Number of dots the gauge renders.
    pub const DOTS: u8 = 3;

    /// Maps a gauge ordinal to a priority level.
    ///
    /// # Errors
    ///
    /// Returns [`FormDomainError::UnknownPriorityOrdinal`] for ordinals
    /// outside `1..=4`.
    pub const fn level(ordinal: u8) -> Result<PriorityLevel, FormDomainError> {
        match ordinal {
            1 => Ok(PriorityLevel::Low),
            2 => Ok(PriorityLevel::Medium),
            3 => Ok(PriorityLevel::High),
            4 => Ok(PriorityLevel::Critical),
            other => Err(FormDomainError::UnknownPriorityOrdinal(other)),
        }
    }

    /// Maps a priority level back to its gauge ordinal.
    #[must_use]
    pub const fn ordinal(level: PriorityLevel) -> u8 {
        match level {
            PriorityLevel::Low => 1,
            PriorityLevel::Medium => 2,
            PriorityLevel::High => 3,
            PriorityLevel::Critical => 4,
        }
    }

    /// Number of dots lit for a level. Critical lights the full gauge.
    #[must_use]
    pub const fn filled_dots(level: PriorityLevel) -> u8 {
        match level {
            PriorityLevel::Low => 1,
            PriorityLevel::Medium => 2,
            PriorityLevel::High | PriorityLevel::Critical => Self::DOTS,
        }
    }

    /// Returns whether the 1-based dot is lit for the level.
    #[must_use]
    pub const fn is_lit(level: PriorityLevel, dot: u8) -> bool {
        dot >= 1 && dot <= Self::filled_dots(level)
    }

    /// Raises `current` to `target` without ever lowering it.
    #[must_use]
    pub fn escalate(current: PriorityLevel, target: PriorityLevel) -> PriorityLevel {
        current.max(target)
    }
}
