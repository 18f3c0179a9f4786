//! Mastery tier classification.
//!
//! A lesson's counters are folded into one of five ordered tiers. The rules
//! form an ordered decision list (first matching rule wins) and every
//! threshold comparison is inclusive, so a learner sitting exactly on a
//! boundary lands in the higher tier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::LessonProgress;

/// Accuracy at or above which a spaced-review streak counts as overlearning.
const OVERLEARNED_ACCURACY: f64 = 0.9;
/// Consecutive successful spaced-review sessions required for overlearning.
const OVERLEARNED_STREAK: u32 = 3;
/// Accuracy at or above which a lesson can be mastered.
const MASTERED_ACCURACY: f64 = 0.8;
/// Hints-per-attempt ceiling for mastery.
const MASTERED_HINT_RATIO: f64 = 0.2;
/// Accuracy at or above which a lesson counts as progressing.
const PROGRESSING_ACCURACY: f64 = 0.5;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Error returned when parsing a tier from its wire label fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mastery tier: {0:?}")]
pub struct ParseMasteryLevelError(String);

//
// ─── MASTERY LEVEL ─────────────────────────────────────────────────────────────
//

/// Five-tier classification of lesson performance.
///
/// Tiers are ordered from no engagement to sustained mastery. The kebab-case
/// wire labels (`not-started` through `overlearned`) are part of the persisted
/// format and must not change.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MasteryLevel {
    /// No attempts recorded yet.
    #[default]
    NotStarted,
    /// Below half of attempts correct.
    Struggling,
    /// At least half of attempts correct, or high accuracy leaning on hints.
    Progressing,
    /// High accuracy without excessive hints.
    Mastered,
    /// High accuracy sustained across spaced-review sessions.
    Overlearned,
}

impl MasteryLevel {
    /// Every tier in ascending order, for legends and iteration.
    pub const ALL: [Self; 5] = [
        Self::NotStarted,
        Self::Struggling,
        Self::Progressing,
        Self::Mastered,
        Self::Overlearned,
    ];

    /// Classify a lesson's counters into a tier.
    ///
    /// Rules, first match wins:
    ///
    /// 1. no attempts → `NotStarted`
    /// 2. accuracy ≥ 0.9 and streak ≥ 3 → `Overlearned`
    /// 3. accuracy ≥ 0.8 and hint ratio ≤ 0.2 → `Mastered`
    /// 4. accuracy ≥ 0.5 → `Progressing`
    /// 5. otherwise → `Struggling`
    ///
    /// The overlearned rule runs before the hint check, so a learner at 90%+
    /// accuracy with a three-session streak is overlearned however many hints
    /// they used. Inputs are not validated; out-of-range counters produce a
    /// mathematically defined result rather than an error.
    #[must_use]
    pub fn classify(progress: &LessonProgress) -> Self {
        if progress.attempts == 0 {
            return Self::NotStarted;
        }

        let accuracy = progress.accuracy();
        let hint_ratio = progress.hint_ratio();

        if accuracy >= OVERLEARNED_ACCURACY
            && progress.spaced_practice_streak >= OVERLEARNED_STREAK
        {
            Self::Overlearned
        } else if accuracy >= MASTERED_ACCURACY && hint_ratio <= MASTERED_HINT_RATIO {
            Self::Mastered
        } else if accuracy >= PROGRESSING_ACCURACY {
            Self::Progressing
        } else {
            Self::Struggling
        }
    }

    /// The kebab-case wire label for this tier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Struggling => "struggling",
            Self::Progressing => "progressing",
            Self::Mastered => "mastered",
            Self::Overlearned => "overlearned",
        }
    }

    /// Human-readable name for indicators and legends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Struggling => "Struggling",
            Self::Progressing => "Progressing",
            Self::Mastered => "Mastered",
            Self::Overlearned => "Overlearned",
        }
    }

    /// One-line description shown alongside the label.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NotStarted => "No attempts yet",
            Self::Struggling => "Less than 50% correct",
            Self::Progressing => "50-79% correct",
            Self::Mastered => "80%+ correct",
            Self::Overlearned => "Sustained mastery",
        }
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MasteryLevel {
    type Err = ParseMasteryLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "struggling" => Ok(Self::Struggling),
            "progressing" => Ok(Self::Progressing),
            "mastered" => Ok(Self::Mastered),
            "overlearned" => Ok(Self::Overlearned),
            other => Err(ParseMasteryLevelError(other.to_string())),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
