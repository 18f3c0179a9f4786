use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mastery::MasteryLevel;
use crate::model::ids::LessonId;

/// Schema version written into every persisted `ProgressState`.
pub const STATE_VERSION: &str = "1.0.0";

//
// ─── LESSON PROGRESS ───────────────────────────────────────────────────────────
//

/// Performance counters for one lesson, plus the derived mastery tier.
///
/// A record springs into existence on first read or first update; until then
/// the lesson is simply absent from the state. Counters are caller-supplied
/// absolute values, not increments, and are not bounds-checked: the contract
/// is deliberately permissive, and `correct_attempts <= attempts` is assumed
/// rather than enforced.
///
/// `mastery` and `last_attempt` are owned by the progress service; callers
/// never set them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonProgress {
    pub lesson_id: LessonId,
    pub attempts: u32,
    pub correct_attempts: u32,
    pub last_attempt: Option<DateTime<Utc>>,
    pub mastery: MasteryLevel,
    pub hints_used: u32,
    pub spaced_practice_streak: u32,
}

impl LessonProgress {
    /// The all-zero, not-started record for a lesson.
    #[must_use]
    pub fn new(lesson_id: LessonId) -> Self {
        Self {
            lesson_id,
            attempts: 0,
            correct_attempts: 0,
            last_attempt: None,
            mastery: MasteryLevel::NotStarted,
            hints_used: 0,
            spaced_practice_streak: 0,
        }
    }

    /// Fraction of attempts answered correctly. Zero when nothing was attempted.
    ///
    /// Exceeds 1.0 if a caller supplied `correct_attempts > attempts`; the
    /// value is reported as-is.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.correct_attempts) / f64::from(self.attempts)
        }
    }

    /// Hints consumed per attempt. Zero when nothing was attempted.
    #[must_use]
    pub fn hint_ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.hints_used) / f64::from(self.attempts)
        }
    }

    /// Merge a partial update over this record.
    ///
    /// Only the counters named in `update` change. The lesson id is
    /// untouchable, and the mastery tier and attempt timestamp are left for
    /// the service to recompute and stamp.
    pub fn apply(&mut self, update: &ProgressUpdate) {
        if let Some(attempts) = update.attempts {
            self.attempts = attempts;
        }
        if let Some(correct_attempts) = update.correct_attempts {
            self.correct_attempts = correct_attempts;
        }
        if let Some(hints_used) = update.hints_used {
            self.hints_used = hints_used;
        }
        if let Some(streak) = update.spaced_practice_streak {
            self.spaced_practice_streak = streak;
        }
    }
}

impl Default for LessonProgress {
    fn default() -> Self {
        Self::new(LessonId::default())
    }
}

//
// ─── PROGRESS UPDATE ───────────────────────────────────────────────────────────
//

/// Partial update to a lesson's counters.
///
/// `None` fields leave the current value untouched. There is intentionally no
/// way to supply the lesson id, the mastery tier, or the attempt timestamp:
/// the first is immutable, the other two are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub attempts: Option<u32>,
    pub correct_attempts: Option<u32>,
    pub hints_used: Option<u32>,
    pub spaced_practice_streak: Option<u32>,
}

impl ProgressUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

//
// ─── PROGRESS STATE ────────────────────────────────────────────────────────────
//

/// The entire persisted unit: every tracked lesson plus a schema version tag.
///
/// Read and written atomically as one serialized blob; there is no
/// per-lesson storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub lessons: HashMap<LessonId, LessonProgress>,
    pub version: String,
}

impl ProgressState {
    /// A state with no tracked lessons, tagged with the current version.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lessons: HashMap::new(),
            version: STATE_VERSION.to_string(),
        }
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
