use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use mathsteps_core::mastery::MasteryLevel;
use mathsteps_core::model::{
    LessonId, LessonProgress, ProgressState, ProgressUpdate, STATE_VERSION,
};
use mathsteps_core::time::Clock;
use storage::{FileStore, MemoryStore, StateStore};

use crate::error::ImportError;

/// Namespaced storage key for the progress blob.
pub const PROGRESS_STORAGE_KEY: &str = "mathsteps:progress:v1";

/// Directory name for the app under the platform data dir.
const APP_DIR_NAME: &str = "mathsteps";

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Owns the persisted [`ProgressState`] blob and recomputes mastery tiers.
///
/// Progress tracking is best-effort: when the storage medium is missing,
/// full, or holds something unreadable, reads fall back to an empty state and
/// writes are dropped after a warning. Callers always get a well-formed
/// answer; nothing here returns a storage error.
///
/// Every mutation rereads, rewrites, and repersists the whole blob, so each
/// call is atomic from the caller's perspective.
pub struct ProgressService {
    store: Arc<dyn StateStore>,
    clock: Clock,
}

impl ProgressService {
    /// Service over an injected storage provider.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            clock: Clock::default(),
        }
    }

    /// Service over a fresh in-memory store. Nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Service over the platform-default medium: a blob file under the
    /// platform data directory when one exists, an in-memory stand-in
    /// otherwise.
    #[must_use]
    pub fn open_default() -> Self {
        match FileStore::in_data_dir(APP_DIR_NAME, PROGRESS_STORAGE_KEY) {
            Some(file) => Self::new(Arc::new(file)),
            None => Self::in_memory(),
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Current time according to the service's clock.
    #[must_use]
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    //
    // ─── OPERATIONS ────────────────────────────────────────────────────────────
    //

    /// The stored record for a lesson, or the all-zero default if absent.
    ///
    /// Never writes anything back, so reading an unknown lesson leaves
    /// storage byte-for-byte unchanged.
    #[must_use]
    pub fn get(&self, lesson_id: &LessonId) -> LessonProgress {
        self.load_state()
            .lessons
            .get(lesson_id)
            .cloned()
            .unwrap_or_else(|| LessonProgress::new(lesson_id.clone()))
    }

    /// Merge `update` over the lesson's current record, stamp the attempt
    /// time, recompute the mastery tier, persist the whole state, and return
    /// the updated record.
    ///
    /// The timestamp is stamped unconditionally; an empty update still
    /// counts as an attempt-shaped touch. A failed persist is swallowed; the
    /// returned record is correct either way.
    pub fn update(&self, lesson_id: &LessonId, update: ProgressUpdate) -> LessonProgress {
        let mut state = self.load_state();
        let mut record = state
            .lessons
            .get(lesson_id)
            .cloned()
            .unwrap_or_else(|| LessonProgress::new(lesson_id.clone()));

        record.apply(&update);
        record.last_attempt = Some(self.clock.now());
        record.mastery = MasteryLevel::classify(&record);

        state.lessons.insert(lesson_id.clone(), record.clone());
        self.save_state(&state);

        record
    }

    /// The full state: every tracked lesson plus the version tag.
    #[must_use]
    pub fn all(&self) -> ProgressState {
        self.load_state()
    }

    /// Pretty-printed JSON of the full state, suitable for copy-paste or
    /// saving to a file.
    ///
    /// # Panics
    ///
    /// Panics if `ProgressState` stops serializing to JSON, which its shape
    /// rules out.
    #[must_use]
    pub fn export(&self) -> String {
        serde_json::to_string_pretty(&self.load_state())
            .expect("progress state serializes to JSON")
    }

    /// Replace the entire stored state with the payload's lessons.
    ///
    /// The payload must be JSON with a mapping under `lessons`; the stored
    /// version tag is reset to the current version, whatever the payload
    /// says. All-or-nothing: on any `ImportError` the stored state is left
    /// untouched. Storage-layer failures are not import failures; the
    /// replacement is persisted best-effort like any other write.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] if the payload is not valid JSON, has no
    /// mapping-typed `lessons` field, or holds a record that does not
    /// deserialize as lesson progress.
    pub fn import(&self, payload: &str) -> Result<(), ImportError> {
        let value: Value = serde_json::from_str(payload)?;
        let lessons = match value.get("lessons") {
            Some(lessons) if lessons.is_object() => lessons.clone(),
            _ => {
                debug!("import payload rejected: no lessons mapping");
                return Err(ImportError::MissingLessons);
            }
        };

        let lessons: HashMap<LessonId, LessonProgress> =
            serde_json::from_value(lessons).map_err(ImportError::MalformedLesson)?;

        self.save_state(&ProgressState {
            lessons,
            version: STATE_VERSION.to_string(),
        });
        Ok(())
    }

    /// Drop the persisted blob entirely. Every lesson reads as the default
    /// afterwards.
    pub fn clear(&self) {
        if let Err(err) = self.store.clear() {
            warn!(%err, "failed to clear stored progress");
        }
    }

    //
    // ─── PERSISTENCE ───────────────────────────────────────────────────────────
    //

    /// Load the blob, tolerating every failure mode by starting empty.
    ///
    /// The version tag of a loaded state is overwritten with the running
    /// version; there is no migration logic yet.
    fn load_state(&self) -> ProgressState {
        let raw = match self.store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressState::empty(),
            Err(err) => {
                debug!(%err, "progress storage unreadable, starting empty");
                return ProgressState::empty();
            }
        };

        match serde_json::from_str::<ProgressState>(&raw) {
            Ok(mut state) => {
                state.version = STATE_VERSION.to_string();
                state
            }
            Err(err) => {
                debug!(%err, "stored progress is corrupt, starting empty");
                ProgressState::empty()
            }
        }
    }

    /// Persist the blob, swallowing write failures after a warning.
    fn save_state(&self, state: &ProgressState) {
        match serde_json::to_string(state) {
            Ok(raw) => {
                if let Err(err) = self.store.save(&raw) {
                    warn!(%err, "failed to persist progress state");
                }
            }
            Err(err) => warn!(%err, "failed to serialize progress state"),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
