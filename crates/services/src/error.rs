//! Shared error types for the services crate.

use thiserror::Error;

/// Why an import payload was rejected.
///
/// Import is all-or-nothing: every variant means the stored state was left
/// untouched. Storage-layer failures are never reported here; they are
/// absorbed by the service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("import payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("import payload has no `lessons` mapping")]
    MissingLessons,

    #[error("a record under `lessons` is not lesson progress: {0}")]
    MalformedLesson(serde_json::Error),
}
