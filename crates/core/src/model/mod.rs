mod ids;
mod progress;

pub use ids::LessonId;
pub use progress::{LessonProgress, ProgressState, ProgressUpdate, STATE_VERSION};
