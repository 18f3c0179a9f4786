#![forbid(unsafe_code)]

pub mod error;
pub mod progress_service;

pub use mathsteps_core::Clock;

pub use error::ImportError;
pub use progress_service::{PROGRESS_STORAGE_KEY, ProgressService};
