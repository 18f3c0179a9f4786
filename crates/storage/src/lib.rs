#![forbid(unsafe_code)]

pub mod file;
pub mod provider;

pub use file::FileStore;
pub use provider::{MemoryStore, StateStore, StorageError};
