use std::sync::Mutex;
use thiserror::Error;

/// Errors surfaced by storage providers.
///
/// The progress service absorbs these and falls back to defaults; they exist
/// so a provider can be exercised and diagnosed on its own.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One durable slot for a serialized state blob.
///
/// A provider addresses exactly one namespaced key; callers never learn where
/// or how the value is kept. The value is opaque text; encoding is the
/// caller's concern.
pub trait StateStore: Send + Sync {
    /// Read the stored value, or `None` if nothing has ever been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium exists but cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn save(&self, value: &str) -> Result<(), StorageError>;

    /// Delete the stored value. Clearing an absent value is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium refuses the deletion.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory stand-in used in tests and wherever no durable medium exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let slot = self
            .slot
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        *slot = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        *slot = None;
        Ok(())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        store.save("{\"lessons\":{}}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{\"lessons\":{}}"));
    }

    #[test]
    fn save_overwrites() {
        let store = MemoryStore::new();
        store.save("a").unwrap();
        store.save("b").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemoryStore::new();
        store.clear().unwrap();
        store.save("a").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
