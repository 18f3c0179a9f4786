use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::provider::{StateStore, StorageError};

/// File-backed provider: one blob file per namespaced key.
///
/// The key (`app:concern:v1`) maps to a file name with the colons replaced,
/// e.g. `app-concern-v1.json`. Nothing touches the filesystem until the first
/// load or save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Provider for `key` under `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        let file = format!("{}.json", key.replace(':', "-"));
        Self {
            path: dir.as_ref().join(file),
        }
    }

    /// Provider for `key` under the platform data directory, or `None` when
    /// the platform exposes no such directory.
    #[must_use]
    pub fn in_data_dir(app: &str, key: &str) -> Option<Self> {
        dirs::data_dir().map(|base| Self::new(base.join(app), key))
    }

    /// Full path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename: a write that dies midway must not take the
        // previous blob with it.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
