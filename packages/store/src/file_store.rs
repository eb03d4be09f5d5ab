//! # Filesystem-backed key/value store
//!
//! [`FileStore`] persists each entry as one file under a base directory. It is
//! the durable store used when the client runs outside a browser, so a session
//! survives restarts the way `localStorage` does on the web.
//!
//! ```text
//! <base_dir>/
//! ├── token     # raw bearer token
//! └── user      # JSON-encoded profile
//! ```

use std::fs;
use std::path::PathBuf;

use crate::storage::{KeyValueStore, StorageError};

/// Filesystem-backed store for native targets.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base)?;
        fs::write(self.entry_path(key), value)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.write(key, value) {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let path = self.entry_path(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("Failed to remove {}: {}", key, e);
            }
        }
    }
}
