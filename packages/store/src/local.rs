//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform. It
//! looks the `Storage` object up on every call instead of caching it, since
//! `web_sys::Storage` is a cheap handle and the lookup keeps the store a
//! zero-size `Clone` value.
//!
//! All errors (storage disabled, quota exceeded, private browsing quirks) are
//! logged and swallowed. Reads report a missing entry.

use web_sys::Storage;

use crate::storage::{KeyValueStore, StorageError};

/// `window.localStorage`-backed store.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Backend(format!("{e:?}")))?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = match self.storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::debug!("localStorage read of {} skipped: {}", key, e);
                return None;
            }
        };
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let result = self.storage().and_then(|storage| {
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Backend(format!("{e:?}")))
        });
        if let Err(e) = result {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let result = self.storage().and_then(|storage| {
            storage
                .remove_item(key)
                .map_err(|e| StorageError::Backend(format!("{e:?}")))
        });
        if let Err(e) = result {
            tracing::warn!("Failed to remove {}: {}", key, e);
        }
    }
}
