//! # Durable key/value storage
//!
//! The session layer persists exactly two string entries (the raw token and the
//! JSON-encoded user profile). [`KeyValueStore`] is the narrow seam it writes
//! through, so the same session code runs against browser `localStorage`
//! ([`crate::LocalStorageStore`]), a directory of files ([`crate::FileStore`])
//! or memory ([`crate::MemoryStore`]).
//!
//! Implementations never fail loudly: a read error is reported as a missing
//! entry and a write error is logged and dropped. A broken store degrades to
//! "not logged in" rather than taking the UI down.

use thiserror::Error;

/// Synchronous string-keyed storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Errors raised inside storage backends before they are logged and swallowed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available in this environment")]
    Unavailable,
    #[error("storage backend rejected the operation: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
