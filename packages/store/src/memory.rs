use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::storage::KeyValueStore;

/// In-memory store for tests and environments without durable storage.
///
/// Clones share the same underlying map, which lets a test hold on to a handle
/// and inspect what the session layer persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserProfile};
    use crate::session::{Session, TOKEN_KEY, USER_KEY};

    fn admin() -> UserProfile {
        UserProfile {
            id: 1,
            username: "root".to_string(),
            email: None,
            role: Role::Admin,
            is_active: Some(true),
        }
    }

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("token").is_none());

        store.set("token", "abc");
        assert_eq!(store.get("token").as_deref(), Some("abc"));

        store.set("token", "def");
        assert_eq!(store.get("token").as_deref(), Some("def"));
        assert_eq!(store.len(), 1);

        store.remove("token");
        assert!(store.get("token").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("user", "{}");
        assert_eq!(handle.get("user").as_deref(), Some("{}"));
    }

    #[test]
    fn test_session_persist_and_load() {
        let store = MemoryStore::new();

        // Nothing stored yet
        assert_eq!(Session::load(&store), Session::default());

        let session = Session::new("T".to_string(), admin());
        session.persist(&store);
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("T"));
        assert!(store.get(USER_KEY).is_some());

        let loaded = Session::load(&store);
        assert!(loaded.is_authenticated());
        assert_eq!(loaded.token(), Some("T"));
        assert_eq!(loaded.user().map(|u| u.username.as_str()), Some("root"));
    }

    #[test]
    fn test_session_erase() {
        let store = MemoryStore::new();
        Session::new("T".to_string(), admin()).persist(&store);

        Session::erase(&store);
        assert!(store.is_empty());

        // Erasing twice is harmless
        Session::erase(&store);
        assert!(!Session::load(&store).is_authenticated());
    }

    #[test]
    fn test_half_persisted_session_is_anonymous() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "orphan");
        assert_eq!(Session::load(&store), Session::default());

        let store = MemoryStore::new();
        store.set(USER_KEY, r#"{"id": 3, "role": "driver"}"#);
        assert_eq!(Session::load(&store), Session::default());
    }

    #[test]
    fn test_corrupt_profile_is_anonymous() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "T");
        store.set(USER_KEY, "not json");
        assert!(!Session::load(&store).is_authenticated());
    }
}
