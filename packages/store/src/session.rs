//! # Persisted authentication session
//!
//! A [`Session`] is the pair of bearer token and user profile. Both halves are
//! present or both are absent: [`Session::new`] is the only way to build an
//! authenticated value, and [`Session::load`] treats a half-written pair in
//! storage as anonymous.
//!
//! ## Storage layout
//!
//! | Key | Value |
//! |-----|-------|
//! | [`TOKEN_KEY`] (`"token"`) | raw bearer token |
//! | [`USER_KEY`] (`"user"`) | JSON-encoded [`UserProfile`] |

use crate::models::UserProfile;
use crate::storage::KeyValueStore;

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON-encoded user profile.
pub const USER_KEY: &str = "user";

/// Current authentication token and profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    credentials: Option<(String, UserProfile)>,
}

impl Session {
    pub fn new(token: String, user: UserProfile) -> Self {
        Self {
            credentials: Some((token, user)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|(token, _)| token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.credentials.as_ref().map(|(_, user)| user)
    }

    /// Replace the cached profile, keeping the token. No-op when anonymous.
    pub fn refresh_user(&mut self, user: UserProfile) {
        if let Some((_, current)) = self.credentials.as_mut() {
            *current = user;
        }
    }

    /// Read the session persisted by a previous page load.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let (Some(token), Some(raw_user)) = (store.get(TOKEN_KEY), store.get(USER_KEY)) else {
            return Self::default();
        };
        match serde_json::from_str::<UserProfile>(&raw_user) {
            Ok(user) => Self::new(token, user),
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored profile: {}", e);
                Self::default()
            }
        }
    }

    /// Write both halves to storage. Anonymous sessions are erased instead.
    pub fn persist<S: KeyValueStore>(&self, store: &S) {
        let Some((token, user)) = &self.credentials else {
            Self::erase(store);
            return;
        };
        store.set(TOKEN_KEY, token);
        Self::persist_user(user, store);
    }

    /// Write only the profile entry (used after re-validation).
    pub fn persist_user<S: KeyValueStore>(user: &UserProfile, store: &S) {
        match serde_json::to_string(user) {
            Ok(raw) => store.set(USER_KEY, &raw),
            Err(e) => tracing::warn!("Failed to encode profile for storage: {}", e),
        }
    }

    /// Remove both entries from storage.
    pub fn erase<S: KeyValueStore>(store: &S) {
        store.remove(TOKEN_KEY);
        store.remove(USER_KEY);
    }
}
