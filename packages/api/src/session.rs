//! # Authentication session store
//!
//! [`SessionStore`] owns the in-memory [`Session`] and mirrors it to durable
//! storage. It is the only component that mutates the token/profile pair:
//!
//! | Operation | Network | Effect |
//! |-----------|---------|--------|
//! | [`login`](SessionStore::login) | `POST /auth/login` | on success, holds and persists token + profile |
//! | [`logout`](SessionStore::logout) | — | clears memory and storage, fires logout hooks |
//! | [`check_token_validity`](SessionStore::check_token_validity) | `GET /auth/me` | refreshes the profile, or logs out |
//!
//! Role predicates ([`has_role`](SessionStore::has_role) and friends) read the
//! cached profile and answer `false` when nobody is logged in.
//!
//! The store is single-threaded (`Rc` + `RefCell`), matching the browser event
//! loop it runs on. No borrow is held across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::{json, Value};
use store::{KeyValueStore, Role, Session, UserProfile};

use crate::transport::{HttpRequest, Method, Transport};

const NETWORK_ERROR: &str = "Network error occurred";
const LOGIN_FAILED: &str = "Login failed";

/// Result of a login attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    Success(UserProfile),
    /// Server-supplied message, or a generic one.
    Failure(String),
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }
}

#[derive(Deserialize)]
struct LoginData {
    token: String,
    user: UserProfile,
}

type LogoutHook = Rc<dyn Fn()>;

struct Inner<T, S> {
    transport: T,
    storage: S,
    base_path: String,
    state: RefCell<Session>,
    logout_hooks: RefCell<Vec<LogoutHook>>,
}

/// Shared handle onto the current session.
pub struct SessionStore<T, S> {
    inner: Rc<Inner<T, S>>,
}

impl<T, S> Clone for SessionStore<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, S> PartialEq for SessionStore<T, S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Transport, S: KeyValueStore> SessionStore<T, S> {
    /// Create a store, restoring whatever session `storage` holds.
    pub fn new(transport: T, storage: S, base_path: impl Into<String>) -> Self {
        let state = Session::load(&storage);
        if state.is_authenticated() {
            tracing::debug!("Restored persisted session");
        }
        Self {
            inner: Rc::new(Inner {
                transport,
                storage,
                base_path: base_path.into(),
                state: RefCell::new(state),
                logout_hooks: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a callback run after every [`logout`](Self::logout).
    ///
    /// The UI uses this to return to the login screen.
    pub fn on_logout(&self, hook: impl Fn() + 'static) {
        self.inner.logout_hooks.borrow_mut().push(Rc::new(hook));
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub fn base_path(&self) -> &str {
        &self.inner.base_path
    }

    /// Base path + endpoint.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.inner.base_path, endpoint)
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token().map(str::to_string)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn has_role(&self, role: impl Into<Role>) -> bool {
        let role = role.into();
        self.inner
            .state
            .borrow()
            .user()
            .is_some_and(|user| user.role == role)
    }

    pub fn has_any_role<R: Into<Role>>(&self, roles: impl IntoIterator<Item = R>) -> bool {
        roles.into_iter().any(|role| self.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_manager(&self) -> bool {
        self.has_role(Role::Manager)
    }

    pub fn is_driver(&self) -> bool {
        self.has_role(Role::Driver)
    }

    /// Admins and managers may create and edit records.
    pub fn can_manage(&self) -> bool {
        self.has_any_role([Role::Admin, Role::Manager])
    }

    /// Default headers for an authenticated call, if a token is held.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    /// Authenticate against `/auth/login`.
    ///
    /// Stored state is left untouched on failure.
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let request = HttpRequest {
            method: Method::Post,
            url: self.url("/auth/login"),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(json!({ "username": username, "password": password }).to_string()),
        };

        let response = match self.inner.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Login error: {}", e);
                return LoginOutcome::Failure(NETWORK_ERROR.to_string());
            }
        };

        let body: Value = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Login error: unreadable response: {}", e);
                return LoginOutcome::Failure(NETWORK_ERROR.to_string());
            }
        };

        if body.get("success").and_then(Value::as_bool) != Some(true) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(LOGIN_FAILED);
            return LoginOutcome::Failure(message.to_string());
        }

        let data = body.get("data").cloned().unwrap_or(Value::Null);
        let LoginData { token, user } = match serde_json::from_value(data) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Login response without token or user: {}", e);
                return LoginOutcome::Failure(LOGIN_FAILED.to_string());
            }
        };

        let session = Session::new(token, user.clone());
        session.persist(&self.inner.storage);
        *self.inner.state.borrow_mut() = session;
        tracing::info!("Logged in as {} ({})", user.username, user.role);
        LoginOutcome::Success(user)
    }

    /// Drop the session from memory and storage. Safe to call repeatedly.
    pub fn logout(&self) {
        *self.inner.state.borrow_mut() = Session::default();
        Session::erase(&self.inner.storage);
        tracing::info!("Session cleared");

        let hooks: Vec<LogoutHook> = self.inner.logout_hooks.borrow().clone();
        for hook in hooks {
            hook();
        }
    }

    /// Re-validate the held token with `/auth/me`.
    ///
    /// Returns `false` without a network call when no token is held. A rejected
    /// token or a transport failure logs the user out.
    ///
    /// A session replaced or cleared while the request is in flight wins: the
    /// stale profile is discarded and `false` is returned.
    pub async fn check_token_validity(&self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        let request = HttpRequest {
            method: Method::Get,
            url: self.url("/auth/me"),
            headers: self.auth_headers(),
            body: None,
        };

        match self.inner.transport.send(request).await {
            Ok(response) if response.is_success() => {
                match parse_profile(&response.body) {
                    Some(_) if self.token().as_deref() != Some(token.as_str()) => {
                        tracing::info!("Session changed during token validation");
                        return false;
                    }
                    Some(user) => {
                        Session::persist_user(&user, &self.inner.storage);
                        self.inner.state.borrow_mut().refresh_user(user);
                        return true;
                    }
                    None => tracing::warn!("Token validation returned no profile"),
                }
            }
            Ok(response) => tracing::info!("Token rejected with status {}", response.status),
            Err(e) => tracing::error!("Token validation error: {}", e),
        }

        self.logout();
        false
    }
}

fn parse_profile(body: &str) -> Option<UserProfile> {
    let body: Value = serde_json::from_str(body).ok()?;
    if body.get("success").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    serde_json::from_value(body.get("data")?.clone()).ok()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::mock::MockTransport;
    use store::session::{TOKEN_KEY, USER_KEY};
    use store::MemoryStore;

    fn login_ok(transport: &MockTransport, role: &str) {
        transport.reply(
            200,
            json!({
                "success": true,
                "data": { "token": "T", "user": { "id": 1, "username": "u", "role": role } }
            }),
        );
    }

    fn store_for(transport: &MockTransport, storage: &MemoryStore) -> SessionStore<MockTransport, MemoryStore> {
        SessionStore::new(transport.clone(), storage.clone(), "/api")
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let session = store_for(&transport, &storage);
        login_ok(&transport, "admin");

        let outcome = session.login("u", "p").await;
        assert!(outcome.is_success());
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert!(session.can_manage());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T"));

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "/api/auth/login");
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "username": "u", "password": "p" }));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_state() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let session = store_for(&transport, &storage);

        transport.reply(401, json!({ "success": false, "message": "Invalid credentials" }));
        assert_eq!(
            session.login("u", "bad").await,
            LoginOutcome::Failure("Invalid credentials".to_string())
        );
        assert!(!session.is_authenticated());
        assert!(storage.is_empty());

        transport.reply(200, json!({ "success": false }));
        assert_eq!(
            session.login("u", "bad").await,
            LoginOutcome::Failure("Login failed".to_string())
        );

        transport.fail("connection refused");
        assert_eq!(
            session.login("u", "p").await,
            LoginOutcome::Failure("Network error occurred".to_string())
        );
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_session_restored_from_storage() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        login_ok(&transport, "manager");
        store_for(&transport, &storage).login("u", "p").await;

        let reloaded = store_for(&transport, &storage);
        assert!(reloaded.is_authenticated());
        assert!(reloaded.is_manager());
        assert_eq!(reloaded.token().as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_role_predicates_when_anonymous() {
        let session = store_for(&MockTransport::new(), &MemoryStore::new());
        assert!(!session.is_authenticated());
        assert!(!session.has_role("admin"));
        assert!(!session.has_any_role(["admin", "manager", "driver"]));
        assert!(!session.is_admin());
        assert!(!session.is_manager());
        assert!(!session.is_driver());
        assert!(!session.can_manage());
    }

    #[tokio::test]
    async fn test_driver_cannot_manage() {
        let transport = MockTransport::new();
        let session = store_for(&transport, &MemoryStore::new());
        login_ok(&transport, "driver");
        session.login("u", "p").await;

        assert!(session.is_driver());
        assert!(session.has_any_role(["manager", "driver"]));
        assert!(!session.can_manage());
    }

    #[tokio::test]
    async fn test_check_token_without_token_skips_network() {
        let transport = MockTransport::new();
        let session = store_for(&transport, &MemoryStore::new());
        assert!(!session.check_token_validity().await);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_check_token_refreshes_profile() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let session = store_for(&transport, &storage);
        login_ok(&transport, "manager");
        session.login("u", "p").await;

        transport.reply(
            200,
            json!({ "success": true, "data": { "id": 1, "username": "u", "role": "admin" } }),
        );
        assert!(session.check_token_validity().await);
        assert!(session.is_admin());
        assert!(storage.get(USER_KEY).unwrap().contains("admin"));

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "/api/auth/me");
        assert_eq!(request.header("authorization"), Some("Bearer T"));
    }

    #[tokio::test]
    async fn test_check_token_rejection_logs_out() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let session = store_for(&transport, &storage);
        login_ok(&transport, "admin");
        session.login("u", "p").await;

        let logouts = Rc::new(Cell::new(0));
        let counter = Rc::clone(&logouts);
        session.on_logout(move || counter.set(counter.get() + 1));

        transport.reply(401, json!({ "success": false, "message": "Token expired" }));
        assert!(!session.check_token_validity().await);
        assert!(!session.is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(logouts.get(), 1);
    }

    #[tokio::test]
    async fn test_logout_during_token_check_wins() {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let session = store_for(&transport, &storage);
        login_ok(&transport, "manager");
        session.login("u", "p").await;

        let racing = session.clone();
        transport.on_send(move || racing.logout());
        transport.reply(
            200,
            json!({ "success": true, "data": { "id": 1, "username": "u", "role": "admin" } }),
        );

        assert!(!session.check_token_validity().await);
        assert!(!session.is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_check_token_transport_failure_logs_out() {
        let transport = MockTransport::new();
        let session = store_for(&transport, &MemoryStore::new());
        login_ok(&transport, "admin");
        session.login("u", "p").await;

        transport.fail("timeout");
        assert!(!session.check_token_validity().await);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let session = store_for(&MockTransport::new(), &MemoryStore::new());
        let logouts = Rc::new(Cell::new(0));
        let counter = Rc::clone(&logouts);
        session.on_logout(move || counter.set(counter.get() + 1));

        session.logout();
        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(logouts.get(), 2);
    }
}
