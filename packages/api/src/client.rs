//! # Authenticated request wrapper
//!
//! [`ApiClient::request`] is the single path every screen uses to reach the
//! backend. It prefixes the base path, injects `Content-Type` and the bearer
//! token, and turns whatever comes back into an [`ApiResult`].
//!
//! A `401` is handled here once for the whole application: the session is torn
//! down, the user is told, and the caller receives `None`. Callers treat `None`
//! as "stop, the user is being sent to the login screen" and never see the
//! body of the rejected call.

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use store::KeyValueStore;

use crate::notify::{Notifier, Severity};
use crate::result::ApiResult;
use crate::session::SessionStore;
use crate::transport::{HttpRequest, Method, RequestOptions, Transport};

/// Message shown when the backend rejects the held token.
pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Shared handle issuing authenticated calls.
pub struct ApiClient<T, S> {
    session: SessionStore<T, S>,
    notifier: Rc<dyn Notifier>,
}

impl<T, S> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            notifier: Rc::clone(&self.notifier),
        }
    }
}

impl<T, S> PartialEq for ApiClient<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session && Rc::ptr_eq(&self.notifier, &other.notifier)
    }
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(session: SessionStore<T, S>, notifier: Rc<dyn Notifier>) -> Self {
        Self { session, notifier }
    }

    pub fn session(&self) -> &SessionStore<T, S> {
        &self.session
    }

    pub fn notifier(&self) -> &Rc<dyn Notifier> {
        &self.notifier
    }

    /// Issue one call to `base_path + endpoint`.
    ///
    /// Returns `None` when the backend answered `401`; the session has then
    /// already been cleared and the user notified. Transport and parse
    /// failures come back as `Some` with `success == false`.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Option<ApiResult> {
        let RequestOptions {
            method,
            headers,
            body,
        } = options;
        let request = HttpRequest {
            method,
            url: self.session.url(endpoint),
            headers: merge_headers(self.session.auth_headers(), headers),
            body,
        };

        let response = match self.session.transport().send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API request to {} failed: {}", endpoint, e);
                return Some(ApiResult::failed(e.to_string()));
            }
        };

        if response.is_unauthorized() {
            tracing::warn!("{} {} answered 401, ending session", method.as_str(), endpoint);
            self.session.logout();
            self.notifier.notify(Severity::Error, SESSION_EXPIRED);
            return None;
        }

        // 204 and other bodiless replies carry no envelope.
        let data = if response.body.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&response.body) {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!("Unreadable response from {}: {}", endpoint, e);
                    return Some(ApiResult::failed(format!("Invalid response body: {e}")));
                }
            }
        };

        Some(ApiResult::completed(response.status, data))
    }

    pub async fn get(&self, endpoint: &str) -> Option<ApiResult> {
        self.request(endpoint, RequestOptions::new(Method::Get)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Option<ApiResult> {
        self.send_json(Method::Post, endpoint, body).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Option<ApiResult> {
        self.send_json(Method::Put, endpoint, body).await
    }

    pub async fn delete(&self, endpoint: &str) -> Option<ApiResult> {
        self.request(endpoint, RequestOptions::new(Method::Delete)).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Option<ApiResult> {
        match serde_json::to_string(body) {
            Ok(body) => self.request(endpoint, RequestOptions::new(method).body(body)).await,
            Err(e) => {
                tracing::error!("Could not encode body for {}: {}", endpoint, e);
                Some(ApiResult::failed(e.to_string()))
            }
        }
    }
}

/// Defaults overlaid by caller headers; names compare case-insensitively.
fn merge_headers(
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .into_iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
        .collect();
    merged.extend(overrides);
    merged
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::MemoryStore;

    use super::*;
    use crate::mock::{MockTransport, RecordingNotifier};

    struct Fixture {
        transport: MockTransport,
        storage: MemoryStore,
        notifier: RecordingNotifier,
        client: ApiClient<MockTransport, MemoryStore>,
    }

    fn fixture() -> Fixture {
        let transport = MockTransport::new();
        let storage = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let session = SessionStore::new(transport.clone(), storage.clone(), "/api");
        let client = ApiClient::new(session, Rc::new(notifier.clone()));
        Fixture {
            transport,
            storage,
            notifier,
            client,
        }
    }

    async fn logged_in() -> Fixture {
        let f = fixture();
        f.transport.reply(
            200,
            json!({ "success": true, "data": { "token": "T", "user": { "id": 1, "role": "admin" } } }),
        );
        assert!(f.client.session().login("admin", "pw").await.is_success());
        f
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_authorization() {
        let f = fixture();
        f.transport.reply(200, json!({ "success": true, "data": [] }));

        let result = f.client.get("/vehicles").await.unwrap();
        assert!(result.success);

        let request = f.transport.last_request().unwrap();
        assert_eq!(request.url, "/api/vehicles");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert!(request.header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_bearer_token_injected() {
        let f = logged_in().await;
        f.transport.reply(200, json!({ "success": true, "data": [{ "id": 7 }] }));

        let result = f.client.get("/drivers").await.unwrap();
        assert_eq!(result.records(), vec![json!({ "id": 7 })]);
        assert_eq!(
            f.transport.last_request().unwrap().header("Authorization"),
            Some("Bearer T")
        );
    }

    #[tokio::test]
    async fn test_caller_headers_override_defaults() {
        let f = logged_in().await;
        f.transport.reply(200, json!({}));

        let options = RequestOptions::new(Method::Post)
            .header("content-type", "text/plain")
            .header("X-Trace", "1")
            .body("raw");
        f.client.request("/echo", options).await.unwrap();

        let request = f.transport.last_request().unwrap();
        let content_types: Vec<_> = request
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(request.header("Content-Type"), Some("text/plain"));
        assert_eq!(request.header("x-trace"), Some("1"));
        assert_eq!(request.header("authorization"), Some("Bearer T"));
        assert_eq!(request.body.as_deref(), Some("raw"));
    }

    #[tokio::test]
    async fn test_unauthorized_ends_session() {
        let f = logged_in().await;
        f.transport
            .reply(401, json!({ "success": false, "message": "Token expired" }));

        assert!(f.client.get("/vehicles").await.is_none());
        assert!(!f.client.session().is_authenticated());
        assert!(f.storage.is_empty());
        assert_eq!(
            f.notifier.messages(),
            vec![(Severity::Error, SESSION_EXPIRED.to_string())]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_with_unparseable_body() {
        let f = logged_in().await;
        f.transport.reply_raw(401, "<html>nope</html>");

        assert!(f.client.get("/vehicles").await.is_none());
        assert!(!f.client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_error_status_is_not_success() {
        let f = logged_in().await;
        f.transport.reply(
            400,
            json!({ "success": false, "message": "Registration number already exists" }),
        );

        let result = f.client.post("/vehicles", &json!({ "reg_no": "X" })).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.status, Some(400));
        assert_eq!(result.message(), Some("Registration number already exists"));
        assert!(f.client.session().is_authenticated());

        let request = f.transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"reg_no":"X"}"#));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let f = fixture();
        f.transport.fail("connection refused");

        let result = f.client.delete("/vehicles/1").await.unwrap();
        assert!(!result.success);
        assert!(result.is_transport_failure());
        assert!(f.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_empty_and_invalid_bodies() {
        let f = fixture();
        f.transport.reply_raw(204, "");
        f.transport.reply_raw(200, "not json");

        let empty = f.client.delete("/vehicles/1").await.unwrap();
        assert!(empty.success);
        assert_eq!(empty.data, Some(Value::Null));

        let invalid = f.client.get("/vehicles").await.unwrap();
        assert!(!invalid.success);
        assert!(invalid.is_transport_failure());
    }

    #[tokio::test]
    async fn test_empty_success_body_has_no_payload() {
        let f = fixture();
        f.transport.reply_raw(200, "  ");

        let result = f.client.post("/trips/1/start", &json!({})).await.unwrap();
        assert!(result.success);
        assert_eq!(result.status, Some(200));
        assert!(!result.is_transport_failure());
        assert!(result.payload().is_none());
        assert!(result.records().is_empty());
        assert_eq!(result.message_or("Trip updated"), "Trip updated");
    }

    #[tokio::test]
    async fn test_put_serializes_body() {
        let f = fixture();
        f.transport.reply(200, json!({ "success": true }));
        f.client.put("/trips/3", &json!({ "status": "planned" })).await.unwrap();

        let request = f.transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "/api/trips/3");
    }
}
