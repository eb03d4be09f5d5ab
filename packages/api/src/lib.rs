//! # API crate — REST client and authentication session
//!
//! Everything the fleet back office needs to talk to its backend. The backend
//! itself is an external collaborator: a JSON REST API under a fixed base path
//! (`/api`) whose responses carry `{ success, data, message? }` and which
//! answers `401` when a token is missing, expired or revoked.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | [`Transport`] seam, request/response values, the `reqwest` implementation |
//! | [`result`] | [`ApiResult`], the normalized outcome of one call |
//! | [`session`] | [`SessionStore`]: login, logout, token re-validation, role predicates |
//! | [`client`] | [`ApiClient`]: `request` plus `get`/`post`/`put`/`delete`, auth header injection, global 401 handling |
//! | [`resources`] | Typed endpoints for vehicles, drivers, trips, maintenance, users and analytics |
//! | [`notify`] | [`Notifier`] seam for user-visible messages |
//!
//! ## Wiring
//!
//! Services are built once at start-up and passed to whoever needs them:
//!
//! ```ignore
//! let session = SessionStore::new(transport, storage, "/api");
//! let client = ApiClient::new(session.clone(), notifier);
//! ```
//!
//! Both are cheap `Clone` handles onto shared single-threaded state.

pub mod client;
pub mod error;
pub mod notify;
pub mod resources;
pub mod result;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;
pub use error::TransportError;
pub use notify::{Notifier, Severity, TracingNotifier};
pub use resources::{Analytics, ListQuery, Resource};
pub use result::ApiResult;
pub use session::{LoginOutcome, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, RequestOptions, Transport};

pub use store::{Record, RecordId, Role, UserProfile};
