//! Application services, built once at start-up and shared via context.
//!
//! The durable storage behind the session depends on the platform:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Native** (tests, desktop tooling): one file per key via [`store::FileStore`]

use std::rc::Rc;

use api::{ApiClient, Notifier, ReqwestTransport, SessionStore};
use dioxus::prelude::*;
use store::FleetConfig;

use crate::platform;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

pub type AppSession = SessionStore<ReqwestTransport, PlatformStore>;
pub type AppClient = ApiClient<ReqwestTransport, PlatformStore>;

/// Origin used outside the browser when none is configured.
pub const NATIVE_ORIGIN: &str = "http://localhost:5000";

#[derive(Clone)]
pub struct Services {
    pub config: Rc<FleetConfig>,
    pub session: AppSession,
    pub client: AppClient,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && self.client == other.client
    }
}

impl Services {
    pub fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::clone(self.client.notifier())
    }
}

/// Create platform-appropriate durable storage.
pub fn make_storage() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("fleet");
        store::FileStore::new(base)
    }
}

/// Configured origin, else the page's own, else [`NATIVE_ORIGIN`].
pub fn resolve_origin(config: &FleetConfig) -> String {
    if !config.api.origin.is_empty() {
        return config.api.origin.clone();
    }
    platform::page_origin().unwrap_or_else(|| NATIVE_ORIGIN.to_string())
}

pub fn make_services(config: FleetConfig, notifier: Rc<dyn Notifier>) -> Services {
    let origin = resolve_origin(&config);
    tracing::info!("API at {}{}", origin, config.api.base_path);
    let session = SessionStore::new(
        ReqwestTransport::new(origin),
        make_storage(),
        config.api.base_path.clone(),
    );
    let client = ApiClient::new(session.clone(), notifier);
    Services {
        config: Rc::new(config),
        session,
        client,
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_resolution() {
        assert_eq!(resolve_origin(&FleetConfig::default()), NATIVE_ORIGIN);
        assert_eq!(
            resolve_origin(&FleetConfig::default().with_origin("https://fleet.example.com")),
            "https://fleet.example.com"
        );
    }
}
