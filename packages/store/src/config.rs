//! # Client configuration — `fleet.toml`
//!
//! Settings the web client reads at start-up.
//!
//! ```toml
//! [api]
//! base_path = "/api"   # prefix prepended to every endpoint
//! origin = ""          # empty = the page's own origin
//!
//! [table]
//! page_size = 10
//! search_debounce_ms = 300
//!
//! [notifications]
//! default_ms = 3000    # success / warning / info toasts
//! error_ms = 5000      # error toasts stay up longer
//! ```
//!
//! Every field has a serde default, so a missing or empty file is equivalent to
//! [`FleetConfig::default`].

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `fleet.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Scheme + host the base path is resolved against. Empty means the page origin.
    #[serde(default)]
    pub origin: String,
}

fn default_base_path() -> String {
    "/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            origin: String::new(),
        }
    }
}

/// List screen behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u32,
}

fn default_page_size() -> usize {
    10
}

fn default_search_debounce() -> u32 {
    300
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce(),
        }
    }
}

/// Toast lifetimes in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_toast_ms")]
    pub default_ms: u32,
    #[serde(default = "default_error_toast_ms")]
    pub error_ms: u32,
}

fn default_toast_ms() -> u32 {
    3000
}

fn default_error_toast_ms() -> u32 {
    5000
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_ms: default_toast_ms(),
            error_ms: default_error_toast_ms(),
        }
    }
}

impl FleetConfig {
    /// Builder method to set the backend origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.api.origin = origin.into();
        self
    }

    /// Builder method to set the list page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.table.page_size = page_size;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "fleet.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
