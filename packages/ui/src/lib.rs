//! # UI crate — screens and widgets of the fleet back office
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`table`] | Column/action definitions, `TableView` builder, filtering, pagination, CSV export and print |
//! | [`format`] | Display formatters for dates, money, numbers and status badges |
//! | [`components`] | `DataTable`, `Pager` and `FilterBar` widgets over the table models |
//! | [`views`] | Record form, generic list screen, dashboard, password change |
//! | [`services`] | Session, API client and config built at start-up and shared via context |
//! | [`toast`] | Notification queue and its `Notifier` implementation |
//! | [`busy`] | Global loading indicator |
//! | [`auth`] | Auth context, login form, logout button |
//! | [`navbar`] | Application bar and role-gated sections |
//! | [`platform`] | Timers, confirmation prompts, page origin |

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod components;
pub mod format;
pub mod platform;
pub mod table;
pub mod views;

pub const FLEET_CSS: Asset = asset!("/assets/fleet.css");

pub mod services;
pub use services::{make_services, use_services, AppClient, AppSession, Services};

pub mod toast;
pub use toast::{use_toasts, SignalNotifier, ToastQueue, ToastStack};

pub mod busy;
pub use busy::{use_busy, Busy, BusyGuard, LoadingSpinner};

pub mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LoginForm, LogoutButton};

pub mod navbar;
pub use navbar::{Navbar, Section};
