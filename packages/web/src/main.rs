use std::rc::Rc;

use dioxus::prelude::*;

use store::FleetConfig;
use ui::{make_services, AuthProvider, Busy, LoadingSpinner, Section, SignalNotifier, ToastQueue, ToastStack};
use views::{Dashboard, Drivers, Maintenance, Profile, Reports, Shell, Trips, Users, Vehicles};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/vehicles")]
        Vehicles {},
        #[route("/drivers")]
        Drivers {},
        #[route("/trips")]
        Trips {},
        #[route("/maintenance")]
        Maintenance {},
        #[route("/reports")]
        Reports {},
        #[route("/users")]
        Users {},
        #[route("/profile")]
        Profile {},
}

impl From<Section> for Route {
    fn from(section: Section) -> Self {
        match section {
            Section::Dashboard => Route::Dashboard {},
            Section::Vehicles => Route::Vehicles {},
            Section::Drivers => Route::Drivers {},
            Section::Trips => Route::Trips {},
            Section::Maintenance => Route::Maintenance {},
            Section::Reports => Route::Reports {},
            Section::Users => Route::Users {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const FLEET_TOML: &str = include_str!("../fleet.toml");

fn main() {
    // Fails only when a subscriber is already installed.
    let _ = dioxus::logger::init(tracing::Level::INFO);
    dioxus::launch(App);
}

fn load_config() -> FleetConfig {
    FleetConfig::from_toml(FLEET_TOML).unwrap_or_else(|e| {
        tracing::warn!("Invalid {}, using defaults: {}", FleetConfig::filename(), e);
        FleetConfig::default()
    })
}

#[component]
fn App() -> Element {
    let toasts = use_context_provider(|| Signal::new(ToastQueue::default()));
    use_context_provider(|| Signal::new(Busy::default()));
    use_context_provider(move || {
        let config = load_config();
        let notifier = SignalNotifier::new(toasts, config.notifications.clone());
        make_services(config, Rc::new(notifier))
    });

    rsx! {
        document::Link { rel: "stylesheet", href: ui::FLEET_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
        ToastStack {}
        LoadingSpinner {}
    }
}
