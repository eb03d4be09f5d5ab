use dioxus::prelude::*;
use ui::{use_auth, LoginForm, Navbar, Section};

use crate::Route;

/// Layout around every route: login gate, navigation bar, page body.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let state = auth();

    if state.loading {
        return rsx! {
            div { class: "app-main view-muted text-center", "Checking session..." }
        };
    }
    if !state.is_authenticated() {
        return rsx! { LoginForm {} };
    }

    let sections: Vec<Section> = Section::ALL
        .into_iter()
        .filter(|section| section.visible_to(&state))
        .collect();

    rsx! {
        Navbar {
            for section in sections {
                Link {
                    key: "{section.title()}",
                    to: Route::from(section),
                    active_class: "active",
                    "{section.title()}"
                }
            }
            Link { to: Route::Profile {}, active_class: "active", "Profile" }
        }
        main {
            class: "app-main",
            Outlet::<Route> {}
        }
    }
}
