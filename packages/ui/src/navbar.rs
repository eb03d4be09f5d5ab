use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState, LogoutButton};
use crate::icons::{FaTruck, FaUser};
use crate::Icon;

/// Top-level screens of the back office.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Vehicles,
    Drivers,
    Trips,
    Maintenance,
    Reports,
    Users,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Dashboard,
        Section::Vehicles,
        Section::Drivers,
        Section::Trips,
        Section::Maintenance,
        Section::Reports,
        Section::Users,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Vehicles => "Vehicles",
            Section::Drivers => "Drivers",
            Section::Trips => "Trips",
            Section::Maintenance => "Maintenance",
            Section::Reports => "Reports",
            Section::Users => "Users",
        }
    }

    /// Users is admin-only; everything else needs a login.
    pub fn visible_to(&self, auth: &AuthState) -> bool {
        match self {
            Section::Users => auth.is_admin(),
            _ => auth.is_authenticated(),
        }
    }
}

/// Application bar. Navigation links are passed as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let username = auth()
        .user
        .map(|user| user.username)
        .unwrap_or_default();

    rsx! {
        nav {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: FaTruck, width: 18, height: 18 }
                span { " Fleet Management" }
            }
            div {
                class: "navbar-links",
                {children}
            }
            div {
                class: "navbar-user",
                Icon { icon: FaUser, width: 14, height: 14 }
                span { class: "navbar-username", " {username}" }
                LogoutButton { class: "btn btn-sm btn-outline-light" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{Role, UserProfile};

    fn auth(role: Option<Role>) -> AuthState {
        AuthState {
            user: role.map(|role| UserProfile {
                id: 7,
                username: "x".into(),
                email: None,
                role,
                is_active: None,
            }),
            loading: false,
        }
    }

    #[test]
    fn test_users_section_is_admin_only() {
        let visible = |state: &AuthState| {
            Section::ALL
                .iter()
                .filter(|s| s.visible_to(state))
                .count()
        };
        assert_eq!(visible(&auth(None)), 0);
        assert_eq!(visible(&auth(Some(Role::Driver))), 6);
        assert_eq!(visible(&auth(Some(Role::Manager))), 6);
        assert_eq!(visible(&auth(Some(Role::Admin))), 7);
        assert!(Section::Reports.visible_to(&auth(Some(Role::Driver))));
        assert!(!Section::Users.visible_to(&auth(Some(Role::Manager))));
    }
}
