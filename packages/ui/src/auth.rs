//! Authentication context and hooks for the UI.

use api::{LoginOutcome, Severity};
use dioxus::prelude::*;
use store::{Role, UserProfile};

use crate::busy::{use_busy, BusyGuard};
use crate::icons::{FaRightFromBracket, FaRightToBracket, FaTruck};
use crate::services::use_services;
use crate::{platform, Icon};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    /// A persisted token is being re-validated.
    pub loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.user.as_ref().is_some_and(|user| user.role == *role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    pub fn can_manage(&self) -> bool {
        self.has_role(&Role::Admin) || self.has_role(&Role::Manager)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component mirroring the session store into a signal.
///
/// Must sit below the [`crate::Services`] context provider.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let services = use_services();
    let mut auth_state = use_signal(|| AuthState {
        user: services.session.user(),
        loading: services.session.is_authenticated(),
    });

    // Any logout, including the client's global 401 handling, drops the user.
    let session = services.session.clone();
    use_hook(move || {
        session.on_logout(move || {
            let mut state = auth_state;
            state.set(AuthState {
                user: None,
                loading: false,
            });
        })
    });

    // Re-validate a persisted token on mount
    let session = services.session.clone();
    let _ = use_resource(move || {
        let session = session.clone();
        async move {
            let valid = session.check_token_validity().await;
            auth_state.set(AuthState {
                user: if valid { session.user() } else { None },
                loading: false,
            });
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Both credentials must be non-empty. They are sent exactly as typed.
pub fn validate_login(username: &str, password: &str) -> Result<(), &'static str> {
    if username.is_empty() || password.is_empty() {
        return Err("Please enter both username and password");
    }
    Ok(())
}

/// Username/password form. Shown instead of the app while logged out.
#[component]
pub fn LoginForm() -> Element {
    let services = use_services();
    let mut auth = use_auth();
    let busy = use_busy();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        async move {
            if submitting() {
                return;
            }
            let notifier = services.notifier();
            let (user, pass) = (username(), password());
            if let Err(message) = validate_login(&user, &pass) {
                notifier.notify(Severity::Error, message);
                return;
            }

            submitting.set(true);
            let guard = BusyGuard::begin(busy);
            match services.session.login(&user, &pass).await {
                LoginOutcome::Success(profile) => {
                    auth.set(AuthState {
                        user: Some(profile),
                        loading: false,
                    });
                    password.set(String::new());
                    notifier.notify(Severity::Success, "Login successful!");
                }
                LoginOutcome::Failure(message) => notifier.notify(Severity::Error, &message),
            }
            drop(guard);
            submitting.set(false);
        }
    };

    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                div {
                    class: "login-brand",
                    Icon { icon: FaTruck, width: 32, height: 32 }
                    h1 { "Fleet Management" }
                    p { class: "view-muted", "Sign in to continue" }
                }
                form {
                    onsubmit: onsubmit,
                    div {
                        class: "form-group",
                        label { r#for: "username", "Username" }
                        input {
                            id: "username",
                            class: "form-control",
                            r#type: "text",
                            autocomplete: "username",
                            value: username(),
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-group",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            class: "form-control",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    button {
                        class: "btn btn-primary w-full",
                        r#type: "submit",
                        disabled: submitting(),
                        Icon { icon: FaRightToBracket, width: 14, height: 14 }
                        if submitting() { " Signing in..." } else { " Login" }
                    }
                }
            }
        }
    }
}

/// Button to log out the current user, after confirmation.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();

    let onclick = move |_| {
        if !platform::confirm("Are you sure you want to logout?") {
            return;
        }
        services.session.logout();
        services
            .notifier()
            .notify(Severity::Info, "Logged out successfully");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            " {label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(role: Option<&str>) -> AuthState {
        AuthState {
            user: role.map(|role| UserProfile {
                id: 1,
                username: "u".into(),
                email: None,
                role: Role::from(role),
                is_active: Some(true),
            }),
            loading: false,
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("admin", "secret").is_ok());
        assert!(validate_login(" admin ", "secret").is_ok());
        assert_eq!(
            validate_login("", "secret"),
            Err("Please enter both username and password")
        );
        assert_eq!(
            validate_login("admin", ""),
            Err("Please enter both username and password")
        );
    }

    #[test]
    fn test_role_helpers() {
        assert!(!state(None).is_authenticated());
        assert!(!state(None).is_admin());
        assert!(!state(None).can_manage());
        assert!(state(Some("admin")).is_admin());
        assert!(state(Some("manager")).can_manage());
        assert!(!state(Some("manager")).is_admin());
        assert!(!state(Some("driver")).can_manage());
    }
}
