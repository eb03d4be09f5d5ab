use api::Severity;
use dioxus::prelude::*;

use crate::busy::{use_busy, BusyGuard};
use crate::icons::FaKey;
use crate::services::use_services;
use crate::Icon;

/// Checks run before the request is sent.
pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> Result<(), &'static str> {
    if current.is_empty() || new.is_empty() {
        return Err("Please enter both the current and the new password");
    }
    if new != confirm {
        return Err("New passwords do not match");
    }
    Ok(())
}

#[component]
pub fn ChangePasswordForm() -> Element {
    let services = use_services();
    let busy = use_busy();
    let mut current = use_signal(String::new);
    let mut new = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        async move {
            if submitting() {
                return;
            }
            let notifier = services.notifier();
            if let Err(message) = validate_password_change(&current(), &new(), &confirm()) {
                notifier.notify(Severity::Error, message);
                return;
            }

            submitting.set(true);
            let guard = BusyGuard::begin(busy);
            let result = services.client.change_password(&current(), &new()).await;
            drop(guard);
            submitting.set(false);

            match result {
                None => {}
                Some(result) if result.success => {
                    current.set(String::new());
                    new.set(String::new());
                    confirm.set(String::new());
                    notifier.notify(Severity::Success, "Password changed successfully");
                }
                Some(result) => notifier.notify(
                    Severity::Error,
                    &result.message_or("Error changing password"),
                ),
            }
        }
    };

    rsx! {
        div {
            class: "card profile-card",
            h5 { class: "card-title", "Change Password" }
            form {
                onsubmit: onsubmit,
                div {
                    class: "form-group",
                    label { r#for: "current-password", "Current Password" }
                    input {
                        id: "current-password",
                        class: "form-control",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: current(),
                        oninput: move |evt: FormEvent| current.set(evt.value()),
                    }
                }
                div {
                    class: "form-group",
                    label { r#for: "new-password", "New Password" }
                    input {
                        id: "new-password",
                        class: "form-control",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: new(),
                        oninput: move |evt: FormEvent| new.set(evt.value()),
                    }
                }
                div {
                    class: "form-group",
                    label { r#for: "confirm-password", "Confirm New Password" }
                    input {
                        id: "confirm-password",
                        class: "form-control",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: confirm(),
                        oninput: move |evt: FormEvent| confirm.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    Icon { icon: FaKey, width: 14, height: 14 }
                    " Change Password"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(validate_password_change("old", "new", "new").is_ok());
        assert_eq!(
            validate_password_change("", "new", "new"),
            Err("Please enter both the current and the new password")
        );
        assert_eq!(
            validate_password_change("old", "", ""),
            Err("Please enter both the current and the new password")
        );
        assert_eq!(
            validate_password_change("old", "new", "neu"),
            Err("New passwords do not match")
        );
    }
}
