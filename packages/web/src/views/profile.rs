use dioxus::prelude::*;
use ui::use_auth;
use ui::views::ChangePasswordForm;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let Some(user) = auth().user else {
        return rsx! {};
    };
    let email = user.email.clone().unwrap_or_else(|| "N/A".to_string());

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                div {
                    h2 { "Profile" }
                    p { class: "view-muted", "Account details" }
                }
            }
            div {
                class: "card profile-card",
                p { strong { "Username: " } "{user.username}" }
                p { strong { "Email: " } "{email}" }
                p { strong { "Role: " } "{user.role.as_str()}" }
            }
            ChangePasswordForm {}
        }
    }
}
