use api::{Resource, Severity};
use dioxus::prelude::*;
use store::{record_id, RecordId};
use ui::format;
use ui::table::{Action, Cell, Column};
use ui::views::{FieldKind, FormField, ListSpec, ResourceList};
use ui::{use_auth, use_services};

use super::choices;

const ACCESS_DENIED: &str = "Access denied. Admin privileges required.";
const ROLES: [&str; 3] = ["admin", "manager", "driver"];

fn spec(own_id: RecordId) -> ListSpec {
    ListSpec::new(Resource::Users)
        .subtitle("Manage system users")
        .column(Column::new("username", "Username"))
        .column(Column::new("email", "Email"))
        .column(Column::new("role", "Role").badge())
        .column(Column::new("is_active", "Status").with_formatter(|value, _| {
            let active = value.and_then(|v| v.as_bool()).unwrap_or(false);
            Cell::badge(if active { "active" } else { "inactive" })
        }))
        .column(Column::new("created_at", "Created").formatted(format::date))
        .search(["username", "email", "role"], "Search users...")
        .action(Action::edit())
        // No deleting your own account.
        .action(Action::delete().when(move |user| record_id(user) != Some(own_id)))
        .field(FormField::text("username", "Username").required())
        .field(FormField::new("email", "Email", FieldKind::Email).required())
        .field(FormField::new("role", "Role", FieldKind::Select(choices(&ROLES))).required())
        .field(FormField::new("is_active", "Active", FieldKind::Boolean))
        .label_field("username")
}

#[component]
pub fn Users() -> Element {
    let services = use_services();
    let auth = use_auth();
    let state = auth();
    let admin = state.is_admin();

    use_effect(move || {
        if !admin {
            services.notifier().notify(Severity::Error, ACCESS_DENIED);
        }
    });

    let Some(user) = state.user.filter(|_| admin) else {
        return rsx! {
            div { class: "card view-muted text-center", "{ACCESS_DENIED}" }
        };
    };

    rsx! { ResourceList { spec: spec(user.id) } }
}
