use api::Resource;
use dioxus::prelude::*;
use ui::components::SelectFilter;
use ui::table::Column;
use ui::use_auth;
use ui::views::{FieldKind, FormField, ListSpec, ResourceList};

use super::{choices, with_role_actions};

const STATUSES: [&str; 2] = ["active", "inactive"];

fn spec() -> ListSpec {
    let mut status = SelectFilter::new("status", "Status", "All Status");
    status.options = choices(&STATUSES);

    ListSpec::new(Resource::Drivers)
        .subtitle("Manage your drivers")
        .column(Column::new("name", "Name"))
        .column(Column::new("license_no", "License Number"))
        .column(Column::new("phone", "Phone"))
        .column(Column::new("email", "Email"))
        .column(Column::new("status", "Status").badge())
        .select(status)
        .search(["name", "license_no", "phone"], "Search drivers...")
        .field(FormField::text("name", "Full Name").required())
        .field(FormField::text("license_no", "License Number").required())
        .field(FormField::text("phone", "Phone"))
        .field(FormField::new("email", "Email", FieldKind::Email))
        .field(FormField::new("status", "Status", FieldKind::Select(choices(&STATUSES))).default_value("active"))
        .label_field("name")
}

#[component]
pub fn Drivers() -> Element {
    let auth = use_auth();
    let spec = with_role_actions(spec(), &auth());

    rsx! { ResourceList { spec } }
}
