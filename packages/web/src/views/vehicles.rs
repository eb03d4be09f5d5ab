use api::Resource;
use dioxus::prelude::*;
use ui::components::SelectFilter;
use ui::format;
use ui::table::Column;
use ui::use_auth;
use ui::views::{FieldKind, FormField, ListSpec, ResourceList};

use super::{choices, with_role_actions};

const STATUSES: [&str; 3] = ["active", "maintenance", "inactive"];
const FUEL_TYPES: [&str; 3] = ["petrol", "diesel", "electric"];

fn spec() -> ListSpec {
    let mut status = SelectFilter::new("status", "Status", "All Status");
    status.options = choices(&STATUSES);
    let mut fuel = SelectFilter::new("fuel_type", "Fuel Type", "All Fuel Types");
    fuel.options = choices(&FUEL_TYPES);

    ListSpec::new(Resource::Vehicles)
        .subtitle("Manage your fleet vehicles")
        .column(Column::new("reg_no", "Registration"))
        .column(Column::new("model", "Model"))
        .column(Column::new("fuel_type", "Fuel Type").formatted(format::capitalize))
        .column(Column::new("status", "Status").badge())
        .column(Column::new("created_at", "Created").formatted(format::date))
        .select(status)
        .select(fuel)
        .search(["reg_no", "model"], "Search vehicles...")
        .field(FormField::text("reg_no", "Registration Number").required())
        .field(FormField::text("model", "Model").required())
        .field(FormField::new("fuel_type", "Fuel Type", FieldKind::Select(choices(&FUEL_TYPES))).required())
        .field(FormField::new("status", "Status", FieldKind::Select(choices(&STATUSES))).default_value("active"))
        .label_field("reg_no")
}

#[component]
pub fn Vehicles() -> Element {
    let auth = use_auth();
    let spec = with_role_actions(spec(), &auth());

    rsx! { ResourceList { spec } }
}
