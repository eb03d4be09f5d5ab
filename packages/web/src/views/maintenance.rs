use api::Resource;
use dioxus::prelude::*;
use ui::components::SelectFilter;
use ui::format;
use ui::table::Column;
use ui::use_auth;
use ui::views::{FieldKind, FormField, ListSpec, ResourceList};

use super::{choices, with_role_actions};

const STATUSES: [&str; 2] = ["active", "completed"];
const KINDS: [&str; 2] = ["scheduled", "unscheduled"];

fn spec() -> ListSpec {
    let mut status = SelectFilter::new("status", "Status", "All Statuses");
    status.options = choices(&STATUSES);
    let mut kind = SelectFilter::new("maintenance_type", "Maintenance Type", "All Types");
    kind.options = choices(&KINDS);

    ListSpec::new(Resource::Maintenance)
        .subtitle("Service history and upcoming work")
        .column(Column::new("vehicle", "Vehicle").formatted(|v| format::nested(v, "reg_no")))
        .column(Column::new("description", "Description"))
        .column(Column::new("maintenance_type", "Type").badge())
        .column(Column::new("cost", "Cost").formatted(format::currency))
        .column(Column::new("date", "Date").formatted(format::date))
        .column(Column::new("status", "Status").badge())
        .select(status)
        .select(kind)
        .search(["vehicle.reg_no", "description"], "Search by vehicle or description...")
        .field(FormField::lookup("vehicle_id", "Vehicle", Resource::Vehicles, "reg_no").required())
        .field(FormField::new("date", "Date", FieldKind::Date).required())
        .field(FormField::new("maintenance_type", "Type", FieldKind::Select(choices(&KINDS))).default_value("scheduled"))
        .field(FormField::new("cost", "Cost", FieldKind::Number))
        .field(FormField::new("mileage", "Mileage", FieldKind::Number))
        .field(FormField::text("service_provider", "Service Provider"))
        .field(FormField::new("description", "Description", FieldKind::TextArea).required())
        .field(FormField::new("next_service_date", "Next Service Date", FieldKind::Date))
        .field(FormField::new("status", "Status", FieldKind::Select(choices(&STATUSES))).default_value("active"))
        .label_field("description")
}

#[component]
pub fn Maintenance() -> Element {
    let auth = use_auth();
    let spec = with_role_actions(spec(), &auth());

    rsx! { ResourceList { spec } }
}
