use api::Resource;
use dioxus::prelude::*;
use serde_json::Value;
use store::{field, value_to_string, Record};
use ui::components::SelectFilter;
use ui::format;
use ui::table::{Action, ActionIcon, Column};
use ui::use_auth;
use ui::views::{FieldKind, FormField, ListSpec, ResourceList};

use super::{choices, with_role_actions};

const STATUSES: [&str; 4] = ["planned", "in_progress", "completed", "cancelled"];

fn distance(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        some => format::number(some, 2),
    }
}

fn status_is(record: &Record, status: &str) -> bool {
    value_to_string(field(record, "status")) == status
}

fn spec() -> ListSpec {
    let mut status = SelectFilter::new("status", "Status", "All Status");
    status.options = choices(&STATUSES);

    ListSpec::new(Resource::Trips)
        .subtitle("Track vehicle trips")
        .column(Column::new("source", "Source"))
        .column(Column::new("destination", "Destination"))
        .column(Column::new("vehicle", "Vehicle").formatted(|v| format::nested(v, "reg_no")))
        .column(Column::new("driver", "Driver").formatted(|v| format::nested(v, "name")))
        .column(Column::new("distance", "Distance (km)").formatted(distance))
        .column(Column::new("status", "Status").badge())
        .column(Column::new("trip_date", "Date").formatted(format::date))
        .select(status)
        .search(
            ["source", "destination", "vehicle.reg_no", "driver.name"],
            "Search trips...",
        )
        .field(FormField::lookup("vehicle_id", "Vehicle", Resource::Vehicles, "reg_no").required())
        .field(FormField::lookup("driver_id", "Driver", Resource::Drivers, "name").required())
        .field(FormField::text("source", "Source").required())
        .field(FormField::text("destination", "Destination").required())
        .field(FormField::new("distance", "Distance (km)", FieldKind::Number))
        .field(FormField::new("fuel_used", "Fuel Used (L)", FieldKind::Number))
        .field(FormField::new("trip_date", "Trip Date", FieldKind::Date))
        .field(FormField::new("status", "Status", FieldKind::Select(choices(&STATUSES))).default_value("planned"))
        .field(FormField::new("notes", "Notes", FieldKind::TextArea))
        .label_field("source")
}

#[component]
pub fn Trips() -> Element {
    let auth = use_auth();
    let state = auth();
    let mut spec = with_role_actions(spec(), &state);
    if state.can_manage() {
        spec = spec
            .action(
                Action::new("start", ActionIcon::Start, "Start Trip")
                    .class("btn-outline-success")
                    .when(|trip| status_is(trip, "planned")),
            )
            .action(
                Action::new("complete", ActionIcon::Complete, "Complete Trip")
                    .class("btn-outline-success")
                    .when(|trip| status_is(trip, "in_progress")),
            );
    }

    rsx! { ResourceList { spec } }
}
