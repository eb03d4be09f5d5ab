//! Fleet reports from the `/analytics` endpoints, shown as tables.
//!
//! Every report loads on its own. A refused or unreachable report shows the
//! empty placeholder and leaves the others alone.

use api::{Analytics, ApiResult};
use dioxus::prelude::*;
use serde_json::{json, Value};
use store::{Record, RecordId};

use crate::busy::{use_busy, BusyGuard};
use crate::components::DataTable;
use crate::format;
use crate::icons::FaRotate;
use crate::services::use_services;
use crate::table::{Column, TableView};
use crate::Icon;

/// One report card.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub title: String,
    pub source: Analytics,
    pub columns: Vec<Column>,
}

impl Report {
    pub fn new(title: impl Into<String>, source: Analytics) -> Self {
        Self {
            title: title.into(),
            source,
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

/// The reports screen, in display order.
///
/// Chart-style reports (`labels`/`values`) expose `label` and `value` fields.
pub fn fleet_reports() -> Vec<Report> {
    vec![
        Report::new("Fuel Consumption (last 30 days)", Analytics::fuel_consumption())
            .column(Column::new("label", "Date").formatted(format::date))
            .column(Column::new("value", "Liters").formatted(|v| format::number(v, 2))),
        Report::new("Maintenance Costs (last 12 months)", Analytics::maintenance_costs())
            .column(Column::new("label", "Month"))
            .column(Column::new("value", "Cost").formatted(format::currency)),
        Report::new("Trips per Driver", Analytics::TripsPerDriver)
            .column(Column::new("label", "Driver"))
            .column(Column::new("value", "Trips")),
        Report::new("Vehicle Utilization (last 30 days)", Analytics::vehicle_utilization())
            .column(Column::new("vehicle", "Vehicle"))
            .column(
                Column::new("utilization_rate", "Utilization")
                    .formatted(|v| format!("{}%", format::number(v, 1))),
            )
            .column(Column::new("days_used", "Days Used")),
        Report::new("Fuel Efficiency", Analytics::FuelEfficiency)
            .column(Column::new("vehicle", "Vehicle"))
            .column(Column::new("fuel_type", "Fuel").formatted(format::capitalize))
            .column(Column::new("efficiency", "km/L").formatted(|v| format::number(v, 2)))
            .column(Column::new("total_distance", "Distance (km)").formatted(|v| format::number(v, 1)))
            .column(Column::new("total_fuel", "Fuel Used (L)").formatted(|v| format::number(v, 1))),
    ]
}

/// Rows of a report response: a record array as is, or a chart payload
/// zipped into `{ label, value }` rows. Anything else is empty.
pub fn report_rows(result: &ApiResult) -> Vec<Record> {
    match result.payload() {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(chart)) => {
            let labels = chart.get("labels").and_then(Value::as_array);
            let values = chart.get("values").and_then(Value::as_array);
            match (labels, values) {
                (Some(labels), Some(values)) => labels
                    .iter()
                    .zip(values)
                    .map(|(label, value)| json!({ "label": label, "value": value }))
                    .collect(),
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

#[component]
pub fn ReportsView() -> Element {
    let reports = use_hook(fleet_reports);

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                div {
                    h2 { "Reports" }
                    p { class: "view-muted", "Fuel, maintenance and utilization trends" }
                }
            }
            div {
                class: "dashboard-grid",
                for report in reports.iter().cloned() {
                    ReportCard { key: "{report.title}", report }
                }
            }
        }
    }
}

#[component]
fn ReportCard(report: Report) -> Element {
    let services = use_services();
    let busy = use_busy();
    let mut rows = use_signal(Vec::<Record>::new);
    let source = report.source;

    let client = services.client.clone();
    let mut loader = use_resource(move || {
        let client = client.clone();
        async move {
            let guard = BusyGuard::begin(busy);
            let result = client.analytics(source).await;
            drop(guard);
            match result {
                None => {}
                Some(result) if result.success => rows.set(report_rows(&result)),
                Some(result) => tracing::warn!(
                    "Report {} unavailable: {}",
                    source.endpoint(),
                    result.message_or("unknown error")
                ),
            }
        }
    });

    let view = TableView::build(&rows.read(), &report.columns, &[]);

    rsx! {
        div {
            class: "card",
            div {
                class: "view-header",
                h5 { class: "card-title", "{report.title}" }
                button {
                    class: "btn btn-sm btn-outline-secondary",
                    title: "Reload",
                    onclick: move |_| loader.restart(),
                    Icon { icon: FaRotate, width: 12, height: 12 }
                }
            }
            DataTable { view, on_action: move |_: (String, RecordId)| {} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(data: Value) -> ApiResult {
        ApiResult::completed(200, json!({ "success": true, "data": data }))
    }

    #[test]
    fn test_chart_payload_becomes_rows() {
        let result = ok(json!({ "labels": ["2024-01", "2024-02", "2024-03"], "values": [120.5, 98.0] }));
        assert_eq!(
            report_rows(&result),
            vec![
                json!({ "label": "2024-01", "value": 120.5 }),
                json!({ "label": "2024-02", "value": 98.0 }),
            ]
        );
    }

    #[test]
    fn test_record_payload_passes_through() {
        let rows = json!([
            { "vehicle": "KA-01 (Tata Ace)", "utilization_rate": 43.3, "days_used": 13 },
            { "vehicle": "KA-02 (Eicher)", "utilization_rate": 10.0, "days_used": 3 },
        ]);
        assert_eq!(report_rows(&ok(rows.clone())), rows.as_array().unwrap().clone());
    }

    #[test]
    fn test_unusable_payload_is_empty() {
        assert!(report_rows(&ok(json!({ "labels": ["a"] }))).is_empty());
        assert!(report_rows(&ok(json!("text"))).is_empty());
        assert!(report_rows(&ApiResult::failed("Network error")).is_empty());
    }

    #[test]
    fn test_every_analytics_report_is_listed() {
        let endpoints: Vec<String> = fleet_reports().iter().map(|r| r.source.endpoint()).collect();
        assert_eq!(
            endpoints,
            [
                "/analytics/fuel-consumption?days=30",
                "/analytics/maintenance-costs?months=12",
                "/analytics/trips-per-driver",
                "/analytics/vehicle-utilization?days=30",
                "/analytics/fuel-efficiency",
            ]
        );
    }

    #[test]
    fn test_report_cells_are_formatted() {
        let reports = fleet_reports();
        let utilization = &reports[3];
        let rows = vec![json!({ "vehicle": "KA-01", "utilization_rate": 43.333, "days_used": 13 })];
        let view = TableView::build(&rows, &utilization.columns, &[]);
        assert_eq!(view.headers, ["Vehicle", "Utilization", "Days Used"]);
        assert_eq!(view.row_count(), 1);
        assert!(view.to_html().contains("43.3%"));
    }
}
