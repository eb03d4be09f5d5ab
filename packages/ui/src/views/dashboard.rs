//! Landing screen: headline counts, trips per vehicle, recent activity.
//!
//! The four reports are fetched together. If any of them comes back without a
//! response, none of the results are shown.

use api::{Analytics, ApiResult, ListQuery, Resource, Severity};
use dioxus::prelude::*;
use serde::Deserialize;
use serde_json::{json, Value};
use store::{field, Record};

use crate::busy::{use_busy, BusyGuard};
use crate::format;
use crate::icons::{FaCar, FaDollarSign, FaRotate, FaRoute, FaUsers};
use crate::services::use_services;
use crate::Icon;

const RECENT_LIMIT: usize = 5;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehicleCounts {
    pub total: u64,
    pub active: u64,
    pub maintenance: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriverCounts {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripCounts {
    pub total: u64,
    pub recent_30_days: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Totals {
    pub recent_maintenance_cost: f64,
}

/// Payload of `/analytics/dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub vehicles: VehicleCounts,
    pub drivers: DriverCounts,
    pub trips: TripCounts,
    pub totals: Totals,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub stats: Option<DashboardStats>,
    /// `(vehicle label, trip count)`
    pub trips_per_vehicle: Vec<(String, u64)>,
    pub recent_trips: Vec<Record>,
    pub recent_maintenance: Vec<Record>,
}

impl DashboardData {
    /// Combine one batch of results.
    ///
    /// Any missing response or transport failure fails the whole batch.
    /// Individual reports the server refused are left empty.
    pub fn from_batch(
        stats: Option<ApiResult>,
        per_vehicle: Option<ApiResult>,
        trips: Option<ApiResult>,
        maintenance: Option<ApiResult>,
    ) -> Result<Self, String> {
        let batch = [stats, per_vehicle, trips, maintenance];
        if let Some(failure) = batch
            .iter()
            .flatten()
            .find(|result| result.is_transport_failure())
        {
            return Err(failure.message_or("Error loading dashboard data"));
        }
        let [Some(stats), Some(per_vehicle), Some(trips), Some(maintenance)] = batch else {
            return Err("Error loading dashboard data".to_string());
        };

        let stats = stats
            .success
            .then(|| stats.payload().cloned())
            .flatten()
            .and_then(|payload| match serde_json::from_value(payload) {
                Ok(stats) => Some(stats),
                Err(e) => {
                    tracing::warn!("Unreadable dashboard stats: {}", e);
                    None
                }
            });

        let trips_per_vehicle = if per_vehicle.success {
            labelled_counts(per_vehicle.payload())
        } else {
            Vec::new()
        };

        let recent = |result: &ApiResult| {
            if result.success {
                result.records().into_iter().take(RECENT_LIMIT).collect()
            } else {
                Vec::new()
            }
        };

        Ok(Self {
            stats,
            trips_per_vehicle,
            recent_trips: recent(&trips),
            recent_maintenance: recent(&maintenance),
        })
    }
}

/// Query shared by the recent-activity lists.
fn recent_query() -> ListQuery {
    ListQuery::new().limit(RECENT_LIMIT)
}

/// Zip a `{ labels: [..], values: [..] }` chart payload.
fn labelled_counts(payload: Option<&Value>) -> Vec<(String, u64)> {
    let Some(payload) = payload else {
        return Vec::new();
    };
    let labels = payload["labels"].as_array().cloned().unwrap_or_default();
    let values = payload["values"].as_array().cloned().unwrap_or_default();
    labels
        .iter()
        .zip(values.iter())
        .map(|(label, value)| {
            (
                store::value_to_string(Some(label)),
                value.as_u64().unwrap_or_default(),
            )
        })
        .collect()
}

#[component]
pub fn DashboardView() -> Element {
    let services = use_services();
    let busy = use_busy();
    let mut data = use_signal(DashboardData::default);

    let client = services.client.clone();
    let mut reports = use_resource(move || {
        let client = client.clone();
        async move {
            let recent = recent_query();
            let guard = BusyGuard::begin(busy);
            let (stats, per_vehicle, trips, maintenance) = futures::join!(
                client.analytics(Analytics::Dashboard),
                client.analytics(Analytics::TripsPerVehicle),
                client.list(Resource::Trips, &recent),
                client.list(Resource::Maintenance, &recent),
            );
            drop(guard);
            match DashboardData::from_batch(stats, per_vehicle, trips, maintenance) {
                Ok(loaded) => {
                    data.set(loaded);
                    true
                }
                Err(message) => {
                    client.notifier().notify(Severity::Error, &message);
                    false
                }
            }
        }
    });

    let notifier = services.notifier();
    let on_refresh = move |_| {
        reports.restart();
        notifier.notify(Severity::Success, "Dashboard refreshed");
    };

    let current = data();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                div {
                    h2 { "Dashboard" }
                    p { class: "view-muted", "Fleet overview" }
                }
                button {
                    class: "btn btn-outline-primary",
                    onclick: on_refresh,
                    Icon { icon: FaRotate, width: 14, height: 14 }
                    " Refresh"
                }
            }

            if let Some(stats) = current.stats.clone() {
                div {
                    class: "stats-grid",
                    div {
                        class: "stats-card",
                        div { class: "stats-icon", Icon { icon: FaCar, width: 20, height: 20 } }
                        div { class: "stats-number", "{stats.vehicles.total}" }
                        div { class: "stats-label", "Total Vehicles" }
                        small { "{stats.vehicles.active} Active • {stats.vehicles.maintenance} Maintenance" }
                    }
                    div {
                        class: "stats-card success",
                        div { class: "stats-icon", Icon { icon: FaUsers, width: 20, height: 20 } }
                        div { class: "stats-number", "{stats.drivers.total}" }
                        div { class: "stats-label", "Total Drivers" }
                        small { "{stats.drivers.active} Active • {stats.drivers.inactive} Inactive" }
                    }
                    div {
                        class: "stats-card warning",
                        div { class: "stats-icon", Icon { icon: FaRoute, width: 20, height: 20 } }
                        div { class: "stats-number", "{stats.trips.total}" }
                        div { class: "stats-label", "Total Trips" }
                        small { "{stats.trips.recent_30_days} in last 30 days" }
                    }
                    div {
                        class: "stats-card danger",
                        div { class: "stats-icon", Icon { icon: FaDollarSign, width: 20, height: 20 } }
                        div {
                            class: "stats-number",
                            {format::currency(Some(&json!(stats.totals.recent_maintenance_cost)))}
                        }
                        div { class: "stats-label", "Maintenance Cost" }
                        small { "Last 30 days" }
                    }
                }
            }

            div {
                class: "dashboard-grid",
                div {
                    class: "card",
                    h5 { class: "card-title", "Trips per Vehicle" }
                    if current.trips_per_vehicle.is_empty() {
                        p { class: "view-muted text-center", "No trips recorded" }
                    } else {
                        table {
                            class: "table table-sm",
                            tbody {
                                for (label, count) in current.trips_per_vehicle.iter() {
                                    tr {
                                        td { "{label}" }
                                        td { class: "text-end", "{count}" }
                                    }
                                }
                            }
                        }
                    }
                }
                div {
                    class: "card",
                    h5 { class: "card-title", "Recent Trips" }
                    if current.recent_trips.is_empty() {
                        p { class: "view-muted text-center", "No recent trips" }
                    } else {
                        for trip in current.recent_trips.iter().cloned() {
                            RecentTrip { trip }
                        }
                    }
                }
                div {
                    class: "card",
                    h5 { class: "card-title", "Recent Maintenance" }
                    if current.recent_maintenance.is_empty() {
                        p { class: "view-muted text-center", "No recent maintenance" }
                    } else {
                        for record in current.recent_maintenance.iter().cloned() {
                            RecentMaintenance { record }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecentTrip(trip: Record) -> Element {
    let route = format!(
        "{} → {}",
        store::value_to_string(field(&trip, "source")),
        store::value_to_string(field(&trip, "destination"))
    );
    let vehicle = format::nested(field(&trip, "vehicle"), "reg_no");
    let driver = format::nested(field(&trip, "driver"), "name");
    let when = format::date(field(&trip, "trip_date"));
    let status = store::value_to_string(field(&trip, "status"));

    rsx! {
        div {
            class: "activity-item",
            div {
                h6 { "{route}" }
                p { class: "view-muted small", "{vehicle} · {driver}" }
                small { class: "view-muted", "{when}" }
            }
            span {
                class: format!("badge {}", format::status_badge_class(&status)),
                {format::status_label(&status)}
            }
        }
    }
}

#[component]
fn RecentMaintenance(record: Record) -> Element {
    let description = store::value_to_string(field(&record, "description"));
    let vehicle = format::nested(field(&record, "vehicle"), "reg_no");
    let when = format::date(field(&record, "date"));
    let cost = format::currency(field(&record, "cost"));
    let kind = store::value_to_string(field(&record, "maintenance_type"));

    rsx! {
        div {
            class: "activity-item",
            div {
                h6 { "{description}" }
                p { class: "view-muted small", "{vehicle}" }
                small { class: "view-muted", "{when}" }
            }
            div {
                class: "text-end",
                span {
                    class: format!("badge {}", format::status_badge_class(&kind)),
                    {format::status_label(&kind)}
                }
                br {}
                small { class: "view-muted", "{cost}" }
            }
        }
    }
}
