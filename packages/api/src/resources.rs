//! Typed endpoints on top of [`ApiClient::request`].
//!
//! Every method returns the same `Option<ApiResult>` as the raw client, so the
//! 401 sentinel flows through unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::json;
use store::{KeyValueStore, RecordId};

use crate::client::ApiClient;
use crate::result::ApiResult;
use crate::transport::Transport;

/// Backend collections with CRUD endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Vehicles,
    Drivers,
    Trips,
    Maintenance,
    Users,
}

impl Resource {
    /// Path segment under the base path.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Vehicles => "vehicles",
            Resource::Drivers => "drivers",
            Resource::Trips => "trips",
            Resource::Maintenance => "maintenance",
            Resource::Users => "users",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Resource::Vehicles => "Vehicles",
            Resource::Drivers => "Drivers",
            Resource::Trips => "Trips",
            Resource::Maintenance => "Maintenance",
            Resource::Users => "Users",
        }
    }

    /// Name of one record, for form titles and messages.
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Vehicles => "Vehicle",
            Resource::Drivers => "Driver",
            Resource::Trips => "Trip",
            Resource::Maintenance => "Maintenance Record",
            Resource::Users => "User",
        }
    }

    /// Users are provisioned elsewhere; the back office cannot create them.
    pub fn supports_create(&self) -> bool {
        !matches!(self, Resource::Users)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Query-string filters for list endpoints.
///
/// Keys are kept sorted so the same filters always produce the same URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn limit(self, limit: usize) -> Self {
        self.with("limit", limit)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `?a=1&b=x` form, or an empty string without filters.
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("?{encoded}")
    }
}

/// Reporting endpoints under `/analytics`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Analytics {
    Dashboard,
    FuelConsumption { days: u32 },
    TripsPerVehicle,
    TripsPerDriver,
    MaintenanceCosts { months: u32 },
    VehicleUtilization { days: u32 },
    FuelEfficiency,
}

impl Analytics {
    pub const DEFAULT_DAYS: u32 = 30;
    pub const DEFAULT_MONTHS: u32 = 12;

    pub fn fuel_consumption() -> Self {
        Analytics::FuelConsumption {
            days: Self::DEFAULT_DAYS,
        }
    }

    pub fn maintenance_costs() -> Self {
        Analytics::MaintenanceCosts {
            months: Self::DEFAULT_MONTHS,
        }
    }

    pub fn vehicle_utilization() -> Self {
        Analytics::VehicleUtilization {
            days: Self::DEFAULT_DAYS,
        }
    }

    pub fn endpoint(&self) -> String {
        match self {
            Analytics::Dashboard => "/analytics/dashboard".to_string(),
            Analytics::FuelConsumption { days } => {
                format!("/analytics/fuel-consumption?days={days}")
            }
            Analytics::TripsPerVehicle => "/analytics/trips-per-vehicle".to_string(),
            Analytics::TripsPerDriver => "/analytics/trips-per-driver".to_string(),
            Analytics::MaintenanceCosts { months } => {
                format!("/analytics/maintenance-costs?months={months}")
            }
            Analytics::VehicleUtilization { days } => {
                format!("/analytics/vehicle-utilization?days={days}")
            }
            Analytics::FuelEfficiency => "/analytics/fuel-efficiency".to_string(),
        }
    }
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn list(&self, resource: Resource, query: &ListQuery) -> Option<ApiResult> {
        self.get(&format!("/{}{}", resource.path(), query.to_query_string()))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        body: &B,
    ) -> Option<ApiResult> {
        if !resource.supports_create() {
            tracing::warn!("{} cannot be created from the client", resource);
            return Some(ApiResult::failed(format!(
                "{} cannot be created",
                resource.title()
            )));
        }
        self.post(&format!("/{}", resource.path()), body).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        id: RecordId,
        body: &B,
    ) -> Option<ApiResult> {
        self.put(&format!("/{}/{id}", resource.path()), body).await
    }

    pub async fn remove(&self, resource: Resource, id: RecordId) -> Option<ApiResult> {
        self.delete(&format!("/{}/{id}", resource.path())).await
    }

    /// `POST /{resource}/{id}/{action}` with an empty object, used for row
    /// actions such as starting a trip.
    pub async fn action(&self, resource: Resource, id: RecordId, action: &str) -> Option<ApiResult> {
        self.post(&format!("/{}/{id}/{action}", resource.path()), &json!({}))
            .await
    }

    pub async fn analytics(&self, report: Analytics) -> Option<ApiResult> {
        self.get(&report.endpoint()).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Option<ApiResult> {
        self.post(
            "/auth/change-password",
            &json!({ "current_password": current, "new_password": new }),
        )
        .await
    }
}
