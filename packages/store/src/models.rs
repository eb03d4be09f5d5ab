//! # Shared models
//!
//! Records coming back from the REST backend are heterogeneous JSON objects and
//! stay untyped ([`Record`] is a `serde_json::Value`). The helpers here give the
//! table, filter and export code a uniform way to read them:
//!
//! - [`field`] resolves a dotted path (`"vehicle.reg_no"`) inside a record.
//! - [`record_id`] extracts the numeric `id` used to address row actions.
//! - [`value_to_string`] is the plain-text rendering of a field value.
//!
//! [`UserProfile`] and [`Role`] are the only typed models: they are owned by the
//! session and read by role predicates.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One domain entity (vehicle, driver, trip, maintenance entry, user).
pub type Record = Value;

/// Identifier handed to row action handlers.
pub type RecordId = i64;

/// Resolve a dotted field path inside a record.
///
/// Returns `None` when any segment is missing or an intermediate value is not
/// an object.
pub fn field<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |value, segment| value.as_object()?.get(segment))
}

/// The record's numeric `id`, if it has one.
pub fn record_id(record: &Record) -> Option<RecordId> {
    match record.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Plain-text rendering of a field value. Missing and `null` render as `""`.
pub fn value_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Role carried by a user profile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    Driver,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Driver => "driver",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "driver" => Role::Driver,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of the logged-in user as returned by `/auth/login` and `/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_paths() {
        let trip = json!({
            "id": 4,
            "source": "Depot",
            "vehicle": { "reg_no": "KA-01", "model": "Actros" },
            "driver": null,
        });

        assert_eq!(field(&trip, "source"), Some(&json!("Depot")));
        assert_eq!(field(&trip, "vehicle.reg_no"), Some(&json!("KA-01")));
        assert_eq!(field(&trip, "driver"), Some(&Value::Null));
        assert!(field(&trip, "driver.name").is_none());
        assert!(field(&trip, "missing").is_none());
        assert!(field(&trip, "source.length").is_none());
    }

    #[test]
    fn test_record_id() {
        assert_eq!(record_id(&json!({ "id": 7 })), Some(7));
        assert_eq!(record_id(&json!({ "id": "12" })), Some(12));
        assert_eq!(record_id(&json!({ "id": null })), None);
        assert_eq!(record_id(&json!({ "name": "x" })), None);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(None), "");
        assert_eq!(value_to_string(Some(&Value::Null)), "");
        assert_eq!(value_to_string(Some(&json!("abc"))), "abc");
        assert_eq!(value_to_string(Some(&json!(12.5))), "12.5");
        assert_eq!(value_to_string(Some(&json!(true))), "true");
        assert_eq!(value_to_string(Some(&json!({ "a": 1 }))), r#"{"a":1}"#);
    }

    #[test]
    fn test_role_serde() {
        let user: UserProfile =
            serde_json::from_value(json!({ "id": 1, "role": "admin" })).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.username, "");

        let user: UserProfile = serde_json::from_value(
            json!({ "id": 2, "username": "ops", "role": "dispatcher" }),
        )
        .unwrap();
        assert_eq!(user.role, Role::Other("dispatcher".to_string()));

        let encoded = serde_json::to_value(&user).unwrap();
        assert_eq!(encoded["role"], json!("dispatcher"));
    }
}
