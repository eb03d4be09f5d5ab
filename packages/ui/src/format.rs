//! Display formatters for record fields.
//!
//! Every formatter takes the raw field (`None` when the path is missing) and
//! never fails: absent or unparseable input yields a fixed placeholder.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use store::value_to_string;

const NOT_AVAILABLE: &str = "N/A";

fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        other => other,
    }
}

fn as_number(value: Option<&Value>) -> Option<f64> {
    match present(value)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%a, %d %b %Y %H:%M:%S GMT"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `MM/DD/YYYY`, or `N/A` when absent.
pub fn date(value: Option<&Value>) -> String {
    let Some(value) = present(value) else {
        return NOT_AVAILABLE.to_string();
    };
    let raw = value_to_string(Some(value));
    match parse_timestamp(&raw) {
        Some(dt) => dt.format("%m/%d/%Y").to_string(),
        None => raw,
    }
}

/// `MM/DD/YYYY, HH:MM:SS AM`, or `N/A` when absent.
pub fn date_time(value: Option<&Value>) -> String {
    let Some(value) = present(value) else {
        return NOT_AVAILABLE.to_string();
    };
    let raw = value_to_string(Some(value));
    match parse_timestamp(&raw) {
        Some(dt) => dt.format("%m/%d/%Y, %I:%M:%S %p").to_string(),
        None => raw,
    }
}

/// US dollars with thousands separators. Absent amounts are `$0.00`.
pub fn currency(value: Option<&Value>) -> String {
    let amount = as_number(value).unwrap_or(0.0);
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

/// Fixed-point number; absent values are `0`.
pub fn number(value: Option<&Value>, decimals: usize) -> String {
    match as_number(value) {
        Some(n) => format!("{n:.decimals$}"),
        None => "0".to_string(),
    }
}

/// Upper-case the first character.
pub fn capitalize(value: Option<&Value>) -> String {
    let raw = value_to_string(value);
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Badge colour class for a status-like value.
pub fn status_badge_class(status: &str) -> &'static str {
    match status {
        "active" | "completed" => "bg-success",
        "inactive" => "bg-secondary",
        "maintenance" | "repair" => "bg-warning",
        "planned" | "scheduled" => "bg-primary",
        "in_progress" | "routine" => "bg-info",
        "cancelled" | "emergency" => "bg-danger",
        _ => "bg-secondary",
    }
}

/// `in_progress` → `IN PROGRESS`.
pub fn status_label(status: &str) -> String {
    status.replacen('_', " ", 1).to_uppercase()
}

/// A display field of an embedded object (`trip.vehicle.reg_no`), or `N/A`.
pub fn nested(value: Option<&Value>, key: &str) -> String {
    match present(value).and_then(|v| present(v.get(key))) {
        Some(inner) => value_to_string(Some(inner)),
        None => NOT_AVAILABLE.to_string(),
    }
}
