//! Column and action descriptors.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use store::{field, value_to_string, Record};

use crate::format;

/// One rendered cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Badge { class: &'static str, label: String },
}

impl Cell {
    /// Status badge for a raw status value.
    pub fn badge(status: &str) -> Self {
        Cell::Badge {
            class: format::status_badge_class(status),
            label: format::status_label(status),
        }
    }

    /// Plain-text form, as shown to the user.
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Badge { label, .. } => label,
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

type Formatter = Rc<dyn Fn(Option<&Value>, &Record) -> Cell>;

/// A table column: a (possibly dotted) field path, a header and an optional
/// formatter receiving the field value and the whole record.
#[derive(Clone)]
pub struct Column {
    pub field: String,
    pub header: String,
    formatter: Option<Formatter>,
}

impl Column {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            formatter: None,
        }
    }

    pub fn with_formatter(
        mut self,
        formatter: impl Fn(Option<&Value>, &Record) -> Cell + 'static,
    ) -> Self {
        self.formatter = Some(Rc::new(formatter));
        self
    }

    /// Text formatter over the field value alone.
    pub fn formatted(self, formatter: impl Fn(Option<&Value>) -> String + 'static) -> Self {
        self.with_formatter(move |value, _| Cell::Text(formatter(value)))
    }

    /// Render the field as a status badge.
    pub fn badge(self) -> Self {
        self.with_formatter(|value, _| Cell::badge(&value_to_string(value)))
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    /// Formatter output, or the raw field value.
    pub fn render(&self, record: &Record) -> Cell {
        let value = field(record, &self.field);
        match &self.formatter {
            Some(formatter) => formatter(value, record),
            None => Cell::Text(value_to_string(value)),
        }
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.header == other.header
            && match (&self.formatter, &other.formatter) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("header", &self.header)
            .field("formatted", &self.formatter.is_some())
            .finish()
    }
}

/// Icon shown on a row action button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionIcon {
    Edit,
    Delete,
    View,
    Start,
    Complete,
}

type Condition = Rc<dyn Fn(&Record) -> bool>;

/// A per-row button. `key` is what the row-action handler receives.
#[derive(Clone)]
pub struct Action {
    pub key: String,
    pub icon: ActionIcon,
    pub class: String,
    pub title: String,
    condition: Option<Condition>,
}

impl Action {
    pub fn new(key: impl Into<String>, icon: ActionIcon, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            icon,
            class: "btn-outline-primary".to_string(),
            title: title.into(),
            condition: None,
        }
    }

    pub fn edit() -> Self {
        Self::new("edit", ActionIcon::Edit, "Edit")
    }

    pub fn delete() -> Self {
        Self::new("delete", ActionIcon::Delete, "Delete").class("btn-outline-danger")
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Only show the button on records where `condition` holds.
    pub fn when(mut self, condition: impl Fn(&Record) -> bool + 'static) -> Self {
        self.condition = Some(Rc::new(condition));
        self
    }

    pub fn applies_to(&self, record: &Record) -> bool {
        self.condition.as_ref().is_none_or(|condition| condition(record))
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.icon == other.icon
            && self.class == other.class
            && self.title == other.title
            && match (&self.condition, &other.condition) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("key", &self.key)
            .field("icon", &self.icon)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_and_formatted_cells() {
        let record = json!({ "reg_no": "KA-01", "fuel_type": "diesel", "vehicle": { "reg_no": "X" } });

        assert_eq!(Column::new("reg_no", "Reg").render(&record), Cell::Text("KA-01".into()));
        assert_eq!(
            Column::new("fuel_type", "Fuel")
                .formatted(format::capitalize)
                .render(&record),
            Cell::Text("Diesel".into())
        );
        assert_eq!(Column::new("vehicle.reg_no", "Vehicle").render(&record), Cell::Text("X".into()));
        assert_eq!(Column::new("missing", "M").render(&record), Cell::Text(String::new()));
    }

    #[test]
    fn test_formatter_sees_whole_record() {
        let column = Column::new("is_active", "Status").with_formatter(|value, record| {
            let status = if value == Some(&json!(true)) { "active" } else { "inactive" };
            Cell::Text(format!("{}:{status}", record["username"].as_str().unwrap_or("")))
        });
        assert_eq!(
            column.render(&json!({ "username": "bob", "is_active": false })).text(),
            "bob:inactive"
        );
    }

    #[test]
    fn test_badge_column() {
        let cell = Column::new("status", "Status").badge().render(&json!({ "status": "in_progress" }));
        assert_eq!(
            cell,
            Cell::Badge {
                class: "bg-info",
                label: "IN PROGRESS".into()
            }
        );
    }

    #[test]
    fn test_action_condition() {
        let record = json!({ "id": 3, "status": "planned" });
        assert!(Action::edit().applies_to(&record));
        let start = Action::new("start", ActionIcon::Start, "Start")
            .when(|r| r["status"] == "planned");
        assert!(start.applies_to(&record));
        assert!(!start.applies_to(&json!({ "id": 3, "status": "completed" })));
    }
}
