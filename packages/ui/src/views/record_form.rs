//! Create/edit form driven by a field list.
//!
//! Values are held as strings while editing. On submit, [`form_payload`]
//! turns blanks into `null` and parses numeric inputs; the submit button stays
//! disabled until the request settles.

use std::collections::BTreeMap;

use api::{ListQuery, Resource, Severity};
use dioxus::prelude::*;
use serde_json::{Map, Number, Value};
use store::{field, record_id, value_to_string, Record};

use crate::busy::{use_busy, BusyGuard};
use crate::services::use_services;

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    DateTime,
    TextArea,
    /// Checkbox, submitted as a JSON boolean.
    Boolean,
    /// Fixed `(value, label)` choices.
    Select(Vec<(String, String)>),
    /// Id of a record from another collection, picked by `label_field`.
    Lookup {
        resource: Resource,
        label_field: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            default: String::new(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn select<V: Into<String>, L: Into<String>>(
        name: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = (V, L)>,
    ) -> Self {
        let options = options
            .into_iter()
            .map(|(value, label)| (value.into(), label.into()))
            .collect();
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn lookup(
        name: impl Into<String>,
        label: impl Into<String>,
        resource: Resource,
        label_field: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Lookup {
                resource,
                label_field: label_field.into(),
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = value.into();
        self
    }
}

/// Starting values: the record's fields when editing, defaults otherwise.
pub fn initial_values(fields: &[FormField], record: Option<&Record>) -> BTreeMap<String, String> {
    fields
        .iter()
        .map(|f| {
            let value = match record {
                Some(record) => {
                    let raw = value_to_string(field(record, &f.name));
                    match f.kind {
                        FieldKind::Date => raw.chars().take(10).collect(),
                        FieldKind::DateTime => raw.chars().take(16).collect(),
                        _ => raw,
                    }
                }
                None => f.default.clone(),
            };
            (f.name.clone(), value)
        })
        .collect()
}

/// Request body for the current values. Errors name the offending field.
pub fn form_payload(
    fields: &[FormField],
    values: &BTreeMap<String, String>,
) -> Result<Map<String, Value>, String> {
    let mut payload = Map::new();
    for f in fields {
        let raw = values.get(&f.name).map(|v| v.trim()).unwrap_or_default();
        let value = if f.kind == FieldKind::Boolean {
            Value::Bool(raw == "true")
        } else if raw.is_empty() {
            if f.required {
                return Err(format!("{} is required", f.label));
            }
            Value::Null
        } else {
            match f.kind {
                FieldKind::Number => parse_number(raw)
                    .ok_or_else(|| format!("{} must be a number", f.label))?,
                FieldKind::Lookup { .. } => raw
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| format!("{} is not a valid selection", f.label))?,
                _ => Value::String(raw.to_string()),
            }
        };
        payload.insert(f.name.clone(), value);
    }
    Ok(payload)
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Value::from(n));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// `(id, label)` choices for a lookup field.
pub fn lookup_options(records: &[Record], label_field: &str) -> Vec<(String, String)> {
    records
        .iter()
        .filter_map(|record| {
            let id = record_id(record)?;
            Some((id.to_string(), value_to_string(field(record, label_field))))
        })
        .collect()
}

#[component]
pub fn RecordForm(
    resource: Resource,
    fields: Vec<FormField>,
    record: Option<Record>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let services = use_services();
    let busy = use_busy();
    let editing_id = record.as_ref().and_then(record_id);
    let mut values = use_signal(|| initial_values(&fields, record.as_ref()));
    let mut submitting = use_signal(|| false);
    let mut lookups = use_signal(BTreeMap::<String, Vec<(String, String)>>::new);

    let lookup_fields = fields.clone();
    let lookup_client = services.client.clone();
    let _ = use_resource(move || {
        let fields = lookup_fields.clone();
        let client = lookup_client.clone();
        async move {
            for f in fields {
                let FieldKind::Lookup { resource, label_field } = &f.kind else {
                    continue;
                };
                match client.list(*resource, &ListQuery::new()).await {
                    Some(result) if result.success => {
                        let options = lookup_options(&result.records(), label_field);
                        lookups.write().insert(f.name.clone(), options);
                    }
                    Some(result) => tracing::warn!(
                        "Could not load {} choices: {}",
                        resource,
                        result.message_or("unknown error")
                    ),
                    None => return,
                }
            }
        }
    });

    let submit_fields = fields.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        let fields = submit_fields.clone();
        async move {
            if submitting() {
                return;
            }
            let notifier = services.notifier();
            let payload = match form_payload(&fields, &values.read()) {
                Ok(payload) => payload,
                Err(message) => {
                    notifier.notify(Severity::Error, &message);
                    return;
                }
            };

            submitting.set(true);
            let guard = BusyGuard::begin(busy);
            let result = match editing_id {
                Some(id) => services.client.update(resource, id, &payload).await,
                None => services.client.create(resource, &payload).await,
            };
            drop(guard);
            submitting.set(false);

            match result {
                None => on_close.call(()),
                Some(result) if result.success => {
                    let verb = if editing_id.is_some() { "updated" } else { "created" };
                    notifier.notify(
                        Severity::Success,
                        &format!("{} {verb} successfully", resource.singular()),
                    );
                    on_saved.call(());
                }
                Some(result) => notifier.notify(
                    Severity::Error,
                    &result.message_or(&format!(
                        "Error saving {}",
                        resource.singular().to_lowercase()
                    )),
                ),
            }
        }
    };

    rsx! {
        form {
            onsubmit: onsubmit,
            div {
                class: "modal-body",
                for f in fields.iter().cloned() {
                    FieldInput {
                        key: "{f.name}",
                        value: values.read().get(&f.name).cloned().unwrap_or_default(),
                        choices: lookups.read().get(&f.name).cloned().unwrap_or_default(),
                        on_change: {
                            let name = f.name.clone();
                            move |value: String| {
                                values.write().insert(name.clone(), value);
                            }
                        },
                        field: f.clone(),
                    }
                }
            }
            div {
                class: "modal-footer",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Saving..." } else { "Save {resource.singular()}" }
                }
            }
        }
    }
}

#[component]
fn FieldInput(
    field: FormField,
    value: String,
    choices: Vec<(String, String)>,
    on_change: EventHandler<String>,
) -> Element {
    let id = format!("field-{}", field.name);
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };
    let input_type = match field.kind {
        FieldKind::Email => "email",
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        FieldKind::DateTime => "datetime-local",
        _ => "text",
    };

    rsx! {
        div {
            class: "form-group",
            label { class: "form-label", r#for: "{id}", "{label}" }
            match &field.kind {
                FieldKind::Select(options) => rsx! {
                    select {
                        id: "{id}",
                        class: "form-select",
                        required: field.required,
                        value: "{value}",
                        onchange: move |evt: FormEvent| on_change.call(evt.value()),
                        if !field.required || value.is_empty() {
                            option { value: "", "Select {field.label}" }
                        }
                        for (option_value, option_label) in options.iter() {
                            option {
                                value: "{option_value}",
                                selected: *option_value == value,
                                "{option_label}"
                            }
                        }
                    }
                },
                FieldKind::Lookup { .. } => rsx! {
                    select {
                        id: "{id}",
                        class: "form-select",
                        required: field.required,
                        onchange: move |evt: FormEvent| on_change.call(evt.value()),
                        option { value: "", "Select {field.label}" }
                        for (option_value, option_label) in choices.iter() {
                            option {
                                value: "{option_value}",
                                selected: *option_value == value,
                                "{option_label}"
                            }
                        }
                    }
                },
                FieldKind::Boolean => rsx! {
                    input {
                        id: "{id}",
                        class: "form-check-input",
                        r#type: "checkbox",
                        checked: value == "true",
                        onchange: move |evt: FormEvent| on_change.call(evt.checked().to_string()),
                    }
                },
                FieldKind::TextArea => rsx! {
                    textarea {
                        id: "{id}",
                        class: "form-control",
                        required: field.required,
                        value: "{value}",
                        oninput: move |evt: FormEvent| on_change.call(evt.value()),
                    }
                },
                _ => rsx! {
                    input {
                        id: "{id}",
                        class: "form-control",
                        r#type: input_type,
                        required: field.required,
                        step: if field.kind == FieldKind::Number { "any" } else { "" },
                        value: "{value}",
                        oninput: move |evt: FormEvent| on_change.call(evt.value()),
                    }
                },
            }
        }
    }
}
