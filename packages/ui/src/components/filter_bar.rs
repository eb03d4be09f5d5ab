use std::time::Duration;

use dioxus::prelude::*;

use crate::icons::FaMagnifyingGlass;
use crate::{platform, Icon};

/// A dropdown narrowing one field to an exact value.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectFilter {
    pub field: String,
    pub label: String,
    /// Label of the empty "no filter" option.
    pub all_label: String,
    /// `(value, label)` pairs.
    pub options: Vec<(String, String)>,
}

impl SelectFilter {
    pub fn new(field: impl Into<String>, label: impl Into<String>, all_label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            all_label: all_label.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((value.into(), label.into()));
        self
    }
}

/// Dropdown filters plus a debounced search box.
///
/// Selections are reported as `(field, value)` at once, with `""` meaning
/// "all". Search text is reported after `debounce_ms` of quiet.
#[component]
pub fn FilterBar(
    selects: Vec<SelectFilter>,
    #[props(default = "Search...".to_string())] search_placeholder: String,
    #[props(default = 300)] debounce_ms: u32,
    on_select: EventHandler<(String, String)>,
    on_search: EventHandler<String>,
) -> Element {
    let mut generation = use_signal(|| 0u64);

    let oninput = move |evt: FormEvent| {
        let text = evt.value();
        let ticket = generation() + 1;
        generation.set(ticket);
        spawn(async move {
            platform::sleep(Duration::from_millis(u64::from(debounce_ms))).await;
            if generation() == ticket {
                on_search.call(text);
            }
        });
    };

    rsx! {
        div {
            class: "card filter-bar",
            div {
                class: "filter-row",
                for select in selects {
                    div {
                        key: "{select.field}",
                        class: "filter-cell",
                        label { class: "form-label", r#for: "filter-{select.field}", "{select.label}" }
                        select {
                            id: "filter-{select.field}",
                            class: "form-select",
                            onchange: {
                                let field = select.field.clone();
                                move |evt: FormEvent| on_select.call((field.clone(), evt.value()))
                            },
                            option { value: "", "{select.all_label}" }
                            for (value, label) in select.options.iter() {
                                option { key: "{value}", value: "{value}", "{label}" }
                            }
                        }
                    }
                }
                div {
                    class: "filter-cell",
                    label { class: "form-label", r#for: "filter-search", "Search" }
                    div {
                        class: "search-box",
                        Icon { icon: FaMagnifyingGlass, width: 12, height: 12 }
                        input {
                            id: "filter-search",
                            class: "form-control",
                            r#type: "text",
                            placeholder: "{search_placeholder}",
                            oninput: oninput,
                        }
                    }
                }
            }
        }
    }
}
