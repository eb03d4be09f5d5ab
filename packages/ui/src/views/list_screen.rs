//! Generic list screen shared by every resource.
//!
//! The full collection is loaded once and cached. Filtering, search and
//! pagination run client-side over the cache; mutations reload it.

use std::collections::BTreeSet;

use api::{ApiResult, ListQuery, Resource, Severity};
use dioxus::prelude::*;
use store::{field, record_id, value_to_string, Record, RecordId};

use crate::busy::{use_busy, BusyGuard};
use crate::components::{DataTable, FilterBar, Pager, SelectFilter};
use crate::icons::{FaFileCsv, FaPlus, FaPrint};
use crate::services::use_services;
use crate::table::{self, Action, Column, ExportError, FilterSet, PaginationState, TableView};
use crate::views::{FormField, ModalOverlay, RecordForm};
use crate::{platform, Icon};

/// Everything that differs between list screens.
#[derive(Clone, PartialEq)]
pub struct ListSpec {
    pub resource: Resource,
    pub subtitle: String,
    pub columns: Vec<Column>,
    pub actions: Vec<Action>,
    pub selects: Vec<SelectFilter>,
    pub search_fields: Vec<String>,
    pub search_placeholder: String,
    pub fields: Vec<FormField>,
    pub allow_create: bool,
    /// Field naming a record in the delete prompt, e.g. `reg_no`.
    pub label_field: String,
}

impl ListSpec {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            subtitle: String::new(),
            columns: Vec::new(),
            actions: Vec::new(),
            selects: Vec::new(),
            search_fields: Vec::new(),
            search_placeholder: "Search...".to_string(),
            fields: Vec::new(),
            allow_create: resource.supports_create(),
            label_field: "id".to_string(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn select(mut self, select: SelectFilter) -> Self {
        self.selects.push(select);
        self
    }

    pub fn search<F: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = F>,
        placeholder: impl Into<String>,
    ) -> Self {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn allow_create(mut self, allow: bool) -> Self {
        self.allow_create = allow && self.resource.supports_create();
        self
    }

    pub fn label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = field.into();
        self
    }

    /// Confirmation text before deleting `record`.
    pub fn delete_prompt(&self, record: Option<&Record>) -> String {
        let noun = self.resource.singular().to_lowercase();
        let label = record
            .map(|record| value_to_string(field(record, &self.label_field)))
            .unwrap_or_default();
        if label.is_empty() {
            format!("Are you sure you want to delete this {noun}?")
        } else {
            format!("Are you sure you want to delete {noun} {label}?")
        }
    }
}

/// One rendered page of a filtered collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPage {
    pub filtered: Vec<Record>,
    pub pagination: PaginationState,
    pub view: TableView,
}

impl ListPage {
    pub fn build(
        records: &[Record],
        filters: &FilterSet,
        page: usize,
        page_size: usize,
        columns: &[Column],
        actions: &[Action],
    ) -> Self {
        let filtered = filters.apply(records);
        let pagination = PaginationState::for_items(page, filtered.len(), page_size);
        let range = pagination.page_range(filtered.len(), page_size);
        let view = TableView::build(&filtered[range], columns, actions);
        Self {
            filtered,
            pagination,
            view,
        }
    }
}

fn find_record(records: &[Record], id: RecordId) -> Option<Record> {
    records
        .iter()
        .find(|record| record_id(record) == Some(id))
        .cloned()
}

/// Fold a list response into the cache.
///
/// Only a successful response replaces the cache. A refusal or transport
/// failure leaves it as it was and yields the message to show. `None` (the
/// session expired) is already reported by the client.
fn merge_listing(
    cache: &mut Vec<Record>,
    result: Option<ApiResult>,
    resource: Resource,
) -> Option<String> {
    let result = result?;
    if result.success {
        *cache = result.records();
        tracing::debug!("Loaded {} {}", cache.len(), resource);
        return None;
    }
    Some(result.message_or(&format!("Error loading {}", resource.title().to_lowercase())))
}

/// Rows with a request in flight. A row accepts one action at a time.
#[derive(Clone, Debug, Default, PartialEq)]
struct PendingRows(BTreeSet<RecordId>);

impl PendingRows {
    /// Claim `id`; `false` if it is already busy.
    fn begin(&mut self, id: RecordId) -> bool {
        self.0.insert(id)
    }

    fn finish(&mut self, id: RecordId) {
        self.0.remove(&id);
    }
}

fn form_title(resource: Resource, editing: bool) -> String {
    let verb = if editing { "Edit" } else { "Add" };
    format!("{verb} {}", resource.singular())
}

/// Which record the form modal is editing. `Some(None)` is a new record.
type Editing = Option<Option<Record>>;

#[component]
pub fn ResourceList(spec: ListSpec) -> Element {
    let services = use_services();
    let busy = use_busy();
    let resource = spec.resource;
    let page_size = services.config.table.page_size;
    let debounce_ms = services.config.table.search_debounce_ms;

    let mut records = use_signal(Vec::<Record>::new);
    let search_fields = spec.search_fields.clone();
    let mut filters = use_signal(move || FilterSet::new(search_fields));
    let mut page = use_signal(|| 1usize);
    let mut editing = use_signal(|| Editing::None);
    let mut pending = use_signal(PendingRows::default);

    let load_client = services.client.clone();
    let mut listing = use_resource(move || {
        let client = load_client.clone();
        async move {
            let guard = BusyGuard::begin(busy);
            let result = client.list(resource, &ListQuery::new()).await;
            drop(guard);
            let mut cache = records.peek().clone();
            match merge_listing(&mut cache, result, resource) {
                None => records.set(cache),
                Some(message) => client.notifier().notify(Severity::Error, &message),
            }
        }
    });

    let current = ListPage::build(
        &records.read(),
        &filters.read(),
        page(),
        page_size,
        &spec.columns,
        &spec.actions,
    );

    let action_spec = spec.clone();
    let action_services = services.clone();
    let on_action = move |(key, id): (String, RecordId)| {
        let services = action_services.clone();
        let spec = action_spec.clone();
        let record = find_record(&records.read(), id);
        match key.as_str() {
            "edit" => editing.set(Some(record)),
            "delete" => {
                if pending.peek().0.contains(&id) {
                    return;
                }
                if !platform::confirm(&spec.delete_prompt(record.as_ref())) {
                    return;
                }
                if !pending.write().begin(id) {
                    return;
                }
                spawn(async move {
                    let notifier = services.notifier();
                    let noun = resource.singular();
                    let guard = BusyGuard::begin(busy);
                    let result = services.client.remove(resource, id).await;
                    drop(guard);
                    pending.write().finish(id);
                    match result {
                        None => {}
                        Some(result) if result.success => {
                            notifier.notify(Severity::Success, &format!("{noun} deleted successfully"));
                            listing.restart();
                        }
                        Some(result) => notifier.notify(
                            Severity::Error,
                            &result.message_or(&format!("Error deleting {}", noun.to_lowercase())),
                        ),
                    }
                });
            }
            other => {
                let other = other.to_string();
                if !pending.write().begin(id) {
                    tracing::debug!("Ignoring {} on {} {}: request in flight", other, resource, id);
                    return;
                }
                spawn(async move {
                    let notifier = services.notifier();
                    let guard = BusyGuard::begin(busy);
                    let result = services.client.action(resource, id, &other).await;
                    drop(guard);
                    pending.write().finish(id);
                    match result {
                        None => {}
                        Some(result) if result.success => {
                            notifier.notify(
                                Severity::Success,
                                &result.message_or(&format!("{} updated successfully", resource.singular())),
                            );
                            listing.restart();
                        }
                        Some(result) => notifier.notify(
                            Severity::Error,
                            &result.message_or(&format!("Error updating {}", resource.singular().to_lowercase())),
                        ),
                    }
                });
            }
        }
    };

    let export_records = current.filtered.clone();
    let export_services = services.clone();
    let on_export = move |_| {
        let filename = format!("{}.csv", resource.path());
        match table::download_csv(&export_records, &filename) {
            Ok(()) => {}
            Err(ExportError::Empty) => export_services
                .notifier()
                .notify(Severity::Warning, &ExportError::Empty.to_string()),
            Err(e) => export_services
                .notifier()
                .notify(Severity::Error, &e.to_string()),
        }
    };

    let print_view = current.view.clone();
    let print_services = services.clone();
    let on_print = move |_| {
        if let Err(e) = table::print_table(Some(&print_view)) {
            print_services.notifier().notify(Severity::Error, &e.to_string());
        }
    };

    let form_fields = spec.fields.clone();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                div {
                    h2 { "{resource.title()}" }
                    if !spec.subtitle.is_empty() {
                        p { class: "view-muted", "{spec.subtitle}" }
                    }
                }
                div {
                    class: "view-toolbar",
                    button {
                        class: "btn btn-outline-secondary",
                        title: "Export CSV",
                        onclick: on_export,
                        Icon { icon: FaFileCsv, width: 14, height: 14 }
                        " Export"
                    }
                    button {
                        class: "btn btn-outline-secondary",
                        title: "Print",
                        onclick: on_print,
                        Icon { icon: FaPrint, width: 14, height: 14 }
                        " Print"
                    }
                    if spec.allow_create {
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| editing.set(Some(None)),
                            Icon { icon: FaPlus, width: 14, height: 14 }
                            " Add {resource.singular()}"
                        }
                    }
                }
            }

            FilterBar {
                selects: spec.selects.clone(),
                search_placeholder: spec.search_placeholder.clone(),
                debounce_ms: debounce_ms,
                on_select: move |(field, value): (String, String)| {
                    filters.write().set_exact(field, value);
                    page.set(1);
                },
                on_search: move |term: String| {
                    filters.write().set_search(term);
                    page.set(1);
                },
            }

            div {
                class: "card",
                DataTable { view: current.view.clone(), on_action: on_action }
                Pager {
                    state: current.pagination,
                    on_page: move |target: usize| page.set(target),
                }
            }

            if let Some(record) = editing() {
                ModalOverlay {
                    title: form_title(resource, record.is_some()),
                    on_close: move |_| editing.set(None),
                    RecordForm {
                        resource: resource,
                        fields: form_fields.clone(),
                        record: record.clone(),
                        on_close: move |_| editing.set(None),
                        on_saved: move |_| {
                            editing.set(None);
                            listing.restart();
                        },
                    }
                }
            }
        }
    }
}
