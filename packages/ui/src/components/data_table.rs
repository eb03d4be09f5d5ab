use dioxus::prelude::*;
use store::RecordId;

use crate::icons::{FaCircleCheck, FaEye, FaInbox, FaPenToSquare, FaPlay, FaTrashCan};
use crate::table::{ActionIcon, Cell, TableBody, TableView, EMPTY_MESSAGE};
use crate::Icon;

/// Draws a [`TableView`]. Row buttons report `(action key, record id)`.
#[component]
pub fn DataTable(view: TableView, on_action: EventHandler<(String, RecordId)>) -> Element {
    rsx! {
        div {
            class: "table-responsive",
            table {
                class: "table table-hover",
                thead {
                    tr {
                        for header in view.headers.iter() {
                            th { "{header}" }
                        }
                        if view.has_actions {
                            th { "Actions" }
                        }
                    }
                }
                tbody {
                    match &view.body {
                        TableBody::Empty { colspan } => rsx! {
                            tr {
                                td {
                                    colspan: "{colspan}",
                                    class: "table-empty",
                                    Icon { icon: FaInbox, width: 28, height: 28 }
                                    br {}
                                    "{EMPTY_MESSAGE}"
                                }
                            }
                        },
                        TableBody::Rows(rows) => rsx! {
                            for (index, row) in rows.iter().enumerate() {
                                tr {
                                    key: "{index}",
                                    for cell in row.cells.iter() {
                                        td { CellContent { cell: cell.clone() } }
                                    }
                                    if view.has_actions {
                                        td {
                                            class: "table-actions",
                                            for action in row.actions.iter().cloned() {
                                                button {
                                                    class: "btn btn-sm {action.class}",
                                                    title: "{action.title}",
                                                    onclick: move |_| on_action.call((action.key.clone(), action.id)),
                                                    ActionGlyph { icon: action.icon }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn CellContent(cell: Cell) -> Element {
    match cell {
        Cell::Text(text) => rsx! { "{text}" },
        Cell::Badge { class, label } => rsx! {
            span { class: "badge {class}", "{label}" }
        },
    }
}

#[component]
fn ActionGlyph(icon: ActionIcon) -> Element {
    match icon {
        ActionIcon::Edit => rsx! { Icon { icon: FaPenToSquare, width: 14, height: 14 } },
        ActionIcon::Delete => rsx! { Icon { icon: FaTrashCan, width: 14, height: 14 } },
        ActionIcon::View => rsx! { Icon { icon: FaEye, width: 14, height: 14 } },
        ActionIcon::Start => rsx! { Icon { icon: FaPlay, width: 14, height: 14 } },
        ActionIcon::Complete => rsx! { Icon { icon: FaCircleCheck, width: 14, height: 14 } },
    }
}
