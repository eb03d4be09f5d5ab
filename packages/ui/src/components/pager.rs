use dioxus::prelude::*;

use crate::table::{PageItem, PaginationState};

/// Page strip. Renders nothing when there is at most one page.
#[component]
pub fn Pager(state: PaginationState, on_page: EventHandler<usize>) -> Element {
    let items = state.items();
    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        nav {
            ul {
                class: "pagination",
                for (index, item) in items.into_iter().enumerate() {
                    li {
                        key: "{index}",
                        class: match item {
                            PageItem::Previous { disabled: true, .. }
                            | PageItem::Next { disabled: true, .. }
                            | PageItem::Ellipsis => "page-item disabled",
                            PageItem::Page { active: true, .. } => "page-item active",
                            _ => "page-item",
                        },
                        match item {
                            PageItem::Ellipsis => rsx! { span { class: "page-link", "..." } },
                            _ => rsx! {
                                button {
                                    class: "page-link",
                                    disabled: item.target().is_none(),
                                    onclick: move |_| {
                                        if let Some(page) = item.target() {
                                            on_page.call(page);
                                        }
                                    },
                                    {item_label(item)}
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}

fn item_label(item: PageItem) -> String {
    match item {
        PageItem::Previous { .. } => "Previous".to_string(),
        PageItem::Next { .. } => "Next".to_string(),
        PageItem::Page { number, .. } => number.to_string(),
        PageItem::Ellipsis => "...".to_string(),
    }
}
