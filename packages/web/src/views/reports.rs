use dioxus::prelude::*;
use ui::views::ReportsView;

#[component]
pub fn Reports() -> Element {
    rsx! { ReportsView {} }
}
