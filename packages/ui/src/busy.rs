//! Global loading indicator.
//!
//! Callers hold a [`BusyGuard`] for the duration of a request; the spinner is
//! shown while any guard is alive.

use dioxus::prelude::*;

use crate::icons::FaSpinner;
use crate::Icon;

/// Number of outstanding operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Busy(pub usize);

impl Busy {
    pub fn is_busy(&self) -> bool {
        self.0 > 0
    }
}

pub fn use_busy() -> Signal<Busy> {
    use_context::<Signal<Busy>>()
}

/// Marks one operation in flight until dropped.
pub struct BusyGuard {
    busy: Signal<Busy>,
}

impl BusyGuard {
    pub fn begin(mut busy: Signal<Busy>) -> Self {
        busy.write().0 += 1;
        Self { busy }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut busy = self.busy.write();
        busy.0 = busy.0.saturating_sub(1);
    }
}

#[component]
pub fn LoadingSpinner() -> Element {
    let busy = use_busy();

    if !busy().is_busy() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "loading-overlay",
            div {
                class: "loading-spinner",
                Icon { icon: FaSpinner, width: 32, height: 32 }
                span { class: "sr-only", "Loading..." }
            }
        }
    }
}
