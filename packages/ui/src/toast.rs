//! Transient notifications.
//!
//! [`SignalNotifier`] is the [`Notifier`] handed to the API client: it pushes
//! onto the [`ToastQueue`] signal and schedules the toast's removal.
//! [`ToastStack`] draws the queue.

use std::time::Duration;

use api::{Notifier, Severity};
use dioxus::prelude::*;
use store::config::NotificationConfig;

use crate::icons::{FaCircleCheck, FaCircleExclamation, FaCircleInfo, FaTriangleExclamation, FaXmark};
use crate::{platform, Icon};

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, severity: Severity, message: &str) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            severity,
            message: message.to_string(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

/// How long a toast stays up. Errors linger.
pub fn lifetime(severity: Severity, config: &NotificationConfig) -> Duration {
    let ms = match severity {
        Severity::Error => config.error_ms,
        _ => config.default_ms,
    };
    Duration::from_millis(u64::from(ms))
}

pub fn use_toasts() -> Signal<ToastQueue> {
    use_context::<Signal<ToastQueue>>()
}

/// Notifier feeding a [`ToastQueue`] signal.
#[derive(Clone)]
pub struct SignalNotifier {
    toasts: Signal<ToastQueue>,
    config: NotificationConfig,
}

impl SignalNotifier {
    pub fn new(toasts: Signal<ToastQueue>, config: NotificationConfig) -> Self {
        Self { toasts, config }
    }
}

impl Notifier for SignalNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => tracing::warn!("{}", message),
            _ => tracing::info!("{}", message),
        }
        let mut toasts = self.toasts;
        let id = toasts.write().push(severity, message);
        let delay = lifetime(severity, &self.config);
        // Detached from the calling component so the toast outlives it.
        let _ = dioxus::core::spawn_forever(async move {
            platform::sleep(delay).await;
            toasts.write().dismiss(id);
        });
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "text-success",
        Severity::Error => "text-danger",
        Severity::Warning => "text-warning",
        Severity::Info => "text-primary",
    }
}

#[component]
pub fn ToastStack() -> Element {
    let mut toasts = use_toasts();
    let current = toasts().toasts;

    rsx! {
        div {
            class: "toast-container",
            for toast in current {
                div {
                    key: "{toast.id}",
                    class: "toast",
                    role: "alert",
                    div {
                        class: "toast-header",
                        span {
                            class: format!("toast-icon {}", severity_class(toast.severity)),
                            match toast.severity {
                                Severity::Success => rsx! { Icon { icon: FaCircleCheck, width: 14, height: 14 } },
                                Severity::Error => rsx! { Icon { icon: FaCircleExclamation, width: 14, height: 14 } },
                                Severity::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 14, height: 14 } },
                                Severity::Info => rsx! { Icon { icon: FaCircleInfo, width: 14, height: 14 } },
                            }
                        }
                        strong { class: "toast-title", {toast.severity.title()} }
                        button {
                            class: "btn-close",
                            title: "Close",
                            onclick: move |_| toasts.write().dismiss(toast.id),
                            Icon { icon: FaXmark, width: 12, height: 12 }
                        }
                    }
                    div { class: "toast-body", "{toast.message}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let first = queue.push(Severity::Success, "Login successful!");
        let second = queue.push(Severity::Error, "Login failed");
        assert_ne!(first, second);
        assert_eq!(queue.toasts.len(), 2);

        queue.dismiss(first);
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].message, "Login failed");

        queue.dismiss(first);
        assert_eq!(queue.toasts.len(), 1);
    }

    #[test]
    fn test_errors_linger() {
        let config = NotificationConfig::default();
        assert_eq!(lifetime(Severity::Error, &config), Duration::from_millis(5000));
        assert_eq!(lifetime(Severity::Info, &config), Duration::from_millis(3000));
        assert_eq!(lifetime(Severity::Warning, &config), Duration::from_millis(3000));
    }
}
