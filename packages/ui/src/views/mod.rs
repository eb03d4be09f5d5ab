//! Screen-level components built from the table engine and services.

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod record_form;
pub use record_form::{form_payload, initial_values, lookup_options, FieldKind, FormField, RecordForm};

mod list_screen;
pub use list_screen::{ListPage, ListSpec, ResourceList};

mod dashboard;
pub use dashboard::{DashboardData, DashboardStats, DashboardView};

mod reports;
pub use reports::{fleet_reports, report_rows, Report, ReportsView};

mod change_password;
pub use change_password::{validate_password_change, ChangePasswordForm};
