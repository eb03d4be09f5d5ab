//! Screens. Each list screen is a [`ui::views::ListSpec`] handed to the
//! generic [`ui::views::ResourceList`].

use ui::table::Action;
use ui::views::ListSpec;
use ui::AuthState;

mod shell;
pub use shell::Shell;

mod dashboard;
pub use dashboard::Dashboard;

mod vehicles;
pub use vehicles::Vehicles;

mod drivers;
pub use drivers::Drivers;

mod trips;
pub use trips::Trips;

mod maintenance;
pub use maintenance::Maintenance;

mod reports;
pub use reports::Reports;

mod users;
pub use users::Users;

mod profile;
pub use profile::Profile;

/// Managers edit and create; only admins delete.
pub(crate) fn with_role_actions(spec: ListSpec, auth: &AuthState) -> ListSpec {
    if !auth.can_manage() {
        return spec.allow_create(false);
    }
    let spec = spec.action(Action::edit());
    if auth.is_admin() {
        spec.action(Action::delete())
    } else {
        spec
    }
}

/// `(value, label)` pairs for a select, labels capitalised.
pub(crate) fn choices(values: &[&str]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|value| {
            let label = ui::format::status_label(value);
            let mut chars = label.chars();
            let label = match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            };
            (value.to_string(), label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Resource;
    use store::{Role, UserProfile};

    fn auth(role: &str) -> AuthState {
        AuthState {
            user: Some(UserProfile {
                id: 1,
                username: "u".into(),
                email: None,
                role: Role::from(role),
                is_active: Some(true),
            }),
            loading: false,
        }
    }

    #[test]
    fn test_actions_follow_role() {
        let keys = |role: &str| {
            with_role_actions(ListSpec::new(Resource::Vehicles), &auth(role))
                .actions
                .into_iter()
                .map(|a| a.key)
                .collect::<Vec<_>>()
        };
        assert_eq!(keys("admin"), vec!["edit", "delete"]);
        assert_eq!(keys("manager"), vec!["edit"]);
        assert!(keys("driver").is_empty());

        let driver = with_role_actions(ListSpec::new(Resource::Vehicles), &auth("driver"));
        assert!(!driver.allow_create);
    }

    #[test]
    fn test_choices() {
        assert_eq!(
            choices(&["in_progress", "planned"]),
            vec![
                ("in_progress".to_string(), "In progress".to_string()),
                ("planned".to_string(), "Planned".to_string()),
            ]
        );
    }
}
