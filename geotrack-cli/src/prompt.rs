//! Interactive permission prompt.
//!
//! Stands in for the platform permission dialog: asks once on the terminal
//! and remembers what was granted for later checks.

use std::collections::BTreeSet;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use parking_lot::Mutex;

use geotrack::event::EventSender;
use geotrack::permission::{
    send_response, Permission, PermissionResponse, PermissionStatus, PermissionSystem,
};

/// Answers offered by the prompt, in display order.
const CHOICES: [&str; 3] = [
    "Allow precise location",
    "Allow approximate location only",
    "Don't allow",
];

/// Grants implied by a prompt choice.
fn grants_for_choice(choice: Option<usize>) -> BTreeSet<Permission> {
    match choice {
        Some(0) => [Permission::FineLocation, Permission::CoarseLocation].into(),
        Some(1) => [Permission::CoarseLocation].into(),
        _ => BTreeSet::new(),
    }
}

/// Build the reply for `requested` given what was granted.
fn response_for(requested: &[Permission], granted: &BTreeSet<Permission>) -> PermissionResponse {
    requested
        .iter()
        .map(|p| {
            let status = if granted.contains(p) {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
            (*p, status)
        })
        .collect()
}

/// Permission system backed by a terminal prompt.
#[derive(Default)]
pub struct PromptPermissions {
    granted: Mutex<BTreeSet<Permission>>,
}

impl PromptPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    fn ask() -> Option<usize> {
        println!(
            "{}",
            console::style("geotrack needs your location to show it on the map.").bold()
        );
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Allow access to this device's location?")
            .items(&CHOICES)
            .default(0)
            .interact_opt()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Permission prompt failed, treating as denied");
                None
            })
    }
}

impl PermissionSystem for PromptPermissions {
    fn check(&self, permission: Permission) -> PermissionStatus {
        if self.granted.lock().contains(&permission) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn request(&self, permissions: &[Permission], events: &EventSender) {
        let granted = grants_for_choice(Self::ask());
        let response = response_for(permissions, &granted);
        tracing::info!(?granted, "Permission prompt answered");

        self.granted.lock().extend(granted);
        send_response(events, response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrack::permission::{AccessLevel, LOCATION_PERMISSIONS};

    #[test]
    fn test_precise_choice_grants_fine() {
        let response = response_for(&LOCATION_PERMISSIONS, &grants_for_choice(Some(0)));
        assert_eq!(response.access_level(), Some(AccessLevel::Fine));
    }

    #[test]
    fn test_approximate_choice_grants_coarse() {
        let response = response_for(&LOCATION_PERMISSIONS, &grants_for_choice(Some(1)));
        assert_eq!(response.access_level(), Some(AccessLevel::Coarse));
    }

    #[test]
    fn test_cancel_denies() {
        let response = response_for(&LOCATION_PERMISSIONS, &grants_for_choice(None));
        assert_eq!(response.access_level(), None);
        assert_eq!(
            response.status(Permission::FineLocation),
            PermissionStatus::Denied
        );
    }

    #[test]
    fn test_check_before_prompt_is_denied() {
        let prompt = PromptPermissions::new();
        assert_eq!(
            prompt.check(Permission::FineLocation),
            PermissionStatus::Denied
        );
    }
}
