//! Permission vocabulary shared by the flow and permission systems.

use std::collections::BTreeMap;
use std::fmt;

/// A location permission that can be checked or requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    /// Precise (satellite-grade) location.
    FineLocation,
    /// Approximate (network-grade) location.
    CoarseLocation,
}

impl Permission {
    /// Stable identifier used in logs and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::FineLocation => "fine_location",
            Permission::CoarseLocation => "coarse_location",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The permissions asked for in the one combined request.
pub const LOCATION_PERMISSIONS: [Permission; 2] =
    [Permission::FineLocation, Permission::CoarseLocation];

/// Whether a permission is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Location accuracy the user allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Fine,
    Coarse,
}

/// Result of a permission request: one status per requested permission.
///
/// Permissions missing from the response count as denied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionResponse {
    statuses: BTreeMap<Permission, PermissionStatus>,
}

impl PermissionResponse {
    /// Create an empty response (everything denied).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, permission: Permission, status: PermissionStatus) -> Self {
        self.statuses.insert(permission, status);
        self
    }

    /// Status reported for `permission`, defaulting to denied.
    pub fn status(&self, permission: Permission) -> PermissionStatus {
        self.statuses
            .get(&permission)
            .copied()
            .unwrap_or(PermissionStatus::Denied)
    }

    /// The best access level granted by this response, if any.
    pub fn access_level(&self) -> Option<AccessLevel> {
        if self.status(Permission::FineLocation).is_granted() {
            Some(AccessLevel::Fine)
        } else if self.status(Permission::CoarseLocation).is_granted() {
            Some(AccessLevel::Coarse)
        } else {
            None
        }
    }

    /// Iterate over reported statuses.
    pub fn iter(&self) -> impl Iterator<Item = (Permission, PermissionStatus)> + '_ {
        self.statuses.iter().map(|(p, s)| (*p, *s))
    }
}

impl FromIterator<(Permission, PermissionStatus)> for PermissionResponse {
    fn from_iter<I: IntoIterator<Item = (Permission, PermissionStatus)>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}
