use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque string tags (e.g. "manage_users").
/// Role grants are static configuration (see [`crate::Role::permissions`]);
/// nothing at runtime derives a permission from other state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Const constructor used by the static permission catalog.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// Dashboard landing page.
pub const VIEW_DASHBOARD: Permission = Permission::from_static("view_dashboard");
pub const VIEW_PROFILE: Permission = Permission::from_static("view_profile");
pub const EDIT_PROFILE: Permission = Permission::from_static("edit_profile");

// Membership applications
pub const SUBMIT_APPLICATION: Permission = Permission::from_static("submit_application");
pub const VIEW_APPLICATIONS: Permission = Permission::from_static("view_applications");
pub const REVIEW_APPLICATIONS: Permission = Permission::from_static("review_applications");
pub const APPROVE_APPLICATIONS: Permission = Permission::from_static("approve_applications");

// Certificates
pub const VIEW_OWN_CERTIFICATES: Permission = Permission::from_static("view_own_certificates");
pub const ISSUE_CERTIFICATES: Permission = Permission::from_static("issue_certificates");
pub const MANAGE_CERTIFICATES: Permission = Permission::from_static("manage_certificates");

// Payments
pub const VIEW_OWN_PAYMENTS: Permission = Permission::from_static("view_own_payments");
pub const MAKE_PAYMENT: Permission = Permission::from_static("make_payment");
pub const VIEW_PAYMENTS: Permission = Permission::from_static("view_payments");
pub const MANAGE_PAYMENTS: Permission = Permission::from_static("manage_payments");

// Members
pub const VIEW_MEMBERS: Permission = Permission::from_static("view_members");
pub const MANAGE_BOARD: Permission = Permission::from_static("manage_board");

// Events & communities
pub const VIEW_EVENTS: Permission = Permission::from_static("view_events");
pub const REGISTER_EVENTS: Permission = Permission::from_static("register_events");
pub const MANAGE_EVENTS: Permission = Permission::from_static("manage_events");
pub const VIEW_COMMUNITIES: Permission = Permission::from_static("view_communities");
pub const JOIN_COMMUNITIES: Permission = Permission::from_static("join_communities");
pub const MANAGE_COMMUNITIES: Permission = Permission::from_static("manage_communities");

// Reporting
pub const VIEW_REPORTS: Permission = Permission::from_static("view_reports");
pub const EXPORT_REPORTS: Permission = Permission::from_static("export_reports");

// Administration
pub const MANAGE_USERS: Permission = Permission::from_static("manage_users");
pub const MANAGE_ROLES: Permission = Permission::from_static("manage_roles");
pub const MANAGE_SETTINGS: Permission = Permission::from_static("manage_settings");
pub const VIEW_AUDIT_LOG: Permission = Permission::from_static("view_audit_log");
