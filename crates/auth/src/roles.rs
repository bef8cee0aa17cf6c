use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::identity::Identity;
use crate::permissions::{self as p, Permission};

/// Role identifier used for RBAC.
///
/// The role set is closed. Each role has exactly one permission set and one
/// hierarchy rank; both lookups are exhaustive matches, so a role without an
/// entry does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Role {
    Administrator,
    President,
    Board,
    Member,
}

static MEMBER_PERMISSIONS: &[Permission] = &[
    p::VIEW_DASHBOARD,
    p::VIEW_PROFILE,
    p::EDIT_PROFILE,
    p::SUBMIT_APPLICATION,
    p::VIEW_OWN_CERTIFICATES,
    p::VIEW_OWN_PAYMENTS,
    p::MAKE_PAYMENT,
    p::VIEW_EVENTS,
    p::REGISTER_EVENTS,
    p::VIEW_COMMUNITIES,
    p::JOIN_COMMUNITIES,
];

static BOARD_PERMISSIONS: &[Permission] = &[
    p::VIEW_DASHBOARD,
    p::VIEW_PROFILE,
    p::EDIT_PROFILE,
    p::VIEW_OWN_CERTIFICATES,
    p::VIEW_OWN_PAYMENTS,
    p::MAKE_PAYMENT,
    p::VIEW_EVENTS,
    p::REGISTER_EVENTS,
    p::VIEW_COMMUNITIES,
    p::JOIN_COMMUNITIES,
    p::VIEW_MEMBERS,
    p::VIEW_APPLICATIONS,
    p::REVIEW_APPLICATIONS,
    p::MANAGE_EVENTS,
    p::MANAGE_COMMUNITIES,
    p::VIEW_REPORTS,
];

static PRESIDENT_PERMISSIONS: &[Permission] = &[
    p::VIEW_DASHBOARD,
    p::VIEW_PROFILE,
    p::EDIT_PROFILE,
    p::VIEW_OWN_CERTIFICATES,
    p::VIEW_OWN_PAYMENTS,
    p::MAKE_PAYMENT,
    p::VIEW_EVENTS,
    p::REGISTER_EVENTS,
    p::VIEW_COMMUNITIES,
    p::JOIN_COMMUNITIES,
    p::VIEW_MEMBERS,
    p::VIEW_APPLICATIONS,
    p::REVIEW_APPLICATIONS,
    p::APPROVE_APPLICATIONS,
    p::ISSUE_CERTIFICATES,
    p::VIEW_PAYMENTS,
    p::MANAGE_EVENTS,
    p::MANAGE_COMMUNITIES,
    p::MANAGE_BOARD,
    p::VIEW_REPORTS,
    p::EXPORT_REPORTS,
];

static ADMINISTRATOR_PERMISSIONS: &[Permission] = &[
    p::VIEW_DASHBOARD,
    p::VIEW_PROFILE,
    p::EDIT_PROFILE,
    p::VIEW_MEMBERS,
    p::VIEW_APPLICATIONS,
    p::REVIEW_APPLICATIONS,
    p::APPROVE_APPLICATIONS,
    p::ISSUE_CERTIFICATES,
    p::MANAGE_CERTIFICATES,
    p::VIEW_PAYMENTS,
    p::MANAGE_PAYMENTS,
    p::VIEW_EVENTS,
    p::MANAGE_EVENTS,
    p::VIEW_COMMUNITIES,
    p::MANAGE_COMMUNITIES,
    p::MANAGE_BOARD,
    p::VIEW_REPORTS,
    p::EXPORT_REPORTS,
    p::MANAGE_USERS,
    p::MANAGE_ROLES,
    p::MANAGE_SETTINGS,
    p::VIEW_AUDIT_LOG,
];

impl Role {
    /// Every role, most senior first.
    pub const ALL: [Role; 4] = [Role::Administrator, Role::President, Role::Board, Role::Member];

    /// Static permission set granted to this role.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Administrator => ADMINISTRATOR_PERMISSIONS,
            Role::President => PRESIDENT_PERMISSIONS,
            Role::Board => BOARD_PERMISSIONS,
            Role::Member => MEMBER_PERMISSIONS,
        }
    }

    /// Hierarchy rank; higher is more senior.
    pub fn rank(self) -> u8 {
        match self {
            Role::Administrator => 4,
            Role::President => 3,
            Role::Board => 2,
            Role::Member => 1,
        }
    }

    pub fn is_at_least(self, other: Role) -> bool {
        self.rank() >= other.rank()
    }

    pub fn has_permission(self, permission: &Permission) -> bool {
        self.permissions().contains(permission)
    }

    /// Stable wire/config name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::President => "president",
            Role::Board => "board",
            Role::Member => "member",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::President => "President",
            Role::Board => "Board Member",
            Role::Member => "Member",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Role::Administrator => "Full system administrator with all management permissions",
            Role::President => "Association president; approves applications and issues certificates",
            Role::Board => "Board member; reviews applications and runs events and communities",
            Role::Member => "Registered member with self-service access",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "president" => Ok(Role::President),
            "board" | "board_member" => Ok(Role::Board),
            "member" => Ok(Role::Member),
            _ => Err(AuthError::UnknownRole(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for &'static str {
    fn from(value: Role) -> Self {
        value.as_str()
    }
}

/// Who a navigation table (or any other audience-specific view) is evaluated
/// for.
///
/// `Pending` covers accounts whose membership is not yet verified. It has no
/// permission set and no dashboard of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Pending,
    Role(Role),
}

impl Audience {
    pub fn of(identity: &Identity) -> Self {
        if identity.verified {
            Audience::Role(identity.role)
        } else {
            Audience::Pending
        }
    }

    pub fn role(self) -> Option<Role> {
        match self {
            Audience::Role(role) => Some(role),
            Audience::Pending => None,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Audience::Pending)
    }
}

impl From<Role> for Audience {
    fn from(value: Role) -> Self {
        Audience::Role(value)
    }
}
