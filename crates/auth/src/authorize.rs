use serde::Serialize;
use thiserror::Error;

use memberhub_core::MemberId;

use crate::identity::{Identity, IdentityState};
use crate::permissions::Permission;
use crate::roles::Role;

/// Constraint a protected view or action places on the current identity.
///
/// Empty role or permission lists impose no constraint on that clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl AccessRequirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.roles.is_empty() && self.permissions.is_empty()
    }

    pub fn is_satisfied_by(&self, identity: Option<&Identity>) -> bool {
        can_access(identity, &self.roles, &self.permissions)
    }
}

/// Whether `identity` may access something guarded by the given roles and
/// permissions.
///
/// - No identity: always `false`.
/// - Role clause: passes when `required_roles` is empty, when the identity's
///   role is listed, or when its rank is at least the rank of any listed role.
/// - Permission clause: passes when every required permission is granted to
///   the identity's role.
pub fn can_access(
    identity: Option<&Identity>,
    required_roles: &[Role],
    required_permissions: &[Permission],
) -> bool {
    let Some(identity) = identity else {
        return false;
    };

    role_clause(identity.role, required_roles)
        && permission_clause(identity.role, required_permissions).is_none()
}

// The exact-membership branch is kept next to the rank comparison: with the
// current role set rank equality already implies membership, but two roles
// sharing a rank would make the branches diverge.
fn role_clause(role: Role, required: &[Role]) -> bool {
    required.is_empty()
        || required.contains(&role)
        || required.iter().any(|r| role.rank() >= r.rank())
}

/// First required permission the role lacks, if any.
fn permission_clause<'a>(role: Role, required: &'a [Permission]) -> Option<&'a Permission> {
    required.iter().find(|p| !role.has_permission(p))
}

/// Tri-state outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Identity resolution still in flight; neither content nor denial applies.
    Loading,
    Granted,
    Denied,
}

/// Evaluate a requirement against the provider's current state.
pub fn evaluate(state: &IdentityState, requirement: &AccessRequirement) -> AccessDecision {
    match state {
        IdentityState::Loading => AccessDecision::Loading,
        other => {
            if requirement.is_satisfied_by(other.identity()) {
                AccessDecision::Granted
            } else {
                AccessDecision::Denied
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("forbidden: role '{actual}' does not satisfy {required:?}")]
    InsufficientRole { actual: Role, required: Vec<Role> },

    #[error("forbidden: missing permission '{0}'")]
    MissingPermission(Permission),
}

/// Result-returning variant of [`can_access`] for call sites that propagate
/// denials with `?`.
///
/// - No IO
/// - No panics
pub fn authorize(
    identity: Option<&Identity>,
    requirement: &AccessRequirement,
) -> Result<(), AccessError> {
    let identity = identity.ok_or(AccessError::NotAuthenticated)?;

    if !role_clause(identity.role, &requirement.roles) {
        return Err(AccessError::InsufficientRole {
            actual: identity.role,
            required: requirement.roles.clone(),
        });
    }

    if let Some(missing) = permission_clause(identity.role, &requirement.permissions) {
        return Err(AccessError::MissingPermission(missing.clone()));
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision.
///
/// Answers "why was this page hidden from me?" without re-deriving the rules.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub required_roles: Vec<Role>,
    pub required_permissions: Vec<Permission>,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    pub principal: Option<PrincipalState>,
    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrincipalState {
    pub member_id: MemberId,
    pub role: Role,
    pub rank: u8,
    pub effective_permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NotAuthenticated,
    InsufficientRole,
    MissingPermission,
}

/// Explain why an access decision was made (or would be made).
pub fn explain_access(
    identity: Option<&Identity>,
    requirement: &AccessRequirement,
) -> AccessExplanation {
    let base = |granted, reason: String, principal, denial_reason| AccessExplanation {
        required_roles: requirement.roles.clone(),
        required_permissions: requirement.permissions.clone(),
        granted,
        reason,
        principal,
        denial_reason,
    };

    let Some(identity) = identity else {
        return base(
            false,
            "No authenticated identity".to_string(),
            None,
            Some(DenialReason {
                kind: DenialKind::NotAuthenticated,
                message: "Access requires a signed-in member".to_string(),
                suggestions: vec!["Sign in and retry".to_string()],
            }),
        );
    };

    let mut effective: Vec<Permission> = identity.permissions().to_vec();
    effective.sort();
    let principal = PrincipalState {
        member_id: identity.id,
        role: identity.role,
        rank: identity.role.rank(),
        effective_permissions: effective,
    };

    match authorize(Some(identity), requirement) {
        Ok(()) => {
            let reason = if requirement.is_unconstrained() {
                "No role or permission constraint".to_string()
            } else if requirement.roles.contains(&identity.role) || requirement.roles.is_empty() {
                format!("Role '{}' satisfies the requirement", identity.role)
            } else {
                format!(
                    "Role '{}' (rank {}) is senior enough for {:?}",
                    identity.role,
                    identity.role.rank(),
                    requirement.roles
                )
            };
            base(true, reason, Some(principal), None)
        }
        Err(AccessError::InsufficientRole { actual, required }) => {
            let minimum = required.iter().map(|r| r.rank()).min().unwrap_or_default();
            let qualifying: Vec<&'static str> = Role::ALL
                .iter()
                .filter(|r| r.rank() >= minimum)
                .map(|r| r.as_str())
                .collect();
            base(
                false,
                format!("Role '{}' does not satisfy {:?}", actual, required),
                Some(principal),
                Some(DenialReason {
                    kind: DenialKind::InsufficientRole,
                    message: format!("Required one of {:?} or a more senior role", required),
                    suggestions: vec![format!(
                        "Roles that would pass this check: {:?}",
                        qualifying
                    )],
                }),
            )
        }
        Err(AccessError::MissingPermission(missing)) => {
            let granting: Vec<&'static str> = Role::ALL
                .iter()
                .filter(|r| requirement.permissions.iter().all(|p| r.has_permission(p)))
                .map(|r| r.as_str())
                .collect();
            let mut suggestions = vec![format!(
                "Assign a role that grants the '{}' permission",
                missing
            )];
            if !granting.is_empty() {
                suggestions.push(format!("Roles granting every required permission: {:?}", granting));
            }
            base(
                false,
                format!("Role '{}' lacks permission '{}'", identity.role, missing),
                Some(principal),
                Some(DenialReason {
                    kind: DenialKind::MissingPermission,
                    message: format!("Missing required permission: '{}'", missing),
                    suggestions,
                }),
            )
        }
        Err(AccessError::NotAuthenticated) => base(
            false,
            "No authenticated identity".to_string(),
            Some(principal),
            None,
        ),
    }
}
