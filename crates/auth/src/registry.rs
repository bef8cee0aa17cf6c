use std::collections::BTreeMap;

use serde::Serialize;

use crate::permissions::Permission;
use crate::roles::Role;

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub label: &'static str,
    pub rank: u8,
    pub permissions: Vec<Permission>,
    pub description: &'static str,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: Permission,
    pub category: Option<&'static str>,
    /// Roles whose static set contains this permission, most senior first.
    pub granted_to: Vec<Role>,
}

/// Complete view of the static role/permission configuration.
#[derive(Debug, Clone, Serialize)]
pub struct RoleRegistry {
    pub roles: Vec<RoleDefinition>,
    pub permissions: BTreeMap<String, PermissionDefinition>,
}

impl RoleRegistry {
    pub fn build() -> Self {
        let roles: Vec<RoleDefinition> = Role::ALL
            .iter()
            .map(|&role| RoleDefinition {
                role,
                label: role.label(),
                rank: role.rank(),
                permissions: role.permissions().to_vec(),
                description: role.description(),
            })
            .collect();

        let mut permissions: BTreeMap<String, PermissionDefinition> = BTreeMap::new();
        for role in Role::ALL {
            for perm in role.permissions() {
                permissions
                    .entry(perm.as_str().to_string())
                    .or_insert_with(|| PermissionDefinition {
                        name: perm.clone(),
                        category: permission_category(perm),
                        granted_to: Vec::new(),
                    })
                    .granted_to
                    .push(role);
            }
        }

        Self { roles, permissions }
    }

    pub fn role(&self, role: Role) -> Option<&RoleDefinition> {
        self.roles.iter().find(|d| d.role == role)
    }

    pub fn permission(&self, name: &str) -> Option<&PermissionDefinition> {
        self.permissions.get(name)
    }
}

fn permission_category(perm: &Permission) -> Option<&'static str> {
    let category = match perm.as_str() {
        "view_dashboard" => "dashboard",
        "view_profile" | "edit_profile" => "profile",
        "submit_application" | "view_applications" | "review_applications"
        | "approve_applications" => "applications",
        "view_own_certificates" | "issue_certificates" | "manage_certificates" => "certificates",
        "view_own_payments" | "make_payment" | "view_payments" | "manage_payments" => "payments",
        "view_members" | "manage_board" => "membership",
        "view_events" | "register_events" | "manage_events" => "events",
        "view_communities" | "join_communities" | "manage_communities" => "communities",
        "view_reports" | "export_reports" => "reports",
        "manage_users" | "manage_roles" | "manage_settings" | "view_audit_log" => "administration",
        _ => return None,
    };
    Some(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{
        MANAGE_BOARD, MANAGE_USERS, VIEW_AUDIT_LOG, VIEW_OWN_PAYMENTS, VIEW_PROFILE,
    };

    #[test]
    fn registry_covers_every_role() {
        let registry = RoleRegistry::build();
        assert_eq!(registry.roles.len(), Role::ALL.len());
        assert_eq!(registry.role(Role::Board).unwrap().rank, 2);
    }

    #[test]
    fn permissions_record_granting_roles() {
        let registry = RoleRegistry::build();

        let manage = registry.permission(MANAGE_USERS.as_str()).unwrap();
        assert_eq!(manage.granted_to, vec![Role::Administrator]);
        assert_eq!(manage.category, Some("administration"));

        let profile = registry.permission(VIEW_PROFILE.as_str()).unwrap();
        assert_eq!(profile.granted_to.len(), 4);
    }

    #[test]
    fn categories_follow_the_permission_subject() {
        assert_eq!(permission_category(&VIEW_AUDIT_LOG), Some("administration"));
        assert_eq!(permission_category(&MANAGE_BOARD), Some("membership"));
        assert_eq!(permission_category(&VIEW_OWN_PAYMENTS), Some("payments"));
        assert_eq!(permission_category(&Permission::from_static("brew_coffee")), None);
    }

    #[test]
    fn every_granted_permission_has_a_category() {
        let registry = RoleRegistry::build();
        for (name, definition) in &registry.permissions {
            assert!(definition.category.is_some(), "{name} has no category");
        }
    }
}
