//! Access policies and the pure decision function.

use fno_core::types::UserId;

use crate::identity::Identity;

/// A single access rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy<'a> {
    /// The caller's role name must be one of these.
    RequireRoles(&'a [&'a str]),
    /// The caller is an admin or is the target user.
    AdminOrSelf {
        admin_role: &'a str,
        target: UserId,
    },
    /// A non-admin may not touch the role field. Presence alone triggers
    /// the rule; the supplied value is irrelevant.
    RoleChange {
        admin_role: &'a str,
        role_field_present: bool,
    },
}

/// Returns `true` if `identity` satisfies `policy`.
pub fn authorize(identity: &Identity, policy: &AccessPolicy<'_>) -> bool {
    match *policy {
        AccessPolicy::RequireRoles(roles) => roles.iter().any(|r| identity.has_role(r)),
        AccessPolicy::AdminOrSelf { admin_role, target } => {
            identity.has_role(admin_role) || identity.id == target
        }
        AccessPolicy::RoleChange {
            admin_role,
            role_field_present,
        } => !role_field_present || identity.has_role(admin_role),
    }
}
