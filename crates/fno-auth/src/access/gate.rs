//! Authorization checks that produce forbidden errors.

use fno_core::config::AuthConfig;
use fno_core::error::AppError;
use fno_core::result::AppResult;
use fno_core::types::UserId;

use super::policy::{AccessPolicy, authorize};
use crate::identity::Identity;

/// Applies [`AccessPolicy`] rules with the configured admin role name.
#[derive(Debug, Clone)]
pub struct AccessGate {
    admin_role: String,
}

impl AccessGate {
    /// Creates a gate treating `admin_role` as the administrative role.
    pub fn new(admin_role: impl Into<String>) -> Self {
        Self {
            admin_role: admin_role.into(),
        }
    }

    /// Creates a gate from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.admin_role.clone())
    }

    /// Returns `true` if the caller holds the admin role.
    pub fn is_admin(&self, identity: &Identity) -> bool {
        identity.has_role(&self.admin_role)
    }

    /// Requires the caller's role to be one of `roles`.
    pub fn require_roles(&self, identity: &Identity, roles: &[&str]) -> AppResult<()> {
        if authorize(identity, &AccessPolicy::RequireRoles(roles)) {
            Ok(())
        } else {
            Err(AppError::authorization("Insufficient role for this operation"))
        }
    }

    /// Requires the admin role.
    pub fn require_admin(&self, identity: &Identity) -> AppResult<()> {
        self.require_roles(identity, &[self.admin_role.as_str()])
            .map_err(|_| AppError::authorization("Admin access required"))
    }

    /// Reading a profile: admin, or the caller's own.
    pub fn require_view_access(&self, identity: &Identity, target: UserId) -> AppResult<()> {
        if self.admin_or_self(identity, target) {
            Ok(())
        } else {
            Err(AppError::authorization("You can only view your own profile"))
        }
    }

    /// Updating a profile: admin or self, and only an admin may send a role.
    pub fn require_update_access(
        &self,
        identity: &Identity,
        target: UserId,
        role_field_present: bool,
    ) -> AppResult<()> {
        if !self.admin_or_self(identity, target) {
            return Err(AppError::authorization(
                "You can only update your own profile",
            ));
        }
        let policy = AccessPolicy::RoleChange {
            admin_role: &self.admin_role,
            role_field_present,
        };
        if !authorize(identity, &policy) {
            return Err(AppError::authorization("Only admins can change user roles"));
        }
        Ok(())
    }

    fn admin_or_self(&self, identity: &Identity, target: UserId) -> bool {
        authorize(
            identity,
            &AccessPolicy::AdminOrSelf {
                admin_role: &self.admin_role,
                target,
            },
        )
    }
}
