//! User role record.

use serde::{Deserialize, Serialize};

use fno_core::types::RoleId;

/// A role a user belongs to. Roles are seeded at deployment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: RoleId,
    /// Unique role name, e.g. `USER` or `ADMIN`.
    pub name: String,
}

impl Role {
    /// Creates a role value.
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns `true` if this role carries the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}
