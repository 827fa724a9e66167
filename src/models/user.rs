//! User account model for operator login.
//!
//! Authentication here is a precondition check only: credentials are matched
//! in plaintext against stored accounts and the resulting role gates what the
//! caller may do. There is no session or token protocol.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control, including managing other admins. At least one super
    /// admin must always remain.
    SuperAdmin,
    /// Day-to-day administration: employees, cards, attendance, payroll.
    Admin,
    /// Self-service account auto-created alongside an employee record.
    Employee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "super_admin"),
            Role::Admin => write!(f, "admin"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

/// A login account for the operator surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier for the account.
    pub id: Uuid,
    /// Login name, matched case-sensitively.
    pub username: String,
    /// Plaintext password, matched verbatim.
    pub password: String,
    /// Display name.
    pub name: String,
    /// The role gating what this account may do.
    pub role: Role,
    /// The employee record backing an employee-role account.
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    /// The branch this account is scoped to, if any.
    #[serde(default)]
    pub branch_id: Option<Uuid>,
}

impl UserAccount {
    /// Returns true for accounts with the super admin role.
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}
