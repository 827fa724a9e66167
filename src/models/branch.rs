//! Branch (site/office) model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company branch that employees and user accounts can be scoped to.
///
/// A "Main Branch" is seeded on first load so new employees always have a
/// branch to land in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Unique identifier for the branch.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Postal address (free text).
    #[serde(default)]
    pub address: String,
}
