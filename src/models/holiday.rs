//! Holiday calendar model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named holiday excluded from working-day counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Unique identifier for the holiday entry.
    pub id: Uuid,
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// Display name (e.g., "Republic Day").
    pub name: String,
}
