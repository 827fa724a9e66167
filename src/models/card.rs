//! RFID card registry model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered RFID card bound to an employee.
///
/// Card uids are stored uppercase; scan input is normalized the same way
/// before lookup, so a reader that reports lowercase hex still matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Unique identifier for the registry entry.
    pub id: Uuid,
    /// The physical card uid as reported by the reader, uppercased.
    pub uid: String,
    /// The employee this card clocks in and out.
    pub employee_id: Uuid,
    /// Blocked cards are rejected at scan time without touching attendance.
    #[serde(default)]
    pub blocked: bool,
    /// When the card was registered.
    pub registered_at: NaiveDateTime,
}
