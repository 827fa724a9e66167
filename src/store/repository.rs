//! Typed collection access over the key-value collaborator.
//!
//! Every entity collection lives under one well-known key as a JSON array
//! (settings as a single JSON object). The [`Repository`] owns the mapping
//! between those documents and the typed models, and turns malformed stored
//! data into [`EngineError::Storage`] rather than guessing at a shape.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::AttendanceSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Branch, CardRecord, Employee, Holiday, UserAccount};
use crate::store::KeyValueStore;

/// Well-known storage keys, one per persisted collection.
pub mod keys {
    /// Employee roster.
    pub const EMPLOYEES: &str = "attend:employees";
    /// Registered RFID cards.
    pub const CARDS: &str = "attend:cards";
    /// Attendance records across all employees and days.
    pub const ATTENDANCE: &str = "attend:attendance";
    /// Holiday calendar.
    pub const HOLIDAYS: &str = "attend:holidays";
    /// Branches.
    pub const BRANCHES: &str = "attend:branches";
    /// Login accounts.
    pub const USERS: &str = "attend:users";
    /// The attendance settings document.
    pub const SETTINGS: &str = "attend:settings";

    /// Every key the engine owns, in reset order.
    pub const ALL: [&str; 7] = [
        EMPLOYEES, CARDS, ATTENDANCE, HOLIDAYS, BRANCHES, USERS, SETTINGS,
    ];
}

/// Typed persistence facade over a [`KeyValueStore`].
///
/// Reads of absent keys yield empty collections (or default settings), so a
/// fresh backend needs no priming. Writes replace the whole collection
/// document; serializing mutations is the caller's job.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
}

impl Repository {
    /// Creates a repository over the given storage backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Repository { store }
    }

    async fn load_collection<T: DeserializeOwned>(&self, key: &str) -> EngineResult<Vec<T>> {
        match self.store.get(key).await? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| EngineError::Storage {
                message: format!("document at '{key}' has unexpected shape: {e}"),
            }),
        }
    }

    async fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> EngineResult<()> {
        let raw = serde_json::to_string(items).map_err(|e| EngineError::Storage {
            message: format!("failed to encode document for '{key}': {e}"),
        })?;
        self.store.set(key, &raw).await
    }

    /// Loads the employee roster.
    pub async fn load_employees(&self) -> EngineResult<Vec<Employee>> {
        self.load_collection(keys::EMPLOYEES).await
    }

    /// Replaces the employee roster.
    pub async fn save_employees(&self, employees: &[Employee]) -> EngineResult<()> {
        self.save_collection(keys::EMPLOYEES, employees).await
    }

    /// Loads the card registry.
    pub async fn load_cards(&self) -> EngineResult<Vec<CardRecord>> {
        self.load_collection(keys::CARDS).await
    }

    /// Replaces the card registry.
    pub async fn save_cards(&self, cards: &[CardRecord]) -> EngineResult<()> {
        self.save_collection(keys::CARDS, cards).await
    }

    /// Loads all attendance records.
    pub async fn load_attendance(&self) -> EngineResult<Vec<AttendanceRecord>> {
        self.load_collection(keys::ATTENDANCE).await
    }

    /// Replaces all attendance records.
    pub async fn save_attendance(&self, records: &[AttendanceRecord]) -> EngineResult<()> {
        self.save_collection(keys::ATTENDANCE, records).await
    }

    /// Loads the holiday calendar.
    pub async fn load_holidays(&self) -> EngineResult<Vec<Holiday>> {
        self.load_collection(keys::HOLIDAYS).await
    }

    /// Replaces the holiday calendar.
    pub async fn save_holidays(&self, holidays: &[Holiday]) -> EngineResult<()> {
        self.save_collection(keys::HOLIDAYS, holidays).await
    }

    /// Loads the branches.
    pub async fn load_branches(&self) -> EngineResult<Vec<Branch>> {
        self.load_collection(keys::BRANCHES).await
    }

    /// Replaces the branches.
    pub async fn save_branches(&self, branches: &[Branch]) -> EngineResult<()> {
        self.save_collection(keys::BRANCHES, branches).await
    }

    /// Loads the login accounts.
    pub async fn load_users(&self) -> EngineResult<Vec<UserAccount>> {
        self.load_collection(keys::USERS).await
    }

    /// Replaces the login accounts.
    pub async fn save_users(&self, users: &[UserAccount]) -> EngineResult<()> {
        self.save_collection(keys::USERS, users).await
    }

    /// Loads the settings document, falling back to defaults when absent.
    pub async fn load_settings(&self) -> EngineResult<AttendanceSettings> {
        match self.store.get(keys::SETTINGS).await? {
            None => Ok(AttendanceSettings::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| EngineError::Storage {
                message: format!("document at '{}' has unexpected shape: {e}", keys::SETTINGS),
            }),
        }
    }

    /// Replaces the settings document.
    pub async fn save_settings(&self, settings: &AttendanceSettings) -> EngineResult<()> {
        let raw = serde_json::to_string(settings).map_err(|e| EngineError::Storage {
            message: format!("failed to encode document for '{}': {e}", keys::SETTINGS),
        })?;
        self.store.set(keys::SETTINGS, &raw).await
    }

    /// Deletes every collection the engine owns.
    ///
    /// This is the only place the engine uses `delete`; everything else is
    /// whole-document replacement.
    pub async fn reset_all(&self) -> EngineResult<()> {
        for key in keys::ALL {
            self.store.delete(key).await?;
        }
        Ok(())
    }
}
