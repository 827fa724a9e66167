//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::AppService;

/// Shared application state.
///
/// Contains the application service, which owns the in-memory snapshot
/// and every mutation; handlers go through it for all operations.
#[derive(Clone)]
pub struct AppState {
    /// The application service.
    service: Arc<AppService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: AppService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the application service.
    pub fn service(&self) -> &AppService {
        &self.service
    }
}
