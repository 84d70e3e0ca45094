//! Application state shared by every handler.

use std::sync::Arc;

use crate::infra::{Database, LocationDirectory};
use crate::services::{Services, UserService};

/// Application state (cheap to clone, everything behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub location_directory: Arc<dyn LocationDirectory>,
    /// Used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build state from a wired service container.
    pub fn from_services(services: &Services, database: Arc<Database>) -> Self {
        Self::new(services.users(), services.locations(), database)
    }

    /// Create state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        location_directory: Arc<dyn LocationDirectory>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            user_service,
            location_directory,
            database,
        }
    }
}
