//! Service container - wires repositories and clients into services.

use std::sync::Arc;

use super::{UserManager, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{HttpLocationDirectory, LocationDirectory, UserStore};

/// Everything the HTTP layer needs, built once at startup.
pub struct Services {
    user_service: Arc<dyn UserService>,
    location_directory: Arc<dyn LocationDirectory>,
}

impl Services {
    /// Create a service container from already-built parts
    pub fn new(
        user_service: Arc<dyn UserService>,
        location_directory: Arc<dyn LocationDirectory>,
    ) -> Self {
        Self {
            user_service,
            location_directory,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(
        db: Arc<sea_orm::DatabaseConnection>,
        config: &Config,
    ) -> AppResult<Self> {
        let user_repo = Arc::new(UserStore::new(db));
        let user_service = Arc::new(UserManager::new(user_repo));
        let location_directory = Arc::new(HttpLocationDirectory::from_config(config)?);

        Ok(Self::new(user_service, location_directory))
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get location lookup client
    pub fn locations(&self) -> Arc<dyn LocationDirectory> {
        self.location_directory.clone()
    }
}
