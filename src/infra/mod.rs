//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL connection, migrations and the user repository
//! - HTTP client for the regions/communes location service

pub mod db;
pub mod location;
pub mod repositories;

pub use db::{Database, Migrator};
pub use location::{HttpLocationDirectory, LocationDirectory};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use location::MockLocationDirectory;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
