//! Repository layer - Data access abstraction
//!
//! The service talks to [`UserRepository`]; [`UserStore`] implements it on
//! SeaORM.

pub(crate) mod entities;
mod user_repository;

pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
