//! Application services layer - Use cases and business logic.
//!
//! Services depend on repository traits, never on SeaORM directly.

pub mod container;
mod user_service;

pub use container::Services;
pub use user_service::{UserManager, UserService};
