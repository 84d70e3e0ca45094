//! Domain layer - Core business entities and rules
//!
//! The user entity, its creation candidate and patch types, the password
//! value object and the field format rules. Nothing here touches the
//! database or HTTP.

pub mod password;
pub mod user;
pub mod validation;

pub use password::Password;
pub use user::{NewUser, User, UserId, UserPatch, UserRecord, UserResponse};
