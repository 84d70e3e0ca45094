//! SeaORM entity definitions, kept apart from the domain models.

pub mod user;

pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity};

#[cfg(test)]
pub use user::Model as UserModel;
