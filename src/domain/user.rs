//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Store-assigned user identifier.
pub type UserId = i64;

/// User domain entity as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub region: String,
    pub commune: String,
    pub created_at: DateTime<Utc>,
}

/// Creation candidate as received from a client.
///
/// `id` exists only so a client-supplied identifier can be rejected.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub region: String,
    pub commune: String,
}

/// Partial update: every present field overwrites the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub region: Option<String>,
    pub commune: Option<String>,
}

impl UserPatch {
    /// Merge this patch onto `user`.
    ///
    /// The password is taken from `password_hash`, which the caller derives
    /// from `self.password`. `id` and `created_at` are never touched.
    pub fn apply(self, user: &mut User, password_hash: Option<String>) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(address) = self.address {
            user.address = address;
        }
        if let Some(region) = self.region {
            user.region = region;
        }
        if let Some(commune) = self.commune {
            user.commune = commune;
        }
    }
}

/// Row handed to the store: insert when `id` is `None`, update otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub region: String,
    pub commune: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            address: user.address,
            region: user.region,
            commune: user.commune,
            created_at: user.created_at,
        }
    }
}

/// User representation returned to clients (no credential).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: UserId,
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Soto")]
    pub last_name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "+56 9 1234 5678")]
    pub phone: String,
    #[schema(example = "Av. Siempre Viva 742")]
    pub address: String,
    #[schema(example = "Metropolitana de Santiago")]
    pub region: String,
    #[schema(example = "Providencia")]
    pub commune: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            region: user.region,
            commune: user.commune,
            created_at: user.created_at,
        }
    }
}
