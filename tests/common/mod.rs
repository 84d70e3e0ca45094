//! Shared test doubles.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use usuarios_service::domain::{NewUser, User, UserId, UserRecord};
use usuarios_service::errors::{AppError, AppResult};
use usuarios_service::infra::{LocationDirectory, UserRepository};
use usuarios_service::services::UserManager;

/// In-memory store with the same contract as the `users` table, including
/// the unique email index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn stored(&self, id: UserId) -> Option<User> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.stored(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn save(&self, record: UserRecord) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();

        let id = match record.id {
            Some(id) => id,
            None => rows.keys().next_back().map_or(1, |last| last + 1),
        };
        if rows.values().any(|u| u.email == record.email && u.id != id) {
            return Err(AppError::DuplicateEmail);
        }

        let created_at = match (record.id, rows.get(&id)) {
            (Some(_), Some(existing)) => existing.created_at,
            (Some(_), None) => return Err(AppError::NotFound),
            (None, _) => record.created_at,
        };

        let user = User {
            id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            password_hash: record.password_hash,
            phone: record.phone,
            address: record.address,
            region: record.region,
            commune: record.commune,
            created_at,
        };
        rows.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// Canned location service; region "99" is treated as an upstream failure.
pub struct StubLocations;

pub const REGIONS_BODY: &str = r#"[{"codigo":"13","nombre":"Metropolitana de Santiago"}]"#;
pub const COMMUNES_BODY: &str = r#"[{"codigo":"13123","nombre":"Providencia"}]"#;

#[async_trait]
impl LocationDirectory for StubLocations {
    async fn regions(&self) -> AppResult<String> {
        Ok(REGIONS_BODY.to_string())
    }

    async fn communes(&self, region_code: &str) -> AppResult<String> {
        match region_code {
            "99" => Err(AppError::upstream("responded with 500 Internal Server Error")),
            _ => Ok(COMMUNES_BODY.to_string()),
        }
    }
}

pub fn service() -> (UserManager, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::default());
    (UserManager::new(repo.clone()), repo)
}

pub fn candidate(email: &str) -> NewUser {
    NewUser {
        id: None,
        first_name: "Ana".to_string(),
        last_name: "Soto".to_string(),
        email: email.to_string(),
        password: "secret123".to_string(),
        phone: "+56 9 1111 1111".to_string(),
        address: "Calle 1".to_string(),
        region: "Maule".to_string(),
        commune: "Talca".to_string(),
    }
}
