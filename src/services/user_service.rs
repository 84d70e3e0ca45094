//! User service - validation, uniqueness, partial-update merge and login.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::validation::{is_valid_email, is_valid_name};
use crate::domain::{NewUser, Password, User, UserId, UserPatch, UserRecord};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// All users in store order
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// User by id; absence is `Ok(None)`
    async fn get_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// User by email; absence is `Ok(None)`
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Validate and persist a new user.
    ///
    /// Checks run in order and the first failure wins: client-supplied id
    /// (`InvalidState`), duplicate email (`DuplicateEmail`), first name,
    /// last name, email format, then password length (`InvalidFormat`).
    async fn create_user(&self, candidate: NewUser) -> AppResult<User>;

    /// Merge the present fields of `patch` onto the stored user.
    ///
    /// No format validation is applied here.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> AppResult<User>;

    /// `true` if the user existed and was removed
    async fn delete_user(&self, id: UserId) -> AppResult<bool>;

    /// The user whose credentials match, else `InvalidCredentials`
    async fn login(&self, email: &str, password: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn get_user(&self, id: UserId) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn create_user(&self, candidate: NewUser) -> AppResult<User> {
        if candidate.id.is_some() {
            return Err(AppError::invalid_state("User id must not be supplied"));
        }
        if self.repo.exists_by_email(&candidate.email).await? {
            return Err(AppError::DuplicateEmail);
        }
        if !is_valid_name(&candidate.first_name) {
            return Err(AppError::invalid_format(
                "First name may only contain letters",
            ));
        }
        if !is_valid_name(&candidate.last_name) {
            return Err(AppError::invalid_format(
                "Last name may only contain letters",
            ));
        }
        if !is_valid_email(&candidate.email) {
            return Err(AppError::invalid_format("Email must be a valid address"));
        }
        let password = Password::new(&candidate.password)?;

        let user = self
            .repo
            .save(UserRecord {
                id: None,
                first_name: candidate.first_name,
                last_name: candidate.last_name,
                email: candidate.email,
                password_hash: password.into_string(),
                phone: candidate.phone,
                address: candidate.address,
                region: candidate.region,
                commune: candidate.commune,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> AppResult<User> {
        let mut user = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        let password_hash = patch
            .password
            .as_deref()
            .map(Password::hash_plain)
            .transpose()?
            .map(Password::into_string);
        patch.apply(&mut user, password_hash);

        let user = self.repo.save(user.into()).await?;
        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        if self.repo.find_by_id(id).await?.is_none() {
            tracing::debug!(user_id = id, "Delete requested for unknown user");
            return Ok(false);
        }

        self.repo.delete_by_id(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(true)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            Password::verify_dummy(password);
            return Err(AppError::InvalidCredentials);
        };

        if !Password::from_hash(user.password_hash.clone()).verify(password) {
            tracing::debug!(user_id = user.id, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;

    fn candidate() -> NewUser {
        NewUser {
            id: None,
            first_name: "Ana".to_string(),
            last_name: "Soto".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            phone: String::new(),
            address: "Av. Providencia 1234".to_string(),
            region: "Metropolitana de Santiago".to_string(),
            commune: "Providencia".to_string(),
        }
    }

    fn stored(id: UserId, password: &str) -> User {
        User {
            id,
            first_name: "Ana".to_string(),
            last_name: "Soto".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            phone: String::new(),
            address: "Av. Providencia 1234".to_string(),
            region: "Metropolitana de Santiago".to_string(),
            commune: "Providencia".to_string(),
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_with_id_fails_before_touching_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().never();
        repo.expect_save().never();

        let result = service(repo)
            .create_user(NewUser {
                id: Some(5),
                ..candidate()
            })
            .await;

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_wins_over_format_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email()
            .with(eq("ana@example.com"))
            .returning(|_| Ok(true));
        repo.expect_save().never();

        let result = service(repo)
            .create_user(NewUser {
                first_name: "Ana1".to_string(),
                ..candidate()
            })
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_first_name_checked_before_last_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_save().never();

        let result = service(repo)
            .create_user(NewUser {
                first_name: "Ana1".to_string(),
                last_name: "Soto#".to_string(),
                ..candidate()
            })
            .await;

        match result {
            Err(AppError::InvalidFormat(msg)) => assert!(msg.starts_with("First name")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_last_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));

        let result = service(repo)
            .create_user(NewUser {
                last_name: "Soto2".to_string(),
                ..candidate()
            })
            .await;

        match result {
            Err(AppError::InvalidFormat(msg)) => assert!(msg.starts_with("Last name")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_email_format() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_save().never();

        let result = service(repo)
            .create_user(NewUser {
                email: "ana@example".to_string(),
                ..candidate()
            })
            .await;

        match result {
            Err(AppError::InvalidFormat(msg)) => assert!(msg.starts_with("Email")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_save().never();

        let result = service(repo)
            .create_user(NewUser {
                password: "12345".to_string(),
                ..candidate()
            })
            .await;

        assert!(matches!(result, Err(AppError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_create_hashes_password_and_stamps_creation() {
        let before = Utc::now();
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_save()
            .withf(move |record| {
                record.id.is_none()
                    && record.password_hash != "secret1"
                    && Password::from_hash(record.password_hash.clone()).verify("secret1")
                    && record.created_at >= before
            })
            .returning(|record| {
                Ok(User {
                    id: 1,
                    first_name: record.first_name,
                    last_name: record.last_name,
                    email: record.email,
                    password_hash: record.password_hash,
                    phone: record.phone,
                    address: record.address,
                    region: record.region,
                    commune: record.commune,
                    created_at: record.created_at,
                })
            });

        let user = service(repo).create_user(candidate()).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.first_name, "Ana");
    }

    #[tokio::test]
    async fn test_concurrent_registration_caught_by_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email()
            .with(eq("ana@example.com"))
            .returning(|_| Ok(false));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(AppError::DuplicateEmail));

        let result = service(repo).create_user(candidate()).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_duplicate() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "secret1"))));
        repo.expect_exists_by_email().never();
        repo.expect_save()
            .withf(|record| record.email == "beto@example.com")
            .returning(|_| Err(AppError::DuplicateEmail));

        let result = service(repo)
            .update_user(
                4,
                UserPatch {
                    email: Some("beto@example.com".to_string()),
                    ..UserPatch::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(99_i64)).returning(|_| Ok(None));
        repo.expect_save().never();

        let result = service(repo).update_user(99, UserPatch::default()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_skips_format_validation() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "secret1"))));
        repo.expect_save()
            .withf(|record| record.id == Some(4) && record.first_name == "Ana1")
            .returning(|record| {
                Ok(User {
                    id: 4,
                    first_name: record.first_name,
                    last_name: record.last_name,
                    email: record.email,
                    password_hash: record.password_hash,
                    phone: record.phone,
                    address: record.address,
                    region: record.region,
                    commune: record.commune,
                    created_at: record.created_at,
                })
            });

        let user = service(repo)
            .update_user(
                4,
                UserPatch {
                    first_name: Some("Ana1".to_string()),
                    ..UserPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.first_name, "Ana1");
    }

    #[tokio::test]
    async fn test_delete_unknown_user_returns_false() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete_by_id().never();

        assert!(!service(repo).delete_user(12).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_existing_user_returns_true() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "secret1"))));
        repo.expect_delete_by_id()
            .with(eq(12_i64))
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(repo).delete_user(12).await.unwrap());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("ana@example.com"))
            .returning(|_| Ok(Some(stored(1, "secret1"))));
        repo.expect_find_by_email()
            .with(eq("nobody@example.com"))
            .returning(|_| Ok(None));
        let service = service(repo);

        let wrong_password = service.login("ana@example.com", "secret2").await;
        let unknown_email = service.login("nobody@example.com", "secret1").await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored(1, "secret1"))));

        let user = service(repo)
            .login("ana@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(user.id, 1);
    }
}
