//! User repository - narrow storage interface over the `users` table.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    SqlErr,
};

use super::entities::{user, UserActiveModel, UserEntity};
use crate::domain::{User, UserId, UserRecord};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ascending by id
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether any user has this email
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Insert when `record.id` is `None`, otherwise update that row.
    ///
    /// `created_at` is only written on insert.
    async fn save(&self, record: UserRecord) -> AppResult<User>;

    /// Remove the row with this id (no-op when absent)
    async fn delete_by_id(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(self.db.as_ref()).await?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;

        Ok(result.map(User::from))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, record: UserRecord) -> AppResult<User> {
        let result = match record.id {
            None => {
                UserActiveModel {
                    id: NotSet,
                    first_name: Set(record.first_name),
                    last_name: Set(record.last_name),
                    email: Set(record.email),
                    password_hash: Set(record.password_hash),
                    phone: Set(record.phone),
                    address: Set(record.address),
                    region: Set(record.region),
                    commune: Set(record.commune),
                    created_at: Set(record.created_at),
                }
                .insert(self.db.as_ref())
                .await
            }
            Some(id) => {
                UserActiveModel {
                    id: Unchanged(id),
                    first_name: Set(record.first_name),
                    last_name: Set(record.last_name),
                    email: Set(record.email),
                    password_hash: Set(record.password_hash),
                    phone: Set(record.phone),
                    address: Set(record.address),
                    region: Set(record.region),
                    commune: Set(record.commune),
                    created_at: NotSet,
                }
                .update(self.db.as_ref())
                .await
            }
        };

        result.map(User::from).map_err(map_save_error)
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<()> {
        UserEntity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(())
    }
}

/// The unique index on `email` backs the creation-time uniqueness check.
fn map_save_error(err: DbErr) -> AppError {
    classify_save_error(err.sql_err(), err)
}

/// `sql_err` is the driver-level reading of `err`, decoded by the caller.
fn classify_save_error(sql_err: Option<SqlErr>, err: DbErr) -> AppError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = sql_err {
        return AppError::DuplicateEmail;
    }
    match err {
        DbErr::RecordNotUpdated => AppError::NotFound,
        other => AppError::Database(other),
    }
}
