//! User repository: all reads and writes to the `users` table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::info;

use crate::entities::prelude::*;
use crate::entities::users::{self, UserRole};

/// A registered user row as seen by callers of the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Opaque credential hash. Kept here so full-record updates can carry
    /// it through; must never reach logs or response bodies.
    pub hashed_secret_key: String,
    pub email_address: String,
    pub is_email_verified: bool,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login_date: Option<DateTime<Utc>>,
    pub failed_login_attempts: i32,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            hashed_secret_key: model.hashed_secret_key,
            email_address: model.email_address,
            is_email_verified: model.is_email_verified,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_login_date: model.last_login_date,
            failed_login_attempts: model.failed_login_attempts,
        }
    }
}

/// Fields supplied when creating a user. The store assigns the id;
/// verification status and the failed-attempt counter start at their
/// defaults.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub hashed_secret_key: String,
    pub email_address: String,
    pub role: UserRole,
}

/// Full-record replacement of a user's mutable fields. `created_at` is
/// immutable and deliberately absent.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: i32,
    pub username: String,
    pub hashed_secret_key: String,
    pub email_address: String,
    pub is_email_verified: bool,
    pub role: UserRole,
    pub last_login_date: Option<DateTime<Utc>>,
    pub failed_login_attempts: i32,
}

/// Capability set for user storage. Callers depend on this trait, not on
/// the SeaORM-backed implementation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the user with the given id, or None.
    async fn get_by_id(&self, id: i32) -> Result<Option<User>>;

    /// Returns the first user with the given username, or None. Case
    /// sensitivity follows the store's collation.
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Returns the first user with the given email address, or None.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Returns every user row. Unpaginated; administrative use only.
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Inserts a new user and commits. Fails if the username or email
    /// collides with an existing row.
    async fn add(&self, user: NewUser) -> Result<User>;

    /// Replaces all mutable fields of the matching row and stamps
    /// `updated_at`. Returns None when no row matches the id.
    async fn update(&self, update: UserUpdate) -> Result<Option<User>>;

    /// Removes the row if it exists. Returns whether a row was removed;
    /// a missing id is not an error.
    async fn delete(&self, id: i32) -> Result<bool>;
}

pub struct SeaOrmUserRepository {
    conn: DatabaseConnection,
}

impl SeaOrmUserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by id")?;

        Ok(user.map(User::from))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::EmailAddress.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let rows = Users::find()
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn add(&self, user: NewUser) -> Result<User> {
        let active_model = users::ActiveModel {
            username: Set(user.username),
            hashed_secret_key: Set(user.hashed_secret_key),
            email_address: Set(user.email_address),
            is_email_verified: Set(false),
            role: Set(user.role),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            last_login_date: Set(None),
            failed_login_attempts: Set(0),
            ..Default::default()
        };

        let inserted = active_model.insert(&self.conn).await?;

        info!("Added user {} (id {})", inserted.username, inserted.id);
        Ok(User::from(inserted))
    }

    async fn update(&self, update: UserUpdate) -> Result<Option<User>> {
        let active_model = users::ActiveModel {
            id: Set(update.id),
            username: Set(update.username),
            hashed_secret_key: Set(update.hashed_secret_key),
            email_address: Set(update.email_address),
            is_email_verified: Set(update.is_email_verified),
            role: Set(update.role),
            updated_at: Set(Some(Utc::now())),
            last_login_date: Set(update.last_login_date),
            failed_login_attempts: Set(update.failed_login_attempts),
            ..Default::default()
        };

        match active_model.update(&self.conn).await {
            Ok(model) => {
                info!("Updated user {}", model.id);
                Ok(Some(User::from(model)))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err).context("Failed to update user"),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        if result.rows_affected > 0 {
            info!("Deleted user {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
