//! # User Repository
//!
//! Users are owned by the user-management side of the platform; the
//! booking engine only needs existence checks and fixtures.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use shareit_core::{User, UserId};

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

/// Repository for user lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: UserId) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    /// Checks whether a user exists.
    pub async fn exists(&self, id: UserId) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Registers a user.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the email is already taken.
    pub async fn insert(&self, name: &str, email: &str) -> DbResult<User> {
        debug!(email = %email, "Inserting user");

        let id = sqlx::query("INSERT INTO users (name, email) VALUES (?1, ?2)")
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Counts registered users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
