//! User repository backed by SQLite.
//!
//! Runtime-checked queries are used throughout so the crate builds without
//! a database or offline metadata. UUIDs are stored as TEXT, timestamps as
//! Unix seconds, the role as its TEXT representation.

use crate::{DbError, Result as DbErrorResult};

use mkt_core::{StoreError, User, UserRole, UserStore};

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (id, external_id, email, name, role, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.external_id)
        .bind(&user.email)
        .bind(user.name.as_deref())
        .bind(user.role.as_str())
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_external_id(&self, external_id: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, external_id, email, name, role, created_at, updated_at
                FROM users
                WHERE external_id = ?
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row).transpose()
    }

    /// Persist the mutable fields of an existing record. Id, external id,
    /// role and created_at never change after creation.
    pub async fn update(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                UPDATE users
                SET email = ?, name = ?, updated_at = ?
                WHERE external_id = ?
            "#,
        )
        .bind(&user.email)
        .bind(user.name.as_deref())
        .bind(user.updated_at.timestamp())
        .bind(&user.external_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes every row carrying the external id. A duplicate row left
    /// behind by an earlier race gets cleaned up with the original.
    pub async fn delete_by_external_id(&self, external_id: &str) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE external_id = ?")
            .bind(external_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_row(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row.try_get("id")?;
    let role: String = row.try_get("role")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Decode {
            message: format!("Invalid UUID in users.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        external_id: row.try_get("external_id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        role: UserRole::from_str(&role).map_err(|e| DbError::Decode {
            message: format!("Invalid UserRole in users.role: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in users.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in users.updated_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, StoreError> {
        UserRepository::find_by_external_id(self, external_id)
            .await
            .map_err(StoreError::from)
    }

    async fn create(&self, user: &User) -> Result<(), StoreError> {
        UserRepository::create(self, user)
            .await
            .map_err(StoreError::from)
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        UserRepository::update(self, user)
            .await
            .map_err(StoreError::from)
    }

    async fn delete_by_external_id(&self, external_id: &str) -> Result<u64, StoreError> {
        UserRepository::delete_by_external_id(self, external_id)
            .await
            .map_err(StoreError::from)
    }
}
