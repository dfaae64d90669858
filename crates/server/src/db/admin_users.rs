//! Admin account database operations.

use printworks_core::AdminUserId;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::RepositoryError;
use crate::models::AdminUser;

#[derive(FromRow)]
struct AdminUserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AdminUserRow> for AdminUser {
    fn from(row: AdminUserRow) -> Self {
        Self {
            id: AdminUserId::new(row.id),
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// Repository for admin accounts.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepositoryError> {
        let row: Option<AdminUserRow> = sqlx::query_as(
            "SELECT id, email, name, password_hash, created_at FROM admin_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(AdminUser::from))
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] when the email is taken.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let row: AdminUserRow = sqlx::query_as(
            "INSERT INTO admin_users (id, email, name, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, email, name, password_hash, created_at",
        )
        .bind(AdminUserId::generate().as_uuid())
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already registered"))?;
        Ok(row.into())
    }

    /// Replace an admin's password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn set_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE admin_users SET password_hash = $2 WHERE email = $1")
            .bind(email)
            .bind(password_hash)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
