//! Print-size template database operations.

use printworks_core::PrintSizeId;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::RepositoryError;
use crate::models::PrintSize;

#[derive(FromRow)]
struct PrintSizeRow {
    id: Uuid,
    name: String,
    dimensions: String,
    sort_order: i32,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PrintSizeRow> for PrintSize {
    fn from(row: PrintSizeRow) -> Self {
        Self {
            id: PrintSizeId::new(row.id),
            name: row.name,
            dimensions: row.dimensions,
            sort_order: row.sort_order,
            created_at: row.created_at,
        }
    }
}

/// Partial update for a print-size template.
#[derive(Debug, Clone, Default)]
pub struct PrintSizePatch {
    pub name: Option<String>,
    pub dimensions: Option<String>,
    pub sort_order: Option<i32>,
}

/// Repository for print-size templates.
pub struct PrintSizeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PrintSizeRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List templates in picker order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<PrintSize>, RepositoryError> {
        let rows: Vec<PrintSizeRow> = sqlx::query_as(
            "SELECT id, name, dimensions, sort_order, created_at \
             FROM print_sizes ORDER BY sort_order, name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(PrintSize::from).collect())
    }

    /// Fetch a template by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: PrintSizeId) -> Result<Option<PrintSize>, RepositoryError> {
        let row: Option<PrintSizeRow> = sqlx::query_as(
            "SELECT id, name, dimensions, sort_order, created_at FROM print_sizes WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(PrintSize::from))
    }

    /// Create a template. Names are singleton-per-name.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] when the name is taken.
    pub async fn create(
        &self,
        name: &str,
        dimensions: &str,
        sort_order: i32,
    ) -> Result<PrintSize, RepositoryError> {
        let row: PrintSizeRow = sqlx::query_as(
            "INSERT INTO print_sizes (id, name, dimensions, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, dimensions, sort_order, created_at",
        )
        .bind(PrintSizeId::generate().as_uuid())
        .bind(name)
        .bind(dimensions)
        .bind(sort_order)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "print size name already exists"))?;
        Ok(row.into())
    }

    /// Apply a partial update, returning the updated template.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] when a renamed template
    /// collides with an existing name.
    pub async fn update(
        &self,
        id: PrintSizeId,
        patch: PrintSizePatch,
    ) -> Result<Option<PrintSize>, RepositoryError> {
        let row: Option<PrintSizeRow> = sqlx::query_as(
            "UPDATE print_sizes SET \
                 name = COALESCE($2, name), \
                 dimensions = COALESCE($3, dimensions), \
                 sort_order = COALESCE($4, sort_order) \
             WHERE id = $1 \
             RETURNING id, name, dimensions, sort_order, created_at",
        )
        .bind(id.as_uuid())
        .bind(patch.name)
        .bind(patch.dimensions)
        .bind(patch.sort_order)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "print size name already exists"))?;
        Ok(row.map(PrintSize::from))
    }

    /// Delete a template. Products that copied it are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: PrintSizeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM print_sizes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
