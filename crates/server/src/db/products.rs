//! Product catalog database operations.

use printworks_core::ProductId;
use printworks_core::variants::ProductVariant;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductPatch, Stock};

/// Raw row shape; JSONB documents decoded separately from the model.
#[derive(FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    category: Option<String>,
    images: Json<Vec<String>>,
    quantity: Option<i32>,
    variants: Option<Json<Vec<ProductVariant>>>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let stock = match (row.quantity, row.variants) {
            (Some(quantity), None) => Stock::Flat {
                quantity: u32::try_from(quantity).unwrap_or(0),
            },
            (None, Some(Json(variants))) => Stock::Variants { variants },
            _ => {
                return Err(RepositoryError::Inconsistent(format!(
                    "product {} has no single stock representation",
                    row.id
                )));
            }
        };

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            images: row.images.0,
            stock,
            created_at: row.created_at,
        })
    }
}

fn stock_columns(stock: &Stock) -> (Option<i32>, Option<Json<&Vec<ProductVariant>>>) {
    match stock {
        Stock::Flat { quantity } => (Some(i32::try_from(*quantity).unwrap_or(i32::MAX)), None),
        Stock::Variants { variants } => (None, Some(Json(variants))),
    }
}

/// Repository for product records.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by a search term (matched against
    /// name and description) and a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let pattern = search.map(|s| format!("%{s}%"));
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, category, images, quantity, variants, created_at \
             FROM products \
             WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1) \
               AND ($2::text IS NULL OR category = $2) \
             ORDER BY created_at DESC",
        )
        .bind(pattern)
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Fetch a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, category, images, quantity, variants, created_at \
             FROM products WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn insert(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let id = ProductId::generate();
        let (quantity, variants) = stock_columns(&new.stock);

        let row: ProductRow = sqlx::query_as(
            "INSERT INTO products (id, name, description, price, category, images, quantity, variants) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, name, description, price, category, images, quantity, variants, created_at",
        )
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.category)
        .bind(Json(&new.images))
        .bind(quantity)
        .bind(variants)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Apply a partial update, returning the updated product.
    ///
    /// Returns `Ok(None)` when no product has the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let Some(mut product) = self.get(id).await? else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = Some(category);
        }
        if let Some(images) = patch.images {
            product.images = images;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }

        let (quantity, variants) = stock_columns(&product.stock);
        sqlx::query(
            "UPDATE products \
             SET name = $2, description = $3, price = $4, category = $5, images = $6, \
                 quantity = $7, variants = $8 \
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .bind(Json(&product.images))
        .bind(quantity)
        .bind(variants)
        .execute(self.pool)
        .await?;

        Ok(Some(product))
    }

    /// Delete a product. Past orders keep their denormalized copies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch a batch of products by id (order unspecified).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let uuids: Vec<Uuid> = ids.iter().map(ProductId::as_uuid).collect();
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, category, images, quantity, variants, created_at \
             FROM products WHERE id = ANY($1)",
        )
        .bind(&uuids)
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

}

/// Fetch a product inside an open transaction (used by cart mutations so the
/// stock snapshot and the cart write observe one consistent state).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn fetch_in_tx(
    conn: &mut PgConnection,
    id: ProductId,
) -> Result<Option<Product>, RepositoryError> {
    let row: Option<ProductRow> = sqlx::query_as(
        "SELECT id, name, description, price, category, images, quantity, variants, created_at \
         FROM products WHERE id = $1",
    )
    .bind(id.as_uuid())
    .fetch_optional(conn)
    .await?;

    row.map(Product::try_from).transpose()
}

/// Atomically take `quantity` units from one line identity's stock.
///
/// Flat stock uses a conditional `UPDATE ... WHERE quantity >= n`; variant
/// stock locks the row, edits the document, and writes it back. Returns
/// `false` (with no write) when stock is short or the identity is unknown.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn decrement_stock(
    conn: &mut PgConnection,
    id: ProductId,
    variant_label: Option<&str>,
    quantity: u32,
) -> Result<bool, RepositoryError> {
    let Some(label) = variant_label else {
        let taken = i32::try_from(quantity).unwrap_or(i32::MAX);
        let result = sqlx::query(
            "UPDATE products SET quantity = quantity - $2 WHERE id = $1 AND quantity >= $2",
        )
        .bind(id.as_uuid())
        .bind(taken)
        .execute(conn)
        .await?;
        return Ok(result.rows_affected() > 0);
    };

    let row: Option<(Json<Vec<ProductVariant>>,)> =
        sqlx::query_as("SELECT variants FROM products WHERE id = $1 AND variants IS NOT NULL FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *conn)
            .await?;

    let Some((Json(mut variants),)) = row else {
        return Ok(false);
    };

    let Some(variant) = variants
        .iter_mut()
        .find(|v| v.label == label && v.quantity >= quantity)
    else {
        return Ok(false);
    };
    variant.quantity -= quantity;

    sqlx::query("UPDATE products SET variants = $2 WHERE id = $1")
        .bind(id.as_uuid())
        .bind(Json(&variants))
        .execute(conn)
        .await?;

    Ok(true)
}
