//! Transactional cart reconciliation.
//!
//! Each mutation runs in one transaction: the cart row is locked, the stock
//! snapshot is read inside the same transaction, the pure reconciliation in
//! `printworks_core::cart` is applied, and the result is persisted. Either
//! the whole requested change applies or none of it does.

use printworks_core::ProductId;
use printworks_core::cart::{Cart, StockSnapshot};
use sqlx::PgPool;

use crate::db::{RepositoryError, carts, products};
use crate::error::AppError;
use crate::models::{Product, StockLookupError};

/// Cart mutation service.
pub struct CartService<'a> {
    pool: &'a PgPool,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Merge a requested addition into the session's cart.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown products or variants, `Validation` when a
    /// variant product is addressed without a size, `CapacityExceeded` when
    /// the merged quantity would pass available stock.
    pub async fn add(
        &self,
        cart_key: &str,
        product_id: ProductId,
        quantity: u32,
        variant_label: Option<&str>,
    ) -> Result<Cart, AppError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::Database)?;

        let mut cart = carts::load_for_update(&mut tx, cart_key).await?;
        let product = products::fetch_in_tx(&mut tx, product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
        let stock = lookup_stock(&product, variant_label)?;

        cart.add(product_id, quantity, variant_label, stock)?;

        carts::save(&mut tx, cart_key, &cart).await?;
        tx.commit().await.map_err(RepositoryError::Database)?;
        Ok(cart)
    }

    /// Set the absolute quantity for a line identity; zero or less removes
    /// the line.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`CartService::add`], plus `NotFound` when the line
    /// is absent from the cart.
    pub async fn set_quantity(
        &self,
        cart_key: &str,
        product_id: ProductId,
        quantity: i64,
        variant_label: Option<&str>,
    ) -> Result<Cart, AppError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::Database)?;

        let mut cart = carts::load_for_update(&mut tx, cart_key).await?;

        // Removal needs no stock; it must keep working for a line whose
        // product was deleted after it was added.
        let stock = if quantity > 0 {
            let product = products::fetch_in_tx(&mut tx, product_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
            lookup_stock(&product, variant_label)?
        } else {
            StockSnapshot {
                available: 0,
                price_delta: rust_decimal::Decimal::ZERO,
            }
        };

        cart.set_quantity(product_id, variant_label, quantity, stock)?;

        carts::save(&mut tx, cart_key, &cart).await?;
        tx.commit().await.map_err(RepositoryError::Database)?;
        Ok(cart)
    }

    /// Delete the line whose identity matches exactly.
    ///
    /// # Errors
    ///
    /// `NotFound` when no line has the identity.
    pub async fn remove(
        &self,
        cart_key: &str,
        product_id: ProductId,
        variant_label: Option<&str>,
    ) -> Result<Cart, AppError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::Database)?;

        let mut cart = carts::load_for_update(&mut tx, cart_key).await?;
        cart.remove(product_id, variant_label)?;

        carts::save(&mut tx, cart_key, &cart).await?;
        tx.commit().await.map_err(RepositoryError::Database)?;
        Ok(cart)
    }

    /// Delete the whole cart record for the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn clear(&self, cart_key: &str) -> Result<(), AppError> {
        carts::CartRepository::new(self.pool).delete(cart_key).await?;
        Ok(())
    }
}

/// Translate a stock lookup failure into the API taxonomy.
pub fn lookup_stock(
    product: &Product,
    variant_label: Option<&str>,
) -> Result<StockSnapshot, AppError> {
    product.stock_for(variant_label).map_err(|e| match e {
        StockLookupError::VariantRequired => {
            AppError::Validation("size is required for this product".to_owned())
        }
        StockLookupError::UnknownVariant => {
            AppError::NotFound("Size not found for this product".to_owned())
        }
    })
}
