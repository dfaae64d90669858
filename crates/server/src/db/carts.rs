//! Cart persistence keyed by the session's cart key.
//!
//! Mutations go through [`load_for_update`]/[`save`] inside one transaction:
//! the row lock serializes concurrent mutations against the same cart, so
//! two simultaneous adds cannot both pass the capacity check against a stale
//! stock snapshot.

use printworks_core::cart::{Cart, CartLine};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use super::RepositoryError;

/// Repository for cart records.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read a cart without locking (plain cart views).
    ///
    /// A missing row is an empty cart; the record is created lazily on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load(&self, cart_key: &str) -> Result<Cart, RepositoryError> {
        let row: Option<(Json<Vec<CartLine>>,)> =
            sqlx::query_as("SELECT lines FROM carts WHERE cart_key = $1")
                .bind(cart_key)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map_or_else(Cart::new, |(Json(lines),)| Cart::from_lines(lines)))
    }

    /// Delete the cart record entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, cart_key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM carts WHERE cart_key = $1")
            .bind(cart_key)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

/// Load a cart with its row locked for the rest of the transaction.
///
/// Creates the row first if it does not exist so there is always something
/// to lock.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn load_for_update(
    conn: &mut PgConnection,
    cart_key: &str,
) -> Result<Cart, RepositoryError> {
    sqlx::query("INSERT INTO carts (cart_key) VALUES ($1) ON CONFLICT (cart_key) DO NOTHING")
        .bind(cart_key)
        .execute(&mut *conn)
        .await?;

    let (Json(lines),): (Json<Vec<CartLine>>,) =
        sqlx::query_as("SELECT lines FROM carts WHERE cart_key = $1 FOR UPDATE")
            .bind(cart_key)
            .fetch_one(conn)
            .await?;

    Ok(Cart::from_lines(lines))
}

/// Persist a cart inside the open transaction.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn save(
    conn: &mut PgConnection,
    cart_key: &str,
    cart: &Cart,
) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE carts SET lines = $2, updated_at = NOW() WHERE cart_key = $1")
        .bind(cart_key)
        .bind(Json(cart.lines()))
        .execute(conn)
        .await?;
    Ok(())
}

/// Delete the cart record inside the open transaction (checkout clears the
/// cart in the same transaction that decrements stock).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn delete_in_tx(conn: &mut PgConnection, cart_key: &str) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM carts WHERE cart_key = $1")
        .bind(cart_key)
        .execute(conn)
        .await?;
    Ok(())
}
