//! Order database operations.

use printworks_core::{OrderId, OrderStatus, PaymentStatus};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderItem, ShippingAddress};

#[derive(FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    customer_name: String,
    customer_email: String,
    items: Json<Vec<OrderItem>>,
    total: Decimal,
    shipping_address: Json<ShippingAddress>,
    payment_status: String,
    order_status: String,
    payment_id: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let payment_status = row
            .payment_status
            .parse::<PaymentStatus>()
            .map_err(RepositoryError::Inconsistent)?;
        let order_status = row
            .order_status
            .parse::<OrderStatus>()
            .map_err(RepositoryError::Inconsistent)?;

        Ok(Self {
            id: OrderId::new(row.id),
            order_number: row.order_number,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            items: row.items.0,
            total: row.total,
            shipping_address: row.shipping_address.0,
            payment_status,
            order_status,
            payment_id: row.payment_id,
            created_at: row.created_at,
        })
    }
}

/// Repository for order snapshots.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, order_number, customer_name, customer_email, items, total, \
                    shipping_address, payment_status, order_status, payment_id, created_at \
             FROM orders ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    /// A customer's orders by email, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, order_number, customer_name, customer_email, items, total, \
                    shipping_address, payment_status, order_status, payment_id, created_at \
             FROM orders WHERE customer_email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    /// Advance an order's fulfillment status.
    ///
    /// Returns `Ok(None)` when no order has the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            "UPDATE orders SET order_status = $2 WHERE id = $1 \
             RETURNING id, order_number, customer_name, customer_email, items, total, \
                       shipping_address, payment_status, order_status, payment_id, created_at",
        )
        .bind(id.as_uuid())
        .bind(status.to_string())
        .fetch_optional(self.pool)
        .await?;
        row.map(Order::try_from).transpose()
    }
}

/// Insert the order snapshot inside an open transaction (checkout creates
/// the order, decrements stock, and clears the cart atomically).
///
/// # Errors
///
/// Returns [`RepositoryError::Conflict`] if the order number already exists
/// (a retried confirmation), or another error if the query fails.
pub async fn insert_in_tx(conn: &mut PgConnection, new: NewOrder) -> Result<Order, RepositoryError> {
    let row: OrderRow = sqlx::query_as(
        "INSERT INTO orders \
             (id, order_number, customer_name, customer_email, items, total, \
              shipping_address, payment_status, order_status, payment_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id, order_number, customer_name, customer_email, items, total, \
                   shipping_address, payment_status, order_status, payment_id, created_at",
    )
    .bind(OrderId::generate().as_uuid())
    .bind(&new.order_number)
    .bind(&new.customer_name)
    .bind(&new.customer_email)
    .bind(Json(&new.items))
    .bind(new.total)
    .bind(Json(&new.shipping_address))
    .bind(new.payment_status.to_string())
    .bind(OrderStatus::default().to_string())
    .bind(&new.payment_id)
    .fetch_one(conn)
    .await
    .map_err(|e| RepositoryError::from_sqlx(e, "order number already exists"))?;

    row.try_into()
}

/// Whether a payment id has already been turned into an order (confirmation
/// retries must not double-create).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn find_by_payment_id(
    pool: &PgPool,
    payment_id: &str,
) -> Result<Option<Order>, RepositoryError> {
    let row: Option<OrderRow> = sqlx::query_as(
        "SELECT id, order_number, customer_name, customer_email, items, total, \
                shipping_address, payment_status, order_status, payment_id, created_at \
         FROM orders WHERE payment_id = $1",
    )
    .bind(payment_id)
    .fetch_optional(pool)
    .await?;
    row.map(Order::try_from).transpose()
}
