//! Order records.
//!
//! An order is an immutable snapshot taken at checkout confirmation. Line
//! items carry denormalized name/price/quantity so later catalog edits and
//! deletions never rewrite purchase history; only `order_status` advances
//! after creation.

use chrono::{DateTime, Utc};
use printworks_core::{OrderId, OrderStatus, PaymentStatus, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One denormalized order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price at purchase time (base price plus variant delta).
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
}

/// Customer shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A finalized purchase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating an order snapshot.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
}

/// Generate an order number like `PW-1722787200-4821`.
///
/// Unique enough for a single shop; the database's unique constraint is the
/// actual guard.
#[must_use]
pub fn generate_order_number() -> String {
    use rand::Rng;

    let timestamp = Utc::now().timestamp();
    let suffix: u16 = rand::rng().random_range(1000..10000);
    format!("PW-{timestamp}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("PW-"));
        assert_eq!(number.split('-').count(), 3);
    }
}
