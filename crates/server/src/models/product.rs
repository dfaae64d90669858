//! Product catalog records.

use chrono::{DateTime, Utc};
use printworks_core::cart::StockSnapshot;
use printworks_core::variants::ProductVariant;
use printworks_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product's stock representation.
///
/// Exactly one of the two shapes at a time: a flat quantity, or a list of
/// named variants each with its own quantity and price delta. The database
/// enforces the same exclusivity with a check constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum Stock {
    Flat { quantity: u32 },
    Variants { variants: Vec<ProductVariant> },
}

impl Stock {
    /// Total available units across the representation.
    #[must_use]
    pub fn total(&self) -> u32 {
        match self {
            Self::Flat { quantity } => *quantity,
            Self::Variants { variants } => variants.iter().map(|v| v.quantity).sum(),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ordered image URLs; the first is the primary image.
    pub images: Vec<String>,
    #[serde(flatten)]
    pub stock: Stock,
    pub created_at: DateTime<Utc>,
}

/// Reasons a line identity cannot be priced against a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLookupError {
    /// The product has variants and the request named none.
    VariantRequired,
    /// The named variant does not exist (or a variant was named on a
    /// flat-stock product).
    UnknownVariant,
}

impl Product {
    /// Look up the stock snapshot for one line identity.
    ///
    /// A flat-stock line and a variant line are distinct identities: naming
    /// a variant on a flat-stock product fails, as does omitting the variant
    /// on a product that has them.
    ///
    /// # Errors
    ///
    /// Returns [`StockLookupError`] when the identity does not fit the
    /// product's stock shape.
    pub fn stock_for(&self, variant_label: Option<&str>) -> Result<StockSnapshot, StockLookupError> {
        match (&self.stock, variant_label) {
            (Stock::Flat { quantity }, None) => Ok(StockSnapshot {
                available: *quantity,
                price_delta: Decimal::ZERO,
            }),
            (Stock::Flat { .. }, Some(_)) => Err(StockLookupError::UnknownVariant),
            (Stock::Variants { .. }, None) => Err(StockLookupError::VariantRequired),
            (Stock::Variants { variants }, Some(label)) => variants
                .iter()
                .find(|v| v.label == label)
                .map(|v| StockSnapshot {
                    available: v.quantity,
                    price_delta: v.price_delta,
                })
                .ok_or(StockLookupError::UnknownVariant),
        }
    }

    /// Whether any unit of any identity is available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.total() > 0
    }
}

/// Fields for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub stock: Stock,
}

/// Partial update for a product; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock: Option<Stock>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(stock: Stock) -> Product {
        Product {
            id: ProductId::generate(),
            name: "Harbor at Dusk".to_owned(),
            description: "Giclée print".to_owned(),
            price: dec!(45),
            category: None,
            images: vec!["/uploads/harbor.jpg".to_owned()],
            stock,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_stock_sums_variants() {
        let p = product(Stock::Variants {
            variants: vec![
                ProductVariant {
                    label: "8x10".to_owned(),
                    quantity: 2,
                    price_delta: Decimal::ZERO,
                },
                ProductVariant {
                    label: "11x14".to_owned(),
                    quantity: 3,
                    price_delta: dec!(5),
                },
            ],
        });
        assert_eq!(p.stock.total(), 5);
        assert!(p.in_stock());
    }

    #[test]
    fn test_stock_for_enforces_identity_shape() {
        let flat = product(Stock::Flat { quantity: 4 });
        assert_eq!(flat.stock_for(None).map(|s| s.available), Ok(4));
        assert_eq!(
            flat.stock_for(Some("8x10")),
            Err(StockLookupError::UnknownVariant)
        );

        let sized = product(Stock::Variants {
            variants: vec![ProductVariant {
                label: "8x10".to_owned(),
                quantity: 2,
                price_delta: dec!(5),
            }],
        });
        assert_eq!(sized.stock_for(None), Err(StockLookupError::VariantRequired));
        assert_eq!(
            sized.stock_for(Some("8x10")).map(|s| s.price_delta),
            Ok(dec!(5))
        );
        assert_eq!(
            sized.stock_for(Some("16x20")),
            Err(StockLookupError::UnknownVariant)
        );
    }
}
