//! Print-size selection shaping for product creation.
//!
//! The admin product form shows one row per print-size template with a
//! checkbox, a quantity, and an additional price. [`shape_variants`] turns
//! those rows into the variant list persisted on the product: a row
//! contributes a variant iff it is checked AND has a positive quantity;
//! everything else is omitted entirely rather than stored as a zero-stock
//! variant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock-keeping sub-unit of a product, copied by value from a print-size
/// template at creation time.
///
/// `price_delta` is relative to the product's base price and is frozen at
/// creation; later edits to the template do not touch existing products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub label: String,
    pub quantity: u32,
    #[serde(default)]
    pub price_delta: Decimal,
}

/// One row of the product form's size table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSelection {
    /// Template name, e.g. "8x10".
    pub template_name: String,
    /// Display dimensions, e.g. "8\" x 10\"".
    pub dimensions: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub additional_price: Decimal,
}

impl SizeSelection {
    /// An unchecked row for a template.
    #[must_use]
    pub fn for_template(template_name: impl Into<String>, dimensions: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            dimensions: dimensions.into(),
            checked: false,
            quantity: 0,
            additional_price: Decimal::ZERO,
        }
    }

    /// Toggle the checkbox, keeping the quantity in sync.
    ///
    /// Checking defaults the quantity to 1 so a freshly-checked row is
    /// immediately includable; unchecking zeroes it. The two controls never
    /// disagree about whether the row is included.
    pub const fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        if checked {
            if self.quantity == 0 {
                self.quantity = 1;
            }
        } else {
            self.quantity = 0;
        }
    }

    /// Set the quantity, keeping the checkbox in sync.
    ///
    /// Entering a positive quantity checks the row; entering zero unchecks
    /// it.
    pub const fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.checked = quantity > 0;
    }

    /// Whether this row contributes a variant to the product.
    #[must_use]
    pub const fn included(&self) -> bool {
        self.checked && self.quantity > 0
    }
}

/// Convert form rows into the product's persisted variant list.
///
/// Output order follows input order. Duplicate template names are not
/// deduplicated here.
#[must_use]
pub fn shape_variants(selections: &[SizeSelection]) -> Vec<ProductVariant> {
    selections
        .iter()
        .filter(|selection| selection.included())
        .map(|selection| ProductVariant {
            label: selection.template_name.clone(),
            quantity: selection.quantity,
            price_delta: selection.additional_price,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn selection(name: &str, checked: bool, quantity: u32, price: Decimal) -> SizeSelection {
        SizeSelection {
            template_name: name.to_owned(),
            dimensions: String::new(),
            checked,
            quantity,
            additional_price: price,
        }
    }

    #[test]
    fn test_only_checked_positive_rows_contribute() {
        let variants = shape_variants(&[
            selection("8x10", true, 2, Decimal::ZERO),
            selection("11x14", true, 0, dec!(5)),
            selection("16x20", false, 3, dec!(10)),
        ]);

        assert_eq!(
            variants,
            vec![ProductVariant {
                label: "8x10".to_owned(),
                quantity: 2,
                price_delta: Decimal::ZERO,
            }]
        );
    }

    #[test]
    fn test_output_preserves_input_order() {
        let variants = shape_variants(&[
            selection("16x20", true, 1, dec!(10)),
            selection("8x10", true, 4, Decimal::ZERO),
        ]);
        let labels: Vec<_> = variants.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, ["16x20", "8x10"]);
    }

    #[test]
    fn test_checking_defaults_quantity_to_one() {
        let mut row = SizeSelection::for_template("8x10", "8\" x 10\"");
        row.set_checked(true);
        assert_eq!(row.quantity, 1);
        assert!(row.included());

        // Checking never clobbers a quantity the admin already typed.
        let mut row = selection("8x10", false, 7, Decimal::ZERO);
        row.set_checked(true);
        assert_eq!(row.quantity, 7);
    }

    #[test]
    fn test_positive_quantity_auto_checks() {
        let mut row = SizeSelection::for_template("8x10", "8\" x 10\"");
        row.set_quantity(3);
        assert!(row.checked);

        row.set_quantity(0);
        assert!(!row.checked);
        assert!(!row.included());
    }

    #[test]
    fn test_unchecking_zeroes_quantity() {
        let mut row = selection("8x10", true, 5, Decimal::ZERO);
        row.set_checked(false);
        assert_eq!(row.quantity, 0);
        assert!(!row.included());
    }

    #[test]
    fn test_duplicates_pass_through() {
        let variants = shape_variants(&[
            selection("8x10", true, 1, Decimal::ZERO),
            selection("8x10", true, 2, Decimal::ZERO),
        ]);
        assert_eq!(variants.len(), 2);
    }
}
