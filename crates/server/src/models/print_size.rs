//! Print-size templates.
//!
//! Templates populate the per-product size picker at creation time and are
//! copied by value into each product's variants, so they have a fully
//! independent lifecycle: deleting a template never touches products that
//! used it.

use chrono::{DateTime, Utc};
use printworks_core::PrintSizeId;
use serde::Serialize;

/// A named print-size template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSize {
    pub id: PrintSizeId,
    /// Unique display name, e.g. "8x10".
    pub name: String,
    /// Physical dimensions, e.g. "8\" x 10\"".
    pub dimensions: String,
    /// Position in pickers; lower sorts first.
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}
