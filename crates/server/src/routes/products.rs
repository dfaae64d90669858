//! Public catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use printworks_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Fixed category list offered by the storefront filter.
const CATEGORIES: &[&str] = &[
    "All",
    "Electronics",
    "Clothing",
    "Books",
    "Home",
    "Sports",
    "Other",
];

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// List products with optional search and category filters.
///
/// `category=All` means no category filter, matching the storefront's
/// default filter value.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let category = query
        .category
        .as_deref()
        .filter(|category| *category != "All");

    let products = ProductRepository::new(state.pool())
        .list(query.search.as_deref(), category)
        .await?;

    Ok(Json(products))
}

/// Fetch a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
    Ok(Json(product))
}

/// The storefront's category filter options.
#[instrument]
pub async fn categories() -> Json<Vec<&'static str>> {
    Json(CATEGORIES.to_vec())
}
