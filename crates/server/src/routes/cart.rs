//! Cart route handlers.
//!
//! The cart is keyed by an opaque cart key stored in the session. Mutations
//! go through [`CartService`], which serializes them per cart and checks
//! stock inside the same transaction; handlers here only translate between
//! HTTP and the service.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use printworks_core::cart::Cart;
use printworks_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::db::carts::CartRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{Product, session_keys};
use crate::services::cart::CartService;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
    /// Current unit price: today's base price plus the delta recorded at
    /// add time.
    pub unit_price: Price,
    pub line_total: Price,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Price,
    pub item_count: u32,
}

impl CartView {
    /// Build the view by joining lines with current product records.
    ///
    /// Totals are computed here, at read time, from current base prices.
    /// Lines whose product has been deleted are dropped from the view.
    fn build(cart: &Cart, products: &HashMap<ProductId, Product>) -> Self {
        let items: Vec<CartItemView> = cart
            .lines()
            .iter()
            .filter_map(|line| {
                let product = products.get(&line.product_id)?;
                let unit_price = Price::new(product.price).plus(line.price_delta);
                Some(CartItemView {
                    product_id: line.product_id,
                    name: product.name.clone(),
                    image: product.images.first().cloned(),
                    quantity: line.quantity,
                    variant_label: line.variant_label.clone(),
                    unit_price,
                    line_total: unit_price.times(line.quantity),
                })
            })
            .collect();

        let total = items.iter().map(|item| item.line_total).sum();
        let item_count = items.iter().map(|item| item.quantity).sum();

        Self {
            items,
            total,
            item_count,
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the session's cart key, creating one on first use.
pub async fn get_or_create_cart_key(session: &Session) -> Result<String> {
    if let Ok(Some(key)) = session.get::<String>(session_keys::CART_KEY).await {
        return Ok(key);
    }

    let key = Uuid::new_v4().to_string();
    session
        .insert(session_keys::CART_KEY, &key)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist cart key: {e}")))?;
    Ok(key)
}

async fn render_cart(state: &AppState, cart: &Cart) -> Result<CartView> {
    let ids: Vec<ProductId> = cart.lines().iter().map(|line| line.product_id).collect();
    let products = ProductRepository::new(state.pool())
        .list_by_ids(&ids)
        .await?;
    let by_id: HashMap<ProductId, Product> = products.into_iter().map(|p| (p.id, p)).collect();
    Ok(CartView::build(cart, &by_id))
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
    /// Variant label; `size` kept as the wire name the storefront sends.
    #[serde(alias = "size")]
    pub variant_label: Option<String>,
}

/// Update cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub quantity: i64,
    #[serde(alias = "size")]
    pub variant_label: Option<String>,
}

/// Remove from cart query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartQuery {
    #[serde(alias = "size")]
    pub variant_label: Option<String>,
}

/// Display the session's cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart_key = get_or_create_cart_key(&session).await?;
    let cart = CartRepository::new(state.pool()).load(&cart_key).await?;
    Ok(Json(render_cart(&state, &cart).await?))
}

/// Add an item to the cart.
///
/// Fails whole-or-nothing: a quantity that would exceed available stock
/// leaves the cart untouched and reports how many are available.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let cart_key = get_or_create_cart_key(&session).await?;
    let quantity = request.quantity.unwrap_or(1);

    let cart = CartService::new(state.pool())
        .add(
            &cart_key,
            request.product_id,
            quantity,
            request.variant_label.as_deref(),
        )
        .await?;

    Ok(Json(render_cart(&state, &cart).await?))
}

/// Set the absolute quantity for a line; zero or less removes it.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let cart_key = get_or_create_cart_key(&session).await?;

    let cart = CartService::new(state.pool())
        .set_quantity(
            &cart_key,
            product_id,
            request.quantity,
            request.variant_label.as_deref(),
        )
        .await?;

    Ok(Json(render_cart(&state, &cart).await?))
}

/// Remove the line whose identity matches exactly.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
    Query(query): Query<RemoveFromCartQuery>,
) -> Result<Json<CartView>> {
    let cart_key = get_or_create_cart_key(&session).await?;

    let cart = CartService::new(state.pool())
        .remove(&cart_key, product_id, query.variant_label.as_deref())
        .await?;

    Ok(Json(render_cart(&state, &cart).await?))
}

/// Delete the whole cart.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<serde_json::Value>> {
    let cart_key = get_or_create_cart_key(&session).await?;
    CartService::new(state.pool()).clear(&cart_key).await?;
    Ok(Json(json!({ "message": "Cart cleared" })))
}
