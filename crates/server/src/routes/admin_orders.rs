//! Admin order management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use printworks_core::{OrderId, OrderStatus};
use serde::Deserialize;
use tracing::instrument;

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::Order;
use crate::state::AppState;

/// All orders, newest first.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// Order status update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub order_status: OrderStatus,
}

/// Advance an order's fulfillment status.
#[instrument(skip(_admin, state))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, request.order_status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;
    Ok(Json(order))
}
