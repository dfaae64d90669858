//! Checkout route handlers.
//!
//! Two-step flow against the hosted payment provider: create a checkout
//! session from the cart, then confirm it after the customer returns. The
//! confirmation creates the order snapshot, decrements stock, and clears the
//! cart in one transaction; the confirmation email is fire-and-forget.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use printworks_core::{PaymentStatus, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::carts::CartRepository;
use crate::db::products::{self, ProductRepository};
use crate::db::orders::{self, OrderRepository};
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::{
    NewOrder, Order, OrderItem, Product, ShippingAddress, order::generate_order_number,
};
use crate::routes::cart::get_or_create_cart_key;
use crate::services::cart::lookup_stock;
use crate::services::payments::CheckoutLineItem;
use crate::state::AppState;

/// Checkout session request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: ShippingAddress,
}

/// Checkout session response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
}

/// Confirmation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub session_id: String,
}

/// Create a hosted checkout session from the cart.
///
/// No side effect on failure: a provider rejection leaves cart and stock
/// untouched.
#[instrument(skip(state, session, request))]
pub async fn create_session(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>> {
    if request.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customer name is required".to_owned()));
    }

    let cart_key = get_or_create_cart_key(&session).await?;
    let cart = CartRepository::new(state.pool()).load(&cart_key).await?;
    if cart.is_empty() {
        return Err(AppError::Validation("Cart is empty".to_owned()));
    }

    let products = load_cart_products(&state, cart.lines().iter().map(|l| l.product_id)).await?;

    let mut line_items = Vec::with_capacity(cart.lines().len());
    for line in cart.lines() {
        let product = products
            .get(&line.product_id)
            .ok_or_else(|| AppError::Validation("cart contains an unavailable product".to_owned()))?;
        let name = line.variant_label.as_deref().map_or_else(
            || product.name.clone(),
            |label| format!("{} ({label})", product.name),
        );
        line_items.push(CheckoutLineItem {
            name,
            unit_price: Price::new(product.price).plus(line.price_delta),
            quantity: line.quantity,
        });
    }

    let shipping_json = serde_json::to_string(&request.shipping_address)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let metadata = HashMap::from([
        ("customerName".to_owned(), request.customer_name.clone()),
        ("shippingAddress".to_owned(), shipping_json),
    ]);

    let base = &state.config().base_url;
    let success_url = format!("{base}/checkout.html?success=true&session_id={{CHECKOUT_SESSION_ID}}");
    let cancel_url = format!("{base}/checkout.html?canceled=true");

    let checkout = state
        .payments()
        .create_checkout_session(
            &line_items,
            &request.customer_email,
            &success_url,
            &cancel_url,
            &metadata,
        )
        .await?;

    Ok(Json(CreateSessionResponse {
        session_id: checkout.id,
        checkout_url: checkout.url,
    }))
}

/// Confirm a paid checkout session: snapshot the order, take the stock, and
/// clear the cart atomically.
///
/// Retries with an already-confirmed session return the existing order
/// instead of double-creating.
#[instrument(skip(state, session, request))]
pub async fn confirm(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<Order>> {
    let checkout = state
        .payments()
        .get_checkout_session(&request.session_id)
        .await?;
    if !checkout.is_paid() {
        return Err(AppError::Validation("Payment not completed".to_owned()));
    }

    if let Some(existing) = orders::find_by_payment_id(state.pool(), &request.session_id).await? {
        return Ok(Json(existing));
    }

    let cart_key = get_or_create_cart_key(&session).await?;
    let cart = CartRepository::new(state.pool()).load(&cart_key).await?;
    if cart.is_empty() {
        return Err(AppError::NotFound("Cart not found".to_owned()));
    }

    let customer_name = checkout
        .metadata
        .get("customerName")
        .cloned()
        .unwrap_or_else(|| "Customer".to_owned());
    let customer_email = checkout
        .customer_email
        .clone()
        .ok_or_else(|| AppError::Validation("checkout session has no customer email".to_owned()))?;
    let shipping_address: ShippingAddress = checkout
        .metadata
        .get("shippingAddress")
        .ok_or_else(|| AppError::Validation("checkout session has no shipping address".to_owned()))
        .and_then(|raw| {
            serde_json::from_str(raw)
                .map_err(|e| AppError::Validation(format!("malformed shipping address: {e}")))
        })?;

    let mut tx = state
        .pool()
        .begin()
        .await
        .map_err(RepositoryError::Database)?;

    // Price and availability are both read inside the transaction so the
    // snapshot the customer pays for is the one that gets stored.
    let mut items = Vec::with_capacity(cart.lines().len());
    let mut total = Decimal::ZERO;
    for line in cart.lines() {
        let product = products::fetch_in_tx(&mut tx, line.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
        let stock = lookup_stock(&product, line.variant_label.as_deref())?;
        if stock.available < line.quantity {
            return Err(AppError::CapacityExceeded {
                available: stock.available,
            });
        }

        let taken =
            products::decrement_stock(&mut tx, line.product_id, line.variant_label.as_deref(), line.quantity)
                .await?;
        if !taken {
            return Err(AppError::CapacityExceeded {
                available: stock.available,
            });
        }

        let unit_price = product.price + line.price_delta;
        total += unit_price * Decimal::from(line.quantity);
        items.push(OrderItem {
            product_id: line.product_id,
            name: product.name,
            price: unit_price,
            quantity: line.quantity,
            variant_label: line.variant_label.clone(),
        });
    }

    let order = orders::insert_in_tx(
        &mut tx,
        NewOrder {
            order_number: generate_order_number(),
            customer_name,
            customer_email,
            items,
            total,
            shipping_address,
            payment_status: PaymentStatus::Completed,
            payment_id: Some(request.session_id),
        },
    )
    .await?;

    crate::db::carts::delete_in_tx(&mut tx, &cart_key).await?;
    tx.commit().await.map_err(RepositoryError::Database)?;

    // Fire-and-forget: a failed email is logged, the order still succeeded.
    let mail_state = state.clone();
    let mail_order = order.clone();
    tokio::spawn(async move {
        if let Some(mailer) = mail_state.mailer() {
            if let Err(e) = mailer.send_order_confirmation(&mail_order).await {
                tracing::warn!(
                    order_number = %mail_order.order_number,
                    "failed to send order confirmation: {e}"
                );
            }
        }
    });

    Ok(Json(order))
}

/// Order history query parameters.
#[derive(Debug, Deserialize)]
pub struct MyOrdersQuery {
    pub email: String,
}

/// A customer's past orders by email.
#[instrument(skip(state))]
pub async fn my_orders(
    State(state): State<AppState>,
    Query(query): Query<MyOrdersQuery>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_by_email(&query.email)
        .await?;
    Ok(Json(orders))
}

async fn load_cart_products(
    state: &AppState,
    ids: impl Iterator<Item = ProductId>,
) -> Result<HashMap<ProductId, Product>> {
    let ids: Vec<ProductId> = ids.collect();
    let products = ProductRepository::new(state.pool())
        .list_by_ids(&ids)
        .await?;
    Ok(products.into_iter().map(|p| (p.id, p)).collect())
}
