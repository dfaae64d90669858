//! Print-size template route handlers.
//!
//! Listing is public (the storefront shows size availability); mutations are
//! admin-only.

use axum::{
    Json,
    extract::{Path, State},
};
use printworks_core::PrintSizeId;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::db::print_sizes::{PrintSizePatch, PrintSizeRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::PrintSize;
use crate::state::AppState;

/// List templates in picker order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PrintSize>>> {
    let sizes = PrintSizeRepository::new(state.pool()).list().await?;
    Ok(Json(sizes))
}

/// Create print size request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrintSizeRequest {
    pub name: String,
    pub dimensions: String,
    #[serde(default, alias = "order")]
    pub sort_order: i32,
}

/// Update print size request body; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrintSizeRequest {
    pub name: Option<String>,
    pub dimensions: Option<String>,
    #[serde(alias = "order")]
    pub sort_order: Option<i32>,
}

/// Create a template.
#[instrument(skip(_admin, state))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(request): Json<CreatePrintSizeRequest>,
) -> Result<(axum::http::StatusCode, Json<PrintSize>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_owned()));
    }
    if request.dimensions.trim().is_empty() {
        return Err(AppError::Validation("dimensions is required".to_owned()));
    }

    let size = PrintSizeRepository::new(state.pool())
        .create(&request.name, &request.dimensions, request.sort_order)
        .await
        .map_err(conflict_to_validation)?;

    Ok((axum::http::StatusCode::CREATED, Json(size)))
}

/// Update a template.
#[instrument(skip(_admin, state))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<PrintSizeId>,
    Json(request): Json<UpdatePrintSizeRequest>,
) -> Result<Json<PrintSize>> {
    let patch = PrintSizePatch {
        name: request.name,
        dimensions: request.dimensions,
        sort_order: request.sort_order,
    };

    let size = PrintSizeRepository::new(state.pool())
        .update(id, patch)
        .await
        .map_err(conflict_to_validation)?
        .ok_or_else(|| AppError::NotFound("Print size not found".to_owned()))?;

    Ok(Json(size))
}

/// Delete a template. Products that already copied it are untouched.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<PrintSizeId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = PrintSizeRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Print size not found".to_owned()));
    }
    Ok(Json(json!({ "message": "Print size deleted" })))
}

/// A duplicate name is caller-correctable, so it surfaces as a 400 rather
/// than a server error.
fn conflict_to_validation(err: crate::db::RepositoryError) -> AppError {
    match err {
        crate::db::RepositoryError::Conflict(message) => AppError::Validation(message),
        other => AppError::Repository(other),
    }
}
