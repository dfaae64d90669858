//! Admin product management route handlers.
//!
//! Create and update take multipart forms: text fields plus any number of
//! `images` files. Stock arrives either as a flat `quantity` field or as a
//! `sizes` field holding the JSON rows of the size table, which are shaped
//! into variants (checked AND quantity > 0, everything else omitted).

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use printworks_core::ProductId;
use printworks_core::variants::{SizeSelection, shape_variants};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::instrument;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::{NewProduct, Product, ProductPatch, Stock};
use crate::services::uploads::ImageKind;
use crate::state::AppState;

/// Accumulated multipart form state shared by create and update.
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    category: Option<String>,
    quantity: Option<u32>,
    sizes: Option<Vec<SizeSelection>>,
    images: Vec<String>,
}

impl ProductForm {
    /// Read the whole multipart stream, storing image files as they arrive.
    async fn read(state: &AppState, multipart: &mut Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "images" || name == "image" {
                let original_name = field.file_name().unwrap_or("image").to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                let url = state
                    .uploads()
                    .store(ImageKind::Product, &original_name, &bytes)
                    .await?;
                form.images.push(url);
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            match name.as_str() {
                "name" => form.name = Some(value),
                "description" => form.description = Some(value),
                "price" => {
                    form.price = Some(value.parse::<Decimal>().map_err(|_| {
                        AppError::Validation(format!("invalid price: {value}"))
                    })?);
                }
                "category" => form.category = Some(value),
                "quantity" => {
                    form.quantity = Some(value.parse::<u32>().map_err(|_| {
                        AppError::Validation(format!("invalid quantity: {value}"))
                    })?);
                }
                "sizes" => {
                    let selections: Vec<SizeSelection> = serde_json::from_str(&value)
                        .map_err(|e| AppError::Validation(format!("invalid sizes payload: {e}")))?;
                    form.sizes = Some(selections);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Resolve the stock representation; exactly one shape allowed.
    fn stock(&self) -> Result<Option<Stock>> {
        match (self.quantity, &self.sizes) {
            (Some(_), Some(_)) => Err(AppError::Validation(
                "provide either a quantity or sizes, not both".to_owned(),
            )),
            (Some(quantity), None) => Ok(Some(Stock::Flat { quantity })),
            (None, Some(selections)) => Ok(Some(Stock::Variants {
                variants: shape_variants(selections),
            })),
            (None, None) => Ok(None),
        }
    }
}

/// Create a product.
#[instrument(skip(_admin, state, multipart))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Product>)> {
    let form = ProductForm::read(&state, &mut multipart).await?;

    let name = require(form.name.clone(), "name")?;
    let description = require(form.description.clone(), "description")?;
    let price = form
        .price
        .ok_or_else(|| AppError::Validation("price is required".to_owned()))?;
    let stock = form
        .stock()?
        .ok_or_else(|| AppError::Validation("a quantity or sizes payload is required".to_owned()))?;

    let product = ProductRepository::new(state.pool())
        .insert(NewProduct {
            name,
            description,
            price,
            category: form.category,
            images: form.images,
            stock,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product; only supplied fields change. New image files replace
/// the image list.
#[instrument(skip(_admin, state, multipart))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    mut multipart: Multipart,
) -> Result<Json<Product>> {
    let form = ProductForm::read(&state, &mut multipart).await?;

    let patch = ProductPatch {
        name: form.name.clone(),
        description: form.description.clone(),
        price: form.price,
        category: form.category.clone(),
        images: (!form.images.is_empty()).then(|| form.images.clone()),
        stock: form.stock()?,
    };

    let product = ProductRepository::new(state.pool())
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// Delete a product. Orders keep their denormalized snapshots.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }
    Ok(Json(json!({ "message": "Product deleted" })))
}

fn require(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
