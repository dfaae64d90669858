//! Settings route handlers: public storefront settings, the rendered theme
//! stylesheet, and the admin branding/design forms.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
};
use printworks_core::theme::{Preset, ThemeConfig, render_stylesheet};
use serde::Deserialize;
use tracing::instrument;

use crate::db::settings::SettingsRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::{PublicSettings, SettingsPatch};
use crate::services::uploads::ImageKind;
use crate::state::AppState;

/// Public storefront settings (read-only, unauthenticated).
#[instrument(skip(state))]
pub async fn public_settings(State(state): State<AppState>) -> Result<Json<PublicSettings>> {
    let settings = SettingsRepository::new(state.pool()).load().await?;
    Ok(Json(PublicSettings::from(settings)))
}

/// The storefront stylesheet rendered from the persisted theme.
///
/// Re-rendered per request from the current settings; the storefront links
/// this once and swaps it wholesale on theme changes.
#[instrument(skip(state))]
pub async fn theme_css(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let settings = SettingsRepository::new(state.pool()).load().await?;
    let css = render_stylesheet(&settings.theme.resolve());
    Ok((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        css,
    ))
}

/// Full settings record for the admin dashboard (secret key redacted).
#[instrument(skip(_admin, state))]
pub async fn admin_show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let settings = SettingsRepository::new(state.pool()).load().await?;
    let body = serde_json::to_value(settings.redacted())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}

/// Update shop branding from the admin form (multipart: text fields plus an
/// optional logo file).
///
/// Only supplied fields change; `removeLogo=true` clears the logo. Legacy
/// flat theme fields land on the stored theme document, where the resolve
/// step applies the colors-namespace precedence rule.
#[instrument(skip(_admin, state, multipart))]
pub async fn admin_update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    let mut patch = SettingsPatch::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "logo" {
            let original_name = field.file_name().unwrap_or("logo").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            let url = state
                .uploads()
                .store(ImageKind::Logo, &original_name, &bytes)
                .await?;
            patch.shop_logo = Some(url);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        match name.as_str() {
            "shopName" => patch.shop_name = Some(value),
            "footerText" => patch.footer_text = Some(value),
            "stripePublishableKey" => patch.stripe_publishable_key = Some(value),
            "stripeSecretKey" => patch.stripe_secret_key = Some(value),
            "headerColor" => patch.header_color = Some(value),
            "buttonColor" => patch.button_color = Some(value),
            "fontFamily" => patch.font_family = Some(value),
            "removeLogo" => patch.remove_logo = value == "true",
            _ => {}
        }
    }

    let repo = SettingsRepository::new(state.pool());
    let mut settings = repo.load().await?;
    patch.apply(&mut settings);
    repo.save(&settings).await?;

    let body = serde_json::to_value(settings.redacted())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}

/// Design update request body.
#[derive(Debug, Deserialize)]
pub struct DesignRequest {
    pub theme: ThemeConfig,
}

/// Replace the namespaced theme document from the admin design page.
#[instrument(skip(_admin, state, request))]
pub async fn admin_update_design(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(request): Json<DesignRequest>,
) -> Result<Json<serde_json::Value>> {
    let repo = SettingsRepository::new(state.pool());
    repo.save_theme(&request.theme).await?;

    let settings = repo.load().await?;
    let body = serde_json::to_value(settings.redacted())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}

/// Render a draft theme to CSS without persisting anything.
///
/// The design page points its preview frame's stylesheet at this output, so
/// a draft is never visible to shoppers.
#[instrument(skip(_admin, request))]
pub async fn preview_design(
    RequireAdminAuth(_admin): RequireAdminAuth,
    Json(request): Json<DesignRequest>,
) -> impl IntoResponse {
    let css = render_stylesheet(&request.theme.resolve());
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css)
}

/// A named preset merged over the default preset, for the design page to
/// load into its form.
#[instrument(skip(_admin))]
pub async fn preset(
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(name): Path<String>,
) -> Result<Json<ThemeConfig>> {
    let preset = name
        .parse::<Preset>()
        .map_err(|_| AppError::NotFound(format!("Unknown preset: {name}")))?;
    Ok(Json(preset.apply()))
}
