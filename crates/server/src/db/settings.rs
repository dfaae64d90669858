//! Settings singleton database operations.

use printworks_core::theme::ThemeConfig;
use sqlx::PgPool;
use sqlx::types::Json;

use super::RepositoryError;
use crate::models::Settings;

type SettingsRow = (
    String,
    Option<String>,
    String,
    String,
    String,
    Json<ThemeConfig>,
    chrono::DateTime<chrono::Utc>,
);

fn from_row(row: SettingsRow) -> Settings {
    let (
        shop_name,
        shop_logo,
        footer_text,
        stripe_publishable_key,
        stripe_secret_key,
        Json(theme),
        updated_at,
    ) = row;
    Settings {
        shop_name,
        shop_logo,
        footer_text,
        stripe_publishable_key,
        stripe_secret_key,
        theme,
        updated_at,
    }
}

/// Repository for the settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the settings record, creating the default row on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load(&self) -> Result<Settings, RepositoryError> {
        sqlx::query("INSERT INTO settings (id) VALUES (TRUE) ON CONFLICT (id) DO NOTHING")
            .execute(self.pool)
            .await?;

        let row: SettingsRow = sqlx::query_as(
            "SELECT shop_name, shop_logo, footer_text, stripe_publishable_key, \
                    stripe_secret_key, theme, updated_at \
             FROM settings WHERE id = TRUE",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(from_row(row))
    }

    /// Persist the whole settings record (last writer wins; there is no
    /// optimistic concurrency control on this singleton).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO settings \
                 (id, shop_name, shop_logo, footer_text, stripe_publishable_key, \
                  stripe_secret_key, theme, updated_at) \
             VALUES (TRUE, $1, $2, $3, $4, $5, $6, NOW()) \
             ON CONFLICT (id) DO UPDATE SET \
                 shop_name = $1, shop_logo = $2, footer_text = $3, \
                 stripe_publishable_key = $4, stripe_secret_key = $5, \
                 theme = $6, updated_at = NOW()",
        )
        .bind(&settings.shop_name)
        .bind(&settings.shop_logo)
        .bind(&settings.footer_text)
        .bind(&settings.stripe_publishable_key)
        .bind(&settings.stripe_secret_key)
        .bind(Json(&settings.theme))
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Replace only the theme document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn save_theme(&self, theme: &ThemeConfig) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO settings (id, theme, updated_at) VALUES (TRUE, $1, NOW()) \
             ON CONFLICT (id) DO UPDATE SET theme = $1, updated_at = NOW()",
        )
        .bind(Json(theme))
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
