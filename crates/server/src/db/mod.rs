//! Database operations for the shop's `PostgreSQL` database.
//!
//! # Tables
//!
//! - `products` - Catalog records (images and variants as JSONB documents)
//! - `print_sizes` - Variant templates for the admin product form
//! - `settings` - Singleton shop settings (theme as a JSONB document)
//! - `carts` - One row per cart key, lines as a JSONB document
//! - `orders` - Immutable purchase snapshots
//! - `admin_users` - Admin accounts for the dashboard
//! - tower-sessions' own session table (created by the store's `migrate()`)
//!
//! Repositories expose find-by-id / find-by-filter / save semantics over
//! those documents. Queries are runtime-bound (`sqlx::query_as` with
//! `FromRow`), so building the crate needs no live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p printworks-cli -- migrate
//! ```

pub mod admin_users;
pub mod carts;
pub mod orders;
pub mod print_sizes;
pub mod products;
pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("inconsistent record: {0}")]
    Inconsistent(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to [`RepositoryError::Conflict`].
    pub(crate) fn from_sqlx(err: sqlx::Error, conflict_message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(conflict_message.to_owned())
            }
            _ => Self::Database(err),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
