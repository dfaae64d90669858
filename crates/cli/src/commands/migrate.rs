//! Run the shop database migrations.

use tracing::info;

use printworks_server::db;

use super::CommandError;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    let pool = db::create_pool(&database_url).await?;
    info!("Running shop database migrations");
    db::run_migrations(&pool).await?;
    info!("Migrations complete");

    Ok(())
}
