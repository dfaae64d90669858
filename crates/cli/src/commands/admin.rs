//! Admin account management.

use tracing::info;

use printworks_server::db;
use printworks_server::services::auth::AuthService;

use super::CommandError;

/// Create an admin account.
///
/// # Errors
///
/// Returns an error if the email is taken, the password is too weak, or the
/// database is unreachable.
pub async fn create(email: &str, name: &str, password: &str) -> Result<(), CommandError> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let user = AuthService::new(&pool)
        .create_admin(email, name, password)
        .await?;

    info!(email = %user.email, "Admin user created");
    Ok(())
}

/// Replace an admin account's password.
///
/// # Errors
///
/// Returns an error if the account does not exist, the password is too
/// weak, or the database is unreachable.
pub async fn reset_password(email: &str, password: &str) -> Result<(), CommandError> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let updated = AuthService::new(&pool)
        .reset_password(email, password)
        .await?;
    if !updated {
        return Err(format!("no admin user with email {email}").into());
    }

    info!(email, "Admin password reset");
    Ok(())
}
