//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::email::Mailer;
use crate::services::payments::PaymentClient;
use crate::services::uploads::UploadStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to shared resources like the
/// database pool, configuration, and external service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    payments: PaymentClient,
    mailer: Option<Mailer>,
    uploads: UploadStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the mailer configuration is invalid.
    pub fn new(
        config: ServerConfig,
        pool: PgPool,
    ) -> Result<Self, crate::services::email::EmailError> {
        let payments = PaymentClient::new(&config.payment);
        let mailer = config
            .email
            .as_ref()
            .map(Mailer::from_config)
            .transpose()?;
        let uploads = UploadStore::new(&config.uploads_dir);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                payments,
                mailer,
                uploads,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the payment provider client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }

    /// Get a reference to the mailer, if email is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&Mailer> {
        self.inner.mailer.as_ref()
    }

    /// Get a reference to the upload store.
    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }
}
