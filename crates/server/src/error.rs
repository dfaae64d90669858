//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; failures become structured JSON
//! `{"message": ...}` bodies and never crash the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use printworks_core::cart::CartError;
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::email::EmailError;
use crate::services::payments::PaymentError;
use crate::services::uploads::UploadError;

/// Application-level error type for the shop server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Payment provider call failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Image upload failed.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Referenced product/cart/order/print-size is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested quantity exceeds available stock for the identity.
    #[error("only {available} available")]
    CapacityExceeded { available: u32 },

    /// Missing required field or malformed payload.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Admin route without a valid session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::CapacityExceeded { available } => Self::CapacityExceeded { available },
            CartError::LineNotFound => Self::NotFound("Item not in cart".to_owned()),
            CartError::ZeroQuantity => Self::Validation("quantity must be at least 1".to_owned()),
        }
    }
}

impl From<EmailError> for AppError {
    // Email failures are normally swallowed at the call site; this exists
    // for completeness where a route wants to surface one.
    fn from(err: EmailError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Repository(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Payment(_) => StatusCode::BAD_GATEWAY,
            Self::Upload(err) => match err {
                UploadError::TooLarge { .. } | UploadError::UnsupportedType(_) => {
                    StatusCode::BAD_REQUEST
                }
                UploadError::Io(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::CapacityExceeded { .. } => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Repository(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Payment(_) => "Payment service error".to_owned(),
            Self::Upload(err) => err.to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_owned(),
                AuthError::WeakPassword(msg) => msg.clone(),
                _ => "Authentication error".to_owned(),
            },
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::CapacityExceeded { available: 2 };
        assert_eq!(err.to_string(), "only 2 available");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::CapacityExceeded { available: 1 }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_cart_errors_map_to_taxonomy() {
        assert!(matches!(
            AppError::from(CartError::CapacityExceeded { available: 3 }),
            AppError::CapacityExceeded { available: 3 }
        ));
        assert!(matches!(
            AppError::from(CartError::LineNotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(CartError::ZeroQuantity),
            AppError::Validation(_)
        ));
    }
}
