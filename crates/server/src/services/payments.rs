//! Payment provider client.
//!
//! Creates hosted checkout sessions against the provider's REST API and
//! reads their payment status back. The provider is a black box: the shop
//! never touches card data, it only redirects the customer to the hosted
//! page and confirms the session afterwards.

use std::collections::HashMap;

use printworks_core::Price;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::PaymentConfig;

/// Errors from payment provider calls.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },
}

/// One line item sent to the provider.
#[derive(Debug, Clone)]
pub struct CheckoutLineItem {
    pub name: String,
    /// Unit price in the shop currency (converted to minor units on the
    /// wire).
    pub unit_price: Price,
    pub quantity: u32,
}

/// A hosted checkout session as reported by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page to redirect the customer to.
    #[serde(default)]
    pub url: Option<String>,
    pub payment_status: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// Whether the provider reports this session as paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    #[serde(default)]
    message: String,
}

/// Client for the payment provider's checkout API.
pub struct PaymentClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: SecretString,
}

impl PaymentClient {
    #[must_use]
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    /// Create a hosted checkout session.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` on transport failure or a provider rejection;
    /// no session exists in either case.
    pub async fn create_checkout_session(
        &self,
        line_items: &[CheckoutLineItem],
        customer_email: &str,
        success_url: &str,
        cancel_url: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut params: Vec<(String, String)> = vec![
            ("mode".to_owned(), "payment".to_owned()),
            ("success_url".to_owned(), success_url.to_owned()),
            ("cancel_url".to_owned(), cancel_url.to_owned()),
            ("customer_email".to_owned(), customer_email.to_owned()),
            (
                "payment_method_types[0]".to_owned(),
                "card".to_owned(),
            ),
        ];

        for (index, item) in line_items.iter().enumerate() {
            let cents = item.unit_price.as_cents();
            params.push((
                format!("line_items[{index}][price_data][currency]"),
                "usd".to_owned(),
            ));
            params.push((
                format!("line_items[{index}][price_data][product_data][name]"),
                item.name.clone(),
            ));
            params.push((
                format!("line_items[{index}][price_data][unit_amount]"),
                cents.to_string(),
            ));
            params.push((
                format!("line_items[{index}][quantity]"),
                item.quantity.to_string(),
            ));
        }

        for (key, value) in metadata {
            params.push((format!("metadata[{key}]"), value.clone()));
        }

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .basic_auth(self.secret_key.expose_secret(), None::<&str>)
            .form(&params)
            .send()
            .await?;

        Self::parse_session(response).await
    }

    /// Retrieve a checkout session by id.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` on transport failure or a provider rejection.
    pub async fn get_checkout_session(&self, id: &str) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .http
            .get(format!("{}/v1/checkout/sessions/{id}", self.api_base))
            .basic_auth(self.secret_key.expose_secret(), None::<&str>)
            .send()
            .await?;

        Self::parse_session(response).await
    }

    async fn parse_session(response: reqwest::Response) -> Result<CheckoutSession, PaymentError> {
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response.json::<CheckoutSession>().await?);
        }

        let message = response
            .json::<ProviderErrorBody>()
            .await
            .map_or_else(|_| "unknown provider error".to_owned(), |b| b.error.message);

        Err(PaymentError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_check() {
        let session = CheckoutSession {
            id: "cs_test_1".to_owned(),
            url: None,
            payment_status: "paid".to_owned(),
            customer_email: None,
            metadata: HashMap::new(),
        };
        assert!(session.is_paid());

        let unpaid = CheckoutSession {
            payment_status: "unpaid".to_owned(),
            ..session
        };
        assert!(!unpaid.is_paid());
    }
}
