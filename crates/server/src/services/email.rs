//! Order confirmation email.
//!
//! SMTP via lettre with a plain-text body. Sending is fire-and-forget from
//! the checkout flow: failures are logged and the order still succeeds.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::Mailbox,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;

use crate::config::EmailConfig;
use crate::models::Order;

/// Errors that can occur when sending email.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// SMTP mailer for customer notifications.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Build a mailer from the SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay or from address is invalid.
    pub fn from_config(config: &EmailConfig) -> Result<Self, EmailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_password.expose_secret().to_owned(),
            ))
            .build();

        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|_| EmailError::InvalidAddress(config.from_address.clone()))?;

        Ok(Self { transport, from })
    }

    /// Send the order confirmation message.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the SMTP relay refuses
    /// the message. Callers in the checkout flow log and move on.
    pub async fn send_order_confirmation(&self, order: &Order) -> Result<(), EmailError> {
        let to = order
            .customer_email
            .parse::<Mailbox>()
            .map_err(|_| EmailError::InvalidAddress(order.customer_email.clone()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(format!("Order Confirmation - {}", order.order_number))
            .body(order_confirmation_body(order))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Plain-text confirmation body.
fn order_confirmation_body(order: &Order) -> String {
    let items = order
        .items
        .iter()
        .map(|item| {
            let size = item
                .variant_label
                .as_deref()
                .map(|label| format!(" ({label})"))
                .unwrap_or_default();
            format!(
                "{}{size} - Quantity: {} - ${:.2}",
                item.name, item.quantity, item.price
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let address = &order.shipping_address;

    format!(
        "Dear {name},\n\n\
         Thank you for your order!\n\n\
         Order Number: {number}\n\
         Order Date: {date}\n\n\
         Items:\n{items}\n\n\
         Total: ${total:.2}\n\n\
         Shipping Address:\n\
         {street}\n\
         {city}, {state} {zip}\n\
         {country}\n\n\
         Your order is being processed and will be shipped soon.\n\n\
         Thank you for shopping with us!\n",
        name = order.customer_name,
        number = order.order_number,
        date = order.created_at.format("%Y-%m-%d"),
        total = order.total,
        street = address.street,
        city = address.city,
        state = address.state,
        zip = address.zip_code,
        country = address.country,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, ShippingAddress};
    use printworks_core::{OrderId, OrderStatus, PaymentStatus, ProductId};
    use rust_decimal_macros::dec;

    fn order() -> Order {
        Order {
            id: OrderId::generate(),
            order_number: "PW-1722787200-4821".to_owned(),
            customer_name: "Jamie Doe".to_owned(),
            customer_email: "jamie@example.com".to_owned(),
            items: vec![OrderItem {
                product_id: ProductId::generate(),
                name: "Harbor at Dusk".to_owned(),
                price: dec!(50),
                quantity: 2,
                variant_label: Some("8x10".to_owned()),
            }],
            total: dec!(100),
            shipping_address: ShippingAddress {
                street: "1 Main St".to_owned(),
                city: "Portland".to_owned(),
                state: "OR".to_owned(),
                zip_code: "97201".to_owned(),
                country: "USA".to_owned(),
            },
            payment_status: PaymentStatus::Completed,
            order_status: OrderStatus::Processing,
            payment_id: Some("cs_test_1".to_owned()),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_confirmation_body_contents() {
        let body = order_confirmation_body(&order());
        assert!(body.contains("Dear Jamie Doe"));
        assert!(body.contains("Order Number: PW-1722787200-4821"));
        assert!(body.contains("Harbor at Dusk (8x10) - Quantity: 2 - $50.00"));
        assert!(body.contains("Total: $100.00"));
        assert!(body.contains("Portland, OR 97201"));
    }
}
