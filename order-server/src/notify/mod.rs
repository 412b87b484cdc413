//! Order-created email notification.
//!
//! The notifier is a collaborator, not part of the store: intake calls it
//! after a successful create, and a notification failure must never cause
//! the create to be reported as failed. Callers log the error and move on.

use async_trait::async_trait;
use serde::Serialize;
use shared::order::Order;
use thiserror::Error;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Notification errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Email provider rejected the message: HTTP {0}")]
    Rejected(u16),
}

/// Order-created notification sink.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn order_created(&self, order: &Order) -> Result<(), NotifyError>;
}

/// No-op notifier, used when no email provider is configured and in tests.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn order_created(&self, order: &Order) -> Result<(), NotifyError> {
        tracing::debug!(order_id = %order.id, "Email notifications disabled, skipping");
        Ok(())
    }
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

/// Notifier backed by the Resend HTTP API.
pub struct ResendNotifier {
    client: reqwest::Client,
    api_key: String,
    admin_email: String,
}

impl ResendNotifier {
    pub fn new(api_key: impl Into<String>, admin_email: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            admin_email: admin_email.into(),
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn order_created(&self, order: &Order) -> Result<(), NotifyError> {
        let request = EmailRequest {
            from: "WashAm <orders@washam.com>",
            to: [self.admin_email.as_str()],
            subject: format!("New Order Alert - {}", order.order_number),
            html: render_order_email(order),
        };

        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected(response.status().as_u16()));
        }

        tracing::info!(order_id = %order.id, "Order notification sent");
        Ok(())
    }
}

fn render_order_email(order: &Order) -> String {
    let mut html = String::new();
    html.push_str("<h1>New WashAm Order</h1>");
    html.push_str("<h2>Order Details</h2><ul>");
    html.push_str(&format!(
        "<li><strong>Order Number:</strong> {}</li>",
        order.order_number
    ));
    html.push_str(&format!(
        "<li><strong>Customer:</strong> {}</li>",
        order.customer_name
    ));
    html.push_str(&format!(
        "<li><strong>Phone:</strong> {}</li>",
        order.customer_phone
    ));
    html.push_str(&format!(
        "<li><strong>Email:</strong> {}</li>",
        order.customer_email.as_deref().unwrap_or("Not provided")
    ));
    html.push_str(&format!(
        "<li><strong>Address:</strong> {}</li>",
        order.customer_address
    ));
    html.push_str(&format!(
        "<li><strong>Pickup Date:</strong> {}</li>",
        order.pickup_date
    ));
    html.push_str(&format!(
        "<li><strong>Pickup Time:</strong> {}</li>",
        order.pickup_time.as_deref().unwrap_or("Any time")
    ));
    html.push_str(&format!(
        "<li><strong>Total Amount:</strong> GHS {:.2}</li>",
        order.total
    ));
    html.push_str("</ul><h3>Services Requested</h3><ul>");
    for line in &order.services {
        html.push_str(&format!(
            "<li>{} x {} - GHS {:.2}</li>",
            line.service,
            line.quantity,
            line.price * line.quantity as f64
        ));
    }
    html.push_str("</ul>");
    if let Some(instructions) = &order.instructions {
        html.push_str(&format!(
            "<h3>Special Instructions</h3><p>{instructions}</p>"
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderStatus, ServiceLine};

    fn sample_order() -> Order {
        Order {
            id: "order_00000001".to_string(),
            order_number: "WA000001".to_string(),
            customer_name: "Ama Mensah".to_string(),
            customer_phone: "+233201234567".to_string(),
            customer_email: None,
            customer_address: "12 Ring Road, Accra".to_string(),
            instructions: Some("Gate code 4321".to_string()),
            services: vec![ServiceLine {
                service: "Iron Service".to_string(),
                quantity: 3,
                price: 5.0,
            }],
            pickup_date: "2024-06-01".to_string(),
            pickup_time: None,
            subtotal: 15.0,
            delivery_fee: 5.0,
            total: 20.0,
            status: OrderStatus::Confirmed,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn email_body_includes_lines_and_instructions() {
        let html = render_order_email(&sample_order());
        assert!(html.contains("WA000001"));
        assert!(html.contains("Iron Service x 3 - GHS 15.00"));
        assert!(html.contains("Gate code 4321"));
        assert!(html.contains("Not provided"));
        assert!(html.contains("Any time"));
    }

    #[tokio::test]
    async fn noop_notifier_always_succeeds() {
        let notifier = NoopNotifier;
        assert!(notifier.order_created(&sample_order()).await.is_ok());
    }
}
