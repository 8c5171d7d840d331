use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::orders::models::{Product, STATEMENT_PRODUCT};
use crate::payments::PaymentError;

pub const DEFAULT_PAYMENT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub client_secret: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Thin client for the payment provider's REST API.
#[derive(Clone)]
pub struct PaymentClient {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl PaymentClient {
    pub fn new(client: Client, api_base: String, secret_key: String) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    /// Creates an embedded checkout session for one statement. The order id
    /// travels in the session metadata and comes back on the webhook.
    pub async fn create_checkout_session(
        &self,
        order_id: Uuid,
        customer_email: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&checkout_form(&STATEMENT_PRODUCT, order_id, customer_email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Payment API returned {}: {}", status, body);
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response.json().await?;
        info!("Created checkout session {} for order {order_id}", session.id);
        Ok(session)
    }
}

/// Form-encoded body of a checkout session request.
fn checkout_form(
    product: &Product,
    order_id: Uuid,
    customer_email: &str,
) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("mode", "payment".to_string()),
        ("ui_mode", "embedded".to_string()),
        ("redirect_on_completion", "never".to_string()),
        ("line_items[0][quantity]", "1".to_string()),
        ("line_items[0][price_data][currency]", product.currency.to_string()),
        (
            "line_items[0][price_data][unit_amount]",
            product.price_pence.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]",
            product.name.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][description]",
            product.description.to_string(),
        ),
        ("metadata[order_id]", order_id.to_string()),
    ];
    let email = customer_email.trim();
    if !email.is_empty() {
        form.push(("customer_email", email.to_string()));
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(form: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_checkout_form_fields() {
        let order_id = Uuid::new_v4();
        let form = checkout_form(&STATEMENT_PRODUCT, order_id, "alex@example.com");

        assert_eq!(value(&form, "mode"), Some("payment"));
        assert_eq!(value(&form, "ui_mode"), Some("embedded"));
        assert_eq!(value(&form, "redirect_on_completion"), Some("never"));
        assert_eq!(
            value(&form, "line_items[0][price_data][currency]"),
            Some("gbp")
        );
        assert_eq!(
            value(&form, "line_items[0][price_data][unit_amount]"),
            Some("5000")
        );
        assert_eq!(
            value(&form, "line_items[0][price_data][product_data][name]"),
            Some("Reasonable Adjustment Statement")
        );
        assert_eq!(
            value(&form, "metadata[order_id]"),
            Some(order_id.to_string().as_str())
        );
        assert_eq!(value(&form, "customer_email"), Some("alex@example.com"));
    }

    #[test]
    fn test_blank_email_is_left_out() {
        let form = checkout_form(&STATEMENT_PRODUCT, Uuid::nil(), "  ");
        assert_eq!(value(&form, "customer_email"), None);
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let client = PaymentClient::new(
            Client::new(),
            "http://localhost:12111/".into(),
            "sk_test".into(),
        );
        assert_eq!(client.api_base, "http://localhost:12111");
    }
}
