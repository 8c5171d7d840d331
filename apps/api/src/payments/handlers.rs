use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::orders::models::OrderStatus;
use crate::payments::webhook::{
    parse_event, verify_signature, DEFAULT_TOLERANCE_SECS, SIGNATURE_HEADER,
};
use crate::payments::PaymentError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub client_secret: String,
}

/// POST /api/v1/orders/:id/checkout
pub async fn handle_create_checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let order = state
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;

    if order.status() != OrderStatus::PendingPayment {
        return Err(AppError::Conflict(format!(
            "Order {id} is {}; checkout is only available before payment",
            order.status()
        )));
    }

    let session = state
        .payments
        .create_checkout_session(order.id, &order.email)
        .await?;
    let client_secret = session.client_secret.ok_or_else(|| {
        anyhow::anyhow!("Checkout session {} returned no client secret", session.id)
    })?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
        client_secret,
    }))
}

/// POST /api/v1/webhooks/payment
/// Verifies the signature over the raw body, marks the order paid and starts
/// fulfillment in the background so the provider gets a fast answer.
///
/// Redelivered events for an order that is already past `pending_payment`
/// are acknowledged without starting fulfillment again.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(PaymentError::MissingSignature)?;

    verify_signature(
        &body,
        signature,
        &state.config.payment_webhook_secret,
        Utc::now().timestamp(),
        DEFAULT_TOLERANCE_SECS,
    )?;

    let event = parse_event(&body)?;
    info!("Payment webhook verified: {} ({})", event.event_type, event.id);

    if let Some(checkout) = event.completed_checkout() {
        match checkout.order_id {
            Some(order_id) => {
                let newly_paid = state
                    .orders
                    .mark_paid(
                        order_id,
                        &checkout.session_id,
                        checkout.payment_intent_id.as_deref(),
                    )
                    .await?;
                if newly_paid {
                    state.pipeline.spawn(order_id);
                } else {
                    info!("Ignoring repeated checkout completion for order {order_id}");
                }
            }
            None => warn!(
                "Checkout session {} completed without an order id",
                checkout.session_id
            ),
        }
    }

    Ok(Json(json!({ "received": true })))
}
