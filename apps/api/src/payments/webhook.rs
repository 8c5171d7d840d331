//! Signed webhook verification.
//!
//! The signature header looks like `t=1700000000,v1=<hex>,v1=<hex>`. Each
//! `v1` is HMAC-SHA256 over `"{t}.{raw body}"` keyed with the webhook secret.
//! Any matching `v1` is accepted; the timestamp must be within tolerance.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use uuid::Uuid;

use crate::payments::PaymentError;

pub const SIGNATURE_HEADER: &str = "stripe-signature";
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

type HmacSha256 = Hmac<Sha256>;

pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), PaymentError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| PaymentError::InvalidSignatureHeader)?,
                )
            }
            // Undecodable entries simply never match.
            "v1" => signatures.extend(hex::decode(value).ok()),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(PaymentError::InvalidSignatureHeader)?;
    if signatures.is_empty() {
        return Err(PaymentError::InvalidSignatureHeader);
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| PaymentError::InvalidSignatureHeader)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    // verify_slice compares in constant time
    if !signatures
        .iter()
        .any(|sig| mac.clone().verify_slice(sig).is_ok())
    {
        return Err(PaymentError::SignatureMismatch);
    }

    let age_secs = now - timestamp;
    if age_secs.abs() > tolerance_secs {
        return Err(PaymentError::TimestampOutsideTolerance { age_secs });
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: Value,
}

#[derive(Debug, Deserialize)]
struct SessionObject {
    id: String,
    #[serde(default)]
    payment_intent: Option<Value>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

/// The parts of a completed checkout session that move an order to `paid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCheckout {
    pub session_id: String,
    pub payment_intent_id: Option<String>,
    pub order_id: Option<Uuid>,
}

impl WebhookEvent {
    /// `Some` only for `checkout.session.completed` events.
    pub fn completed_checkout(&self) -> Option<CompletedCheckout> {
        if self.event_type != CHECKOUT_COMPLETED {
            return None;
        }
        let session = SessionObject::deserialize(&self.data.object).ok()?;

        // Expanded sessions carry the whole intent object instead of its id.
        let payment_intent_id = session.payment_intent.and_then(|pi| match pi {
            Value::String(id) => Some(id),
            Value::Object(obj) => obj.get("id").and_then(Value::as_str).map(String::from),
            _ => None,
        });

        Some(CompletedCheckout {
            session_id: session.id,
            payment_intent_id,
            order_id: session
                .metadata
                .get("order_id")
                .and_then(|id| Uuid::parse_str(id).ok()),
        })
    }
}

pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
    Ok(serde_json::from_slice(payload)?)
}
