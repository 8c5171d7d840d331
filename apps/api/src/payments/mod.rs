//! Payment provider integration: embedded checkout sessions and the signed
//! webhook that confirms payment. Stripe-compatible wire format.

pub mod checkout;
pub mod handlers;
pub mod webhook;

use thiserror::Error;

pub use checkout::{CheckoutSession, PaymentClient};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("missing webhook signature header")]
    MissingSignature,

    #[error("malformed webhook signature header")]
    InvalidSignatureHeader,

    #[error("no webhook signature matched the payload")]
    SignatureMismatch,

    #[error("webhook timestamp outside tolerance ({age_secs}s old)")]
    TimestampOutsideTolerance { age_secs: i64 },

    #[error("failed to parse webhook payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("payment API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PaymentError {
    /// True when the webhook request itself is unacceptable (answer 400),
    /// as opposed to the provider API failing.
    pub fn is_rejected_signature(&self) -> bool {
        matches!(
            self,
            PaymentError::MissingSignature
                | PaymentError::InvalidSignatureHeader
                | PaymentError::SignatureMismatch
                | PaymentError::TimestampOutsideTolerance { .. }
                | PaymentError::Payload(_)
        )
    }
}
