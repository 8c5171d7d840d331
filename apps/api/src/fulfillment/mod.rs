//! Fulfillment: paid order → composed HTML → PDF → storage → email.
//!
//! Each external service sits behind a trait so the pipeline can run against
//! fakes in tests. `AppState` holds the wired-up `FulfillmentPipeline`.

pub mod mailer;
pub mod pipeline;
pub mod renderer;
pub mod storage;

use thiserror::Error;
use uuid::Uuid;

use crate::orders::models::OrderStatus;
use crate::orders::store::StoreError;

pub use pipeline::{FulfillmentOutcome, FulfillmentPipeline};

#[derive(Debug, Error)]
pub enum FulfillmentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("order {order_id} is {status}, expected paid")]
    NotPayable { order_id: Uuid, status: OrderStatus },

    #[error("stored intake data is malformed: {0}")]
    MalformedIntake(#[from] serde_json::Error),

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("statement upload failed: {0}")]
    Upload(String),

    #[error("email delivery failed: {0}")]
    Email(String),
}
