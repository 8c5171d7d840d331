use std::sync::Arc;

use crate::config::Config;
use crate::fulfillment::FulfillmentPipeline;
use crate::orders::store::OrderStore;
use crate::payments::PaymentClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Default: PgOrderStore. Tests use the in-memory store.
    pub orders: Arc<dyn OrderStore>,
    pub pipeline: FulfillmentPipeline,
    pub payments: PaymentClient,
}
