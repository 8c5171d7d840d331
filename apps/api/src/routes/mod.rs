pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::orders::handlers as orders;
use crate::payments::handlers as payments;
use crate::state::AppState;
use crate::statement::handlers as statement;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Composition (no persistence)
        .route("/api/v1/catalog", get(statement::handle_get_catalog))
        .route("/api/v1/statements/preview", post(statement::handle_preview))
        .route("/api/v1/statements/plan", post(statement::handle_plan))
        // Orders
        .route("/api/v1/orders", post(orders::handle_create_order))
        .route("/api/v1/orders/:id", get(orders::handle_get_order))
        .route(
            "/api/v1/orders/:id/preview",
            get(orders::handle_order_preview),
        )
        .route(
            "/api/v1/orders/:id/fulfill",
            post(orders::handle_fulfill_order),
        )
        // Payments
        .route(
            "/api/v1/orders/:id/checkout",
            post(payments::handle_create_checkout),
        )
        .route(
            "/api/v1/webhooks/payment",
            post(payments::handle_payment_webhook),
        )
        .with_state(state)
}
