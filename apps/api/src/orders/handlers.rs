use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::fulfillment::FulfillmentOutcome;
use crate::intake::validation::validate_email;
use crate::orders::models::{OrderRow, OrderStatus, OrderSummary};
use crate::state::AppState;
use crate::statement::handlers::require_valid;
use crate::statement::{compose, IntakeRecord};

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub email: String,
    pub intake: IntakeRecord,
}

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub warnings: Vec<String>,
}

async fn load_order(state: &AppState, id: Uuid) -> Result<OrderRow, AppError> {
    state
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))
}

/// POST /api/v1/orders
pub async fn handle_create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError> {
    let warnings = match (require_valid(&req.intake), validate_email(&req.email)) {
        (Ok(warnings), None) => warnings,
        (Ok(_), Some(email_error)) => return Err(AppError::InvalidIntake(vec![email_error])),
        (Err(AppError::InvalidIntake(mut errors)), email_error) => {
            errors.extend(email_error);
            return Err(AppError::InvalidIntake(errors));
        }
        (Err(e), _) => return Err(e),
    };

    let order_id = state
        .orders
        .create_order(req.email.trim(), &req.intake)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_id,
            status: OrderStatus::PendingPayment,
            warnings,
        }),
    ))
}

/// GET /api/v1/orders/:id
pub async fn handle_get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderSummary>, AppError> {
    let order = load_order(&state, id).await?;
    Ok(Json(OrderSummary::from(&order)))
}

/// GET /api/v1/orders/:id/preview
pub async fn handle_order_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let order = load_order(&state, id).await?;
    let record = order
        .intake()
        .map_err(|e| AppError::Validation(format!("Stored intake is malformed: {e}")))?;
    Ok(Html(compose(&record, record.output_format).html))
}

/// POST /api/v1/orders/:id/fulfill
/// Manual re-trigger; authenticated with the webhook secret as a bearer token.
pub async fn handle_fulfill_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<FulfillmentOutcome>, AppError> {
    let expected = format!("Bearer {}", state.config.payment_webhook_secret);
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return Err(AppError::Unauthorized);
    }

    info!("Manual fulfillment requested for order {id}");
    let outcome = state.pipeline.fulfill(id).await?;
    Ok(Json(outcome))
}
