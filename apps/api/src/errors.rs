use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::fulfillment::FulfillmentError;
use crate::intake::validation::FieldError;
use crate::orders::store::StoreError;
use crate::payments::PaymentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Intake failed validation ({} fields)", .0.len())]
    InvalidIntake(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Order store error: {0}")]
    Store(#[from] StoreError),

    #[error("Fulfillment error: {0}")]
    Fulfillment(#[from] FulfillmentError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidIntake(fields) => {
                let body = Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "One or more intake fields are invalid",
                        "fields": fields,
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Store(StoreError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Order {id} not found"),
            ),
            AppError::Store(e) => {
                tracing::error!("Order store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Fulfillment(FulfillmentError::Store(StoreError::NotFound(id))) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Order {id} not found"),
            ),
            AppError::Fulfillment(FulfillmentError::NotPayable { status, .. }) => (
                StatusCode::CONFLICT,
                "ORDER_NOT_PAID",
                format!("Order is {status}; only paid orders can be fulfilled"),
            ),
            AppError::Fulfillment(e) => {
                tracing::error!("Fulfillment error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FULFILLMENT_ERROR",
                    "The statement could not be produced".to_string(),
                )
            }
            AppError::Payment(e) if e.is_rejected_signature() => {
                tracing::warn!("Payment webhook rejected: {e}");
                (
                    StatusCode::BAD_REQUEST,
                    "INVALID_SIGNATURE",
                    "Invalid signature".to_string(),
                )
            }
            AppError::Payment(e) => {
                tracing::error!("Payment error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PAYMENT_ERROR",
                    "The payment provider request failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidIntake(vec![]), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                AppError::Store(StoreError::NotFound(Uuid::nil())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Payment(PaymentError::SignatureMismatch),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Fulfillment(FulfillmentError::Render("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
