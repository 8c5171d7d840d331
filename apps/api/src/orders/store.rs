//! Persistence of orders and their status transitions.
//!
//! `AppState` holds an `Arc<dyn OrderStore>`; production uses `PgOrderStore`.
//! Every status write also bumps `updated_at`.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::orders::models::{OrderRow, OrderStatus, STATEMENT_PRODUCT};
use crate::statement::IntakeRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order {0} not found")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to serialize intake data: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a `pending_payment` order and returns its id.
    async fn create_order(&self, email: &str, intake: &IntakeRecord) -> Result<Uuid, StoreError>;

    async fn get_order(&self, id: Uuid) -> Result<Option<OrderRow>, StoreError>;

    /// Moves a `pending_payment` order to `paid`.
    ///
    /// Returns `false` when the order had already left `pending_payment`, in
    /// which case nothing is written.
    async fn mark_paid(
        &self,
        id: Uuid,
        session_id: &str,
        payment_intent_id: Option<&str>,
    ) -> Result<bool, StoreError>;

    async fn mark_generated(&self, id: Uuid, pdf_url: &str) -> Result<(), StoreError>;

    async fn mark_delivered(&self, id: Uuid) -> Result<(), StoreError>;

    async fn mark_failed(&self, id: Uuid, reason: &str) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        pdf_url: Option<&str>,
        failure_reason: Option<&str>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2,
                pdf_url = COALESCE($3, pdf_url),
                failure_reason = COALESCE($4, failure_reason),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(pdf_url)
        .bind(failure_reason)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!("Order {id} → {status}");
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create_order(&self, email: &str, intake: &IntakeRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let intake_data = serde_json::to_value(intake)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, email, intake_data, status, amount)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(&intake_data)
        .bind(OrderStatus::PendingPayment.as_str())
        .bind(STATEMENT_PRODUCT.price_pence)
        .execute(&self.pool)
        .await?;

        info!("Created order {id} ({})", intake.output_format.as_str());
        Ok(id)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<OrderRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn mark_paid(
        &self,
        id: Uuid,
        session_id: &str,
        payment_intent_id: Option<&str>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, payment_session_id = $3, payment_intent_id = $4, updated_at = now()
            WHERE id = $1 AND status = $5
            "#,
        )
        .bind(id)
        .bind(OrderStatus::Paid.as_str())
        .bind(session_id)
        .bind(payment_intent_id)
        .bind(OrderStatus::PendingPayment.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.get_order(id).await? {
                Some(row) => {
                    info!("Order {id} already {}, payment not re-applied", row.status);
                    Ok(false)
                }
                None => Err(StoreError::NotFound(id)),
            };
        }
        info!("Order {id} → paid (session {session_id})");
        Ok(true)
    }

    async fn mark_generated(&self, id: Uuid, pdf_url: &str) -> Result<(), StoreError> {
        self.set_status(id, OrderStatus::Generated, Some(pdf_url), None)
            .await
    }

    async fn mark_delivered(&self, id: Uuid) -> Result<(), StoreError> {
        self.set_status(id, OrderStatus::Delivered, None, None).await
    }

    async fn mark_failed(&self, id: Uuid, reason: &str) -> Result<(), StoreError> {
        self.set_status(id, OrderStatus::Failed, None, Some(reason))
            .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for tests
// ────────────────────────────────────────────────────────────────────────────
