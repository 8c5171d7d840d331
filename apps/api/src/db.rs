use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const ORDERS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id                  UUID PRIMARY KEY,
    email               TEXT NOT NULL,
    intake_data         JSONB NOT NULL,
    status              TEXT NOT NULL DEFAULT 'pending_payment',
    amount              INTEGER NOT NULL,
    payment_session_id  TEXT,
    payment_intent_id   TEXT,
    pdf_url             TEXT,
    failure_reason      TEXT,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates the PostgreSQL pool and makes sure the `orders` table exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::query(ORDERS_SCHEMA)
        .execute(&pool)
        .await
        .context("Failed to create orders table")?;

    info!("PostgreSQL pool ready, orders schema in place");
    Ok(pool)
}
