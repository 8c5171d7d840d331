mod config;
mod db;
mod errors;
mod fulfillment;
mod intake;
mod orders;
mod payments;
mod routes;
mod state;
mod statement;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::fulfillment::mailer::ResendMailer;
use crate::fulfillment::renderer::HttpPdfRenderer;
use crate::fulfillment::storage::S3StatementStore;
use crate::fulfillment::FulfillmentPipeline;
use crate::orders::store::{OrderStore, PgOrderStore};
use crate::payments::PaymentClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Statements API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let orders: Arc<dyn OrderStore> = Arc::new(PgOrderStore::new(db));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // One HTTP client shared by the renderer, mailer and payment API
    let http = reqwest::Client::new();

    let pipeline = FulfillmentPipeline::new(
        orders.clone(),
        Arc::new(HttpPdfRenderer::new(
            http.clone(),
            config.pdf_renderer_url.clone(),
            config.pdf_renderer_api_key.clone(),
        )),
        Arc::new(S3StatementStore::new(
            s3,
            config.s3_bucket.clone(),
            config.s3_public_base_url.clone(),
        )),
        Arc::new(ResendMailer::new(
            http.clone(),
            config.email_api_url.clone(),
            config.email_api_key.clone(),
            config.email_from.clone(),
        )),
    );
    info!("Fulfillment pipeline ready (renderer: {})", config.pdf_renderer_url);

    let payments = PaymentClient::new(
        http,
        config.payment_api_base.clone(),
        config.payment_secret_key.clone(),
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        orders,
        pipeline,
        payments,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the storefront domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "statements-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
