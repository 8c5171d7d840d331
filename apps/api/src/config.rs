use anyhow::{Context, Result};

use crate::fulfillment::mailer::{DEFAULT_EMAIL_API_URL, DEFAULT_EMAIL_FROM};
use crate::fulfillment::renderer::DEFAULT_PDF_RENDERER_URL;
use crate::payments::checkout::DEFAULT_PAYMENT_API_BASE;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_public_base_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub pdf_renderer_url: String,
    pub pdf_renderer_api_key: String,
    pub email_api_url: String,
    pub email_api_key: String,
    pub email_from: String,
    pub payment_api_base: String,
    pub payment_secret_key: String,
    /// Verifies payment webhooks and authenticates manual fulfillment calls.
    pub payment_webhook_secret: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_public_base_url: require_env("S3_PUBLIC_BASE_URL")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            pdf_renderer_url: env_or("PDF_RENDERER_URL", DEFAULT_PDF_RENDERER_URL),
            pdf_renderer_api_key: require_env("PDF_RENDERER_API_KEY")?,
            email_api_url: env_or("EMAIL_API_URL", DEFAULT_EMAIL_API_URL),
            email_api_key: require_env("EMAIL_API_KEY")?,
            email_from: env_or("EMAIL_FROM", DEFAULT_EMAIL_FROM),
            payment_api_base: env_or("PAYMENT_API_BASE", DEFAULT_PAYMENT_API_BASE),
            payment_secret_key: require_env("PAYMENT_SECRET_KEY")?,
            payment_webhook_secret: require_env("PAYMENT_WEBHOOK_SECRET")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
