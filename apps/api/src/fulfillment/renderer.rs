use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::fulfillment::FulfillmentError;

pub const DEFAULT_PDF_RENDERER_URL: &str = "https://api.pdfshift.io/v3/convert/pdf";

/// HTML → PDF conversion backend.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Bytes, FulfillmentError>;
}

#[derive(Serialize)]
struct ConvertRequest<'a> {
    source: &'a str,
    format: &'a str,
    use_print: bool,
}

/// Hosted HTML-to-PDF API (PDFShift-compatible request shape).
pub struct HttpPdfRenderer {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpPdfRenderer {
    pub fn new(client: Client, url: String, api_key: String) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, html: &str) -> Result<Bytes, FulfillmentError> {
        let response = self
            .client
            .post(&self.url)
            .basic_auth("api", Some(&self.api_key))
            .json(&ConvertRequest {
                source: html,
                format: "A4",
                use_print: false,
            })
            .send()
            .await
            .map_err(|e| FulfillmentError::Render(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FulfillmentError::Render(format!("{status}: {body}")));
        }

        let pdf = response
            .bytes()
            .await
            .map_err(|e| FulfillmentError::Render(e.to_string()))?;

        if !pdf.starts_with(b"%PDF") {
            return Err(FulfillmentError::Render(format!(
                "response is not a PDF ({} bytes)",
                pdf.len()
            )));
        }

        debug!("Rendered PDF: {} bytes", pdf.len());
        Ok(pdf)
    }
}
