use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::fulfillment::FulfillmentError;
use crate::statement::formatting::escape_html;

pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_EMAIL_FROM: &str = "ClearGuide <onboarding@resend.dev>";
pub const DELIVERY_SUBJECT: &str = "Your Reasonable Adjustment Statement";

#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content: Bytes,
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<Attachment>,
}

impl OutgoingEmail {
    /// The delivery email: greeting, download link fallback, PDF attached.
    pub fn statement_delivery(
        to: &str,
        individual_name: &str,
        pdf_url: &str,
        attachment: Attachment,
    ) -> Self {
        let html = format!(
            "<p>Dear {name},</p>\n\
             <p>Your Reasonable Adjustment Statement is now ready.</p>\n\
             <p>If the attachment does not work, you can download it directly here:</p>\n\
             <p><a href=\"{url}\">Download your statement</a></p>\n\
             <p>Best regards,<br/>The ClearGuide Team</p>",
            name = escape_html(individual_name),
            url = escape_html(pdf_url),
        );
        Self {
            to: to.to_string(),
            subject: DELIVERY_SUBJECT.to_string(),
            html,
            attachments: vec![attachment],
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), FulfillmentError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    attachments: Vec<SendAttachment<'a>>,
}

#[derive(Serialize)]
struct SendAttachment<'a> {
    filename: &'a str,
    content: String,
}

impl<'a> SendRequest<'a> {
    fn new(from: &'a str, email: &'a OutgoingEmail) -> Self {
        Self {
            from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            attachments: email
                .attachments
                .iter()
                .map(|a| SendAttachment {
                    filename: &a.filename,
                    content: STANDARD.encode(&a.content),
                })
                .collect(),
        }
    }
}

/// Resend-compatible transactional email API.
pub struct ResendMailer {
    client: Client,
    url: String,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(client: Client, url: String, api_key: String, from: String) -> Self {
        Self {
            client,
            url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), FulfillmentError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&SendRequest::new(&self.from, email))
            .send()
            .await
            .map_err(|e| FulfillmentError::Email(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FulfillmentError::Email(format!("{status}: {body}")));
        }

        info!("Sent \"{}\" to {}", email.subject, email.to);
        Ok(())
    }
}
