use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::fulfillment::FulfillmentError;

/// Object key for an order's statement PDF.
pub fn statement_key(order_id: Uuid) -> String {
    format!("statements/statement-{order_id}.pdf")
}

/// Durable storage for rendered statements. Returns the public download URL.
#[async_trait]
pub trait StatementStore: Send + Sync {
    async fn upload(&self, key: &str, pdf: Bytes) -> Result<String, FulfillmentError>;
}

pub struct S3StatementStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3StatementStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl StatementStore for S3StatementStore {
    async fn upload(&self, key: &str, pdf: Bytes) -> Result<String, FulfillmentError> {
        // PutObject overwrites, so a retried order replaces its earlier file.
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(pdf))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| FulfillmentError::Upload(format!("S3 upload failed: {e}")))?;

        info!("Uploaded statement to s3://{}/{}", self.bucket, key);
        Ok(self.public_url(key))
    }
}
