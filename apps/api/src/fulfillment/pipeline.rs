use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::fulfillment::mailer::{Attachment, Mailer, OutgoingEmail};
use crate::fulfillment::renderer::PdfRenderer;
use crate::fulfillment::storage::{statement_key, StatementStore};
use crate::fulfillment::FulfillmentError;
use crate::orders::models::{OrderRow, OrderStatus};
use crate::orders::store::{OrderStore, StoreError};
use crate::statement::{compose, RenderedDocument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FulfillmentOutcome {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub pdf_url: Option<String>,
}

impl From<&OrderRow> for FulfillmentOutcome {
    fn from(row: &OrderRow) -> Self {
        Self {
            order_id: row.id,
            status: row.status(),
            pdf_url: row.pdf_url.clone(),
        }
    }
}

/// Turns a paid order into a delivered statement.
#[derive(Clone)]
pub struct FulfillmentPipeline {
    orders: Arc<dyn OrderStore>,
    renderer: Arc<dyn PdfRenderer>,
    storage: Arc<dyn StatementStore>,
    mailer: Arc<dyn Mailer>,
}

impl FulfillmentPipeline {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        renderer: Arc<dyn PdfRenderer>,
        storage: Arc<dyn StatementStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            orders,
            renderer,
            storage,
            mailer,
        }
    }

    /// Runs `fulfill` on the runtime without waiting for it.
    pub fn spawn(&self, order_id: Uuid) {
        let pipeline = self.clone();
        tokio::spawn(async move {
            match pipeline.fulfill(order_id).await {
                Ok(outcome) => info!("Order {order_id} fulfillment finished: {}", outcome.status),
                Err(e) => error!("Order {order_id} fulfillment failed: {e}"),
            }
        });
    }

    pub async fn fulfill(&self, order_id: Uuid) -> Result<FulfillmentOutcome, FulfillmentError> {
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(StoreError::NotFound(order_id))?;

        match order.status() {
            OrderStatus::Paid => {}
            // A failed order that was paid for may be retried.
            OrderStatus::Failed if order.payment_session_id.is_some() => {
                warn!("Retrying fulfillment of previously failed order {order_id}");
            }
            OrderStatus::Generated | OrderStatus::Delivered => {
                info!("Order {order_id} already fulfilled, nothing to do");
                return Ok(FulfillmentOutcome::from(&order));
            }
            status => return Err(FulfillmentError::NotPayable { order_id, status }),
        }

        // 1. Intake answers stored with the order
        let record = match order.intake() {
            Ok(record) => record,
            Err(e) => return Err(self.abort(order_id, e.into()).await),
        };

        // 2. Compose
        let document = compose(&record, record.output_format);
        info!(
            "Order {order_id}: composed {} ({} bytes)",
            document.format.as_str(),
            document.html.len()
        );

        // 3. Render to PDF
        let pdf = match self.renderer.render(&document.html).await {
            Ok(pdf) => pdf,
            Err(e) => return Err(self.abort(order_id, e).await),
        };
        info!("Order {order_id}: rendered PDF ({} bytes)", pdf.len());

        // 4. Upload
        let pdf_url = match self.storage.upload(&statement_key(order_id), pdf.clone()).await {
            Ok(url) => url,
            Err(e) => return Err(self.abort(order_id, e).await),
        };

        self.orders.mark_generated(order_id, &pdf_url).await?;

        // 5. Deliver. Failure here leaves the order `generated`; the PDF is
        // still reachable through its URL.
        let email = OutgoingEmail::statement_delivery(
            &order.email,
            &record.individual_name,
            &pdf_url,
            Attachment {
                filename: RenderedDocument::suggested_filename(order_id),
                content: pdf,
            },
        );
        let status = match self.mailer.send(&email).await {
            Ok(()) => {
                self.orders.mark_delivered(order_id).await?;
                OrderStatus::Delivered
            }
            Err(e) => {
                error!("Order {order_id}: {e}");
                OrderStatus::Generated
            }
        };

        Ok(FulfillmentOutcome {
            order_id,
            status,
            pdf_url: Some(pdf_url),
        })
    }

    /// Marks the order failed and hands the error back to the caller.
    async fn abort(&self, order_id: Uuid, err: FulfillmentError) -> FulfillmentError {
        error!("Order {order_id}: {err}");
        if let Err(e) = self.orders.mark_failed(order_id, &err.to_string()).await {
            error!("Order {order_id}: could not record failure: {e}");
        }
        err
    }
}
