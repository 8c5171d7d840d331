use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::statement::IntakeRecord;

/// The single product sold: one statement, fixed price.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_pence: i32,
    pub currency: &'static str,
}

pub const STATEMENT_PRODUCT: Product = Product {
    id: "reasonable-adjustment-statement",
    name: "Reasonable Adjustment Statement",
    description: "A professionally drafted Reasonable Adjustment Statement grounded in the UK \
        Equality Act 2010, tailored to your neurodivergence profile and workplace or academic needs.",
    price_pence: 5000,
    currency: "gbp",
};

/// Order lifecycle: pending_payment → paid → generated → delivered, or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    Generated,
    Delivered,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "pending_payment",
            OrderStatus::Paid => "paid",
            OrderStatus::Generated => "generated",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending_payment" => Some(OrderStatus::PendingPayment),
            "paid" => Some(OrderStatus::Paid),
            "generated" => Some(OrderStatus::Generated),
            "delivered" => Some(OrderStatus::Delivered),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub email: String,
    pub intake_data: Value,
    pub status: String,
    pub amount: i32,
    pub payment_session_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub pdf_url: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRow {
    /// Unknown status strings read as `Failed` so they are never fulfilled.
    pub fn status(&self) -> OrderStatus {
        OrderStatus::parse(&self.status).unwrap_or(OrderStatus::Failed)
    }

    pub fn intake(&self) -> Result<IntakeRecord, serde_json::Error> {
        IntakeRecord::deserialize(&self.intake_data)
    }
}

/// Public view of an order; intake answers are never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: Uuid,
    pub email: String,
    pub status: OrderStatus,
    pub amount: i32,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&OrderRow> for OrderSummary {
    fn from(row: &OrderRow) -> Self {
        Self {
            id: row.id,
            email: row.email.clone(),
            status: row.status(),
            amount: row.amount,
            pdf_url: row.pdf_url.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::model::fixtures::sample_record;
    use crate::statement::OutputFormat;

    fn row(status: &str, intake_data: Value) -> OrderRow {
        OrderRow {
            id: Uuid::new_v4(),
            email: "alex@example.com".to_string(),
            intake_data,
            status: status.to_string(),
            amount: STATEMENT_PRODUCT.price_pence,
            payment_session_id: None,
            payment_intent_id: None,
            pdf_url: None,
            failure_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            OrderStatus::PendingPayment,
            OrderStatus::Paid,
            OrderStatus::Generated,
            OrderStatus::Delivered,
            OrderStatus::Failed,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                Value::String(status.to_string())
            );
        }
    }

    #[test]
    fn test_unknown_status_is_failed() {
        assert_eq!(row("refunded", Value::Null).status(), OrderStatus::Failed);
    }

    #[test]
    fn test_intake_reads_stored_output_format() {
        let mut data = serde_json::to_value(sample_record()).unwrap();
        let obj = data.as_object_mut().unwrap();
        obj.remove("outputFormat");
        obj.insert("output_format".into(), "formal_report".into());

        let record = row("paid", data).intake().unwrap();
        assert_eq!(record.output_format, OutputFormat::FormalReport);
    }

    #[test]
    fn test_intake_reads_storefront_row_with_both_format_keys() {
        let mut data = serde_json::to_value(sample_record()).unwrap();
        data["outputFormat"] = "personal_letter".into();
        data["output_format"] = "formal_report".into();

        let record = row("paid", data).intake().unwrap();
        assert_eq!(record.output_format, OutputFormat::FormalReport);
    }

    #[test]
    fn test_summary_hides_intake() {
        let summary = OrderSummary::from(&row("paid", serde_json::json!({"secret": true})));
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("intake_data").is_none());
        assert_eq!(value["status"], "paid");
    }
}
