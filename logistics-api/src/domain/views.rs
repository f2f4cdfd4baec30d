//! Values returned across the service boundary.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::settlement::{BatchLine, SummaryStatistics};
use crate::domain::status::{ContainerStatus, PaymentMethod, PaymentType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedContainer {
    pub container_id: Uuid,
    pub container_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionStarted {
    /// Cargo pieces moved to `pending_distribution`.
    pub updated_cargo_count: i64,
    pub updated_batch_count: usize,
    /// Batches in the container, distributed ones included.
    pub total_cargo_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCargoBatch {
    pub batch_id: Uuid,
    pub batch_number: String,
    pub cargo_codes: Vec<String>,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry<S> {
    pub id: Uuid,
    pub old_status: Option<S>,
    pub new_status: S,
    pub changed_by: Uuid,
    pub changed_at: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerView {
    pub id: Uuid,
    pub container_code: String,
    pub name: Option<String>,
    pub direction_id: Uuid,
    pub container_type_id: Uuid,
    pub road_info_id: Option<Uuid>,
    pub registration_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub current_count: i32,
    pub status: ContainerStatus,
    pub status_changed_by: Option<Uuid>,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub distribution_start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub container: ContainerView,
    pub batches: Vec<BatchLine>,
    pub statistics: SummaryStatistics,
}

/// A batch waiting for pickup, with what the receiver owes today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBatch {
    pub line: BatchLine,
    pub container_id: Uuid,
    pub currency_code: String,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecordView {
    pub id: Uuid,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    pub batch_id: Option<Uuid>,
    pub batch_number: Option<String>,
    pub cargo_code: Option<String>,
    pub container_id: Option<Uuid>,
    pub sender_name: Option<String>,
    pub receiver_name: Option<String>,
    pub cargo_price: Decimal,
    pub storage_fee: Decimal,
    pub total_amount: Decimal,
    pub currency_code: String,
    pub receiver_phone_verified: Option<String>,
    pub description: Option<String>,
    pub recorded_by: Uuid,
    pub payment_date: DateTime<Utc>,
}
