use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use logistics_api::domain::pricing::base_price;
use logistics_api::domain::settlement::BatchLine;
use logistics_api::domain::status::{CargoStatus, CargoType};
use logistics_api::domain::storage_fee::{StorageAccrualInput, StorageFee};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - A batch of identically priced pieces registered together.
/// - Status, pricing and storage fields live here once; pieces only carry their code.
/// - `storage_days`/`storage_fee_amount` are written once, when the batch is distributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoBatchModel {
    pub id: Uuid,
    pub batch_number: HeaplessString<200>,
    pub container_id: Uuid,
    pub cargo_name: Option<HeaplessString<400>>,

    pub sender_name: HeaplessString<400>,
    pub sender_phone: Option<HeaplessString<120>>,
    pub sender_address: Option<HeaplessString<1020>>,
    pub receiver_name: HeaplessString<400>,
    pub receiver_phone: Option<HeaplessString<120>>,
    pub receiver_address: Option<HeaplessString<1020>>,

    pub cargo_type: CargoType,
    pub weight_kg: Option<Decimal>,
    pub length_cm: Option<Decimal>,
    pub width_cm: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    pub volume_cbm: Option<Decimal>,
    pub unit_price: Decimal,
    pub is_manual_price: bool,
    pub manual_price: Option<Decimal>,
    pub total_pieces: i32,

    pub storage_fee_id: Option<Uuid>,
    pub payment_location_id: Option<Uuid>,
    pub description: Option<String>,
    pub images: Vec<String>,

    pub status: CargoStatus,
    pub distribution_available_date: Option<DateTime<Utc>>,
    pub storage_days: Option<i32>,
    pub storage_fee_amount: Option<Decimal>,

    pub registered_by: Uuid,
    pub registered_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl CargoBatchModel {
    pub fn base_price(&self) -> Decimal {
        base_price(self.is_manual_price, self.manual_price, self.unit_price)
    }

    pub fn accrual_input(&self) -> StorageAccrualInput {
        StorageAccrualInput {
            status: self.status,
            distribution_available_date: self.distribution_available_date,
            frozen_storage_days: self.storage_days,
            frozen_storage_fee_amount: self.storage_fee_amount,
            total_pieces: self.total_pieces,
            weight_kg: self.weight_kg,
            volume_cbm: self.volume_cbm,
            base_price: self.base_price(),
        }
    }

    pub fn to_batch_line(&self, storage: StorageFee) -> BatchLine {
        BatchLine {
            batch_id: self.id,
            batch_number: self.batch_number.to_string(),
            status: self.status,
            cargo_type: self.cargo_type,
            sender_name: self.sender_name.to_string(),
            receiver_name: self.receiver_name.to_string(),
            receiver_phone: self.receiver_phone.as_ref().map(|p| p.to_string()),
            total_pieces: self.total_pieces,
            base_price: self.base_price(),
            storage,
            registered_at: self.registered_at,
        }
    }
}

impl Identifiable for CargoBatchModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// # Documentation
/// - One physical piece of a batch: `{batch_number} {total_pieces}-{piece_index}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoPieceModel {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub piece_index: i32,
    pub cargo_code: HeaplessString<320>,
}

impl Identifiable for CargoPieceModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// A batch together with its pieces, created and deleted as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoBatch {
    pub batch: CargoBatchModel,
    pub pieces: Vec<CargoPieceModel>,
}

impl CargoBatch {
    pub fn first_cargo_code(&self) -> Option<&str> {
        self.pieces.first().map(|p| p.cargo_code.as_str())
    }
}

impl Identifiable for CargoBatch {
    fn get_id(&self) -> Uuid {
        self.batch.id
    }
}
