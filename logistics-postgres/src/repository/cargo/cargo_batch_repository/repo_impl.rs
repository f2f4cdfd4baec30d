use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use logistics_db::models::{CargoBatchModel, CargoPieceModel};
use postgres_unit_of_work::Executor;
use sqlx::types::Json;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// Cargo batches together with their pieces.
///
/// Status, pricing and storage live on the `cargo_batch` row only, so a
/// batch changes state with a single-row update.
pub struct CargoBatchRepositoryImpl {
    pub executor: Executor,
}

impl CargoBatchRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for CargoBatchModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let images: Json<Vec<String>> = row.try_get("images")?;
        Ok(CargoBatchModel {
            id: row.get("id"),
            batch_number: get_heapless_string(row, "batch_number")?,
            container_id: row.get("container_id"),
            cargo_name: get_optional_heapless_string(row, "cargo_name")?,
            sender_name: get_heapless_string(row, "sender_name")?,
            sender_phone: get_optional_heapless_string(row, "sender_phone")?,
            sender_address: get_optional_heapless_string(row, "sender_address")?,
            receiver_name: get_heapless_string(row, "receiver_name")?,
            receiver_phone: get_optional_heapless_string(row, "receiver_phone")?,
            receiver_address: get_optional_heapless_string(row, "receiver_address")?,
            cargo_type: row.try_get("cargo_type")?,
            weight_kg: row.get("weight_kg"),
            length_cm: row.get("length_cm"),
            width_cm: row.get("width_cm"),
            height_cm: row.get("height_cm"),
            volume_cbm: row.get("volume_cbm"),
            unit_price: row.get("unit_price"),
            is_manual_price: row.get("is_manual_price"),
            manual_price: row.get("manual_price"),
            total_pieces: row.get("total_pieces"),
            storage_fee_id: row.get("storage_fee_id"),
            payment_location_id: row.get("payment_location_id"),
            description: row.get("description"),
            images: images.0,
            status: row.try_get("status")?,
            distribution_available_date: row.get("distribution_available_date"),
            storage_days: row.get("storage_days"),
            storage_fee_amount: row.get("storage_fee_amount"),
            registered_by: row.get("registered_by"),
            registered_at: row.get("registered_at"),
            updated_by: row.get("updated_by"),
            updated_at: row.get("updated_at"),
            audit_log_id: row.get("audit_log_id"),
        })
    }
}

impl TryFromRow<PgRow> for CargoPieceModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CargoPieceModel {
            id: row.get("id"),
            batch_id: row.get("batch_id"),
            piece_index: row.get("piece_index"),
            cargo_code: get_heapless_string(row, "cargo_code")?,
        })
    }
}
