use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use logistics_db::models::PaymentRecordModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// The payment ledger.
///
/// Rows are never updated. Revenue rows are deleted when their distribution
/// is reversed; expense rows are never deleted.
pub struct PaymentRecordRepositoryImpl {
    pub executor: Executor,
}

impl PaymentRecordRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for PaymentRecordModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PaymentRecordModel {
            id: row.get("id"),
            payment_type: row.try_get("payment_type")?,
            batch_id: row.get("batch_id"),
            batch_number: get_optional_heapless_string(row, "batch_number")?,
            cargo_code: get_optional_heapless_string(row, "cargo_code")?,
            container_id: row.get("container_id"),
            sender_name: get_optional_heapless_string(row, "sender_name")?,
            receiver_name: get_optional_heapless_string(row, "receiver_name")?,
            cargo_price: row.get("cargo_price"),
            storage_fee: row.get("storage_fee"),
            total_amount: row.get("total_amount"),
            currency_code: get_heapless_string(row, "currency_code")?,
            payment_method: row.try_get("payment_method")?,
            receiver_phone_verified: get_optional_heapless_string(row, "receiver_phone_verified")?,
            description: row.get("description"),
            recorded_by: row.get("recorded_by"),
            payment_date: row.get("payment_date"),
            hash: row.get("hash"),
            audit_log_id: row.get("audit_log_id"),
        })
    }
}
