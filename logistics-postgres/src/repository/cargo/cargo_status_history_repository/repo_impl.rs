use crate::utils::{get_heapless_string, TryFromRow};
use logistics_db::models::CargoStatusHistoryModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// Append-only. Rows outlive the batch they describe.
pub struct CargoStatusHistoryRepositoryImpl {
    pub executor: Executor,
}

impl CargoStatusHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for CargoStatusHistoryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CargoStatusHistoryModel {
            id: row.get("id"),
            batch_id: row.get("batch_id"),
            batch_number: get_heapless_string(row, "batch_number")?,
            old_status: row.try_get("old_status")?,
            new_status: row.try_get("new_status")?,
            changed_by: row.get("changed_by"),
            changed_at: row.get("changed_at"),
            note: row.get("note"),
            audit_log_id: row.get("audit_log_id"),
        })
    }
}
