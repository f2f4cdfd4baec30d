use crate::utils::TryFromRow;
use logistics_db::models::ContainerStatusHistoryModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// Append-only: rows are inserted and read, never updated or deleted.
pub struct ContainerStatusHistoryRepositoryImpl {
    pub executor: Executor,
}

impl ContainerStatusHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ContainerStatusHistoryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ContainerStatusHistoryModel {
            id: row.get("id"),
            container_id: row.get("container_id"),
            old_status: row.try_get("old_status")?,
            new_status: row.try_get("new_status")?,
            changed_by: row.get("changed_by"),
            changed_at: row.get("changed_at"),
            note: row.get("note"),
            audit_log_id: row.get("audit_log_id"),
        })
    }
}
