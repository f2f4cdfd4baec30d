use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use logistics_db::models::ContainerModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// Containers. `current_count` is only ever changed through
/// `adjust_current_count`; `update_batch` leaves it alone.
pub struct ContainerRepositoryImpl {
    pub executor: Executor,
}

impl ContainerRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ContainerModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ContainerModel {
            id: row.get("id"),
            container_code: get_heapless_string(row, "container_code")?,
            name: get_optional_heapless_string(row, "name")?,
            direction_id: row.get("direction_id"),
            container_type_id: row.get("container_type_id"),
            road_info_id: row.get("road_info_id"),
            registration_date: row.get("registration_date"),
            departure_date: row.get("departure_date"),
            arrival_date: row.get("arrival_date"),
            description: row.get("description"),
            current_count: row.get("current_count"),
            status: row.try_get("status")?,
            status_changed_by: row.get("status_changed_by"),
            status_changed_at: row.get("status_changed_at"),
            distribution_start_date: row.get("distribution_start_date"),
            created_by: row.get("created_by"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            audit_log_id: row.get("audit_log_id"),
        })
    }
}
