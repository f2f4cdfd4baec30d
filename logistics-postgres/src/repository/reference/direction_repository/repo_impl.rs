use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use logistics_db::models::DirectionModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct DirectionRepositoryImpl {
    pub executor: Executor,
}

impl DirectionRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for DirectionModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DirectionModel {
            id: row.get("id"),
            direction_code: get_heapless_string(row, "direction_code")?,
            direction_name: get_heapless_string(row, "direction_name")?,
            from_location: get_optional_heapless_string(row, "from_location")?,
            to_location: get_optional_heapless_string(row, "to_location")?,
        })
    }
}
