use crate::utils::{get_heapless_string, TryFromRow};
use logistics_db::models::StorageFeeModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct StorageFeeRepositoryImpl {
    pub executor: Executor,
}

impl StorageFeeRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for StorageFeeModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(StorageFeeModel {
            id: row.get("id"),
            fee_name: get_heapless_string(row, "fee_name")?,
            price_per_day: row.get("price_per_day"),
            unit_type: row.try_get("unit_type")?,
            currency_id: row.get("currency_id"),
        })
    }
}
