use crate::utils::{get_heapless_string, TryFromRow};
use logistics_db::models::ContainerTypeModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct ContainerTypeRepositoryImpl {
    pub executor: Executor,
}

impl ContainerTypeRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ContainerTypeModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ContainerTypeModel {
            id: row.get("id"),
            type_code: get_heapless_string(row, "type_code")?,
            type_name: get_heapless_string(row, "type_name")?,
            price_per_kg: row.get("price_per_kg"),
            price_per_cbm: row.get("price_per_cbm"),
            currency_id: row.get("currency_id"),
        })
    }
}
