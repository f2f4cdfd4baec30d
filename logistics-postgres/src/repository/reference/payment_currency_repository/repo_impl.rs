use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use logistics_db::models::PaymentCurrencyModel;
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct PaymentCurrencyRepositoryImpl {
    pub executor: Executor,
}

impl PaymentCurrencyRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for PaymentCurrencyModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PaymentCurrencyModel {
            id: row.get("id"),
            currency_code: get_heapless_string(row, "currency_code")?,
            currency_name: get_heapless_string(row, "currency_name")?,
            symbol: get_optional_heapless_string(row, "symbol")?,
        })
    }
}
