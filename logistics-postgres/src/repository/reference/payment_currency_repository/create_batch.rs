use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::PaymentCurrencyModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PaymentCurrencyRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, PaymentCurrencyModel> for PaymentCurrencyRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<PaymentCurrencyModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<PaymentCurrencyModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl PaymentCurrencyRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &PaymentCurrencyRepositoryImpl,
        items: Vec<PaymentCurrencyModel>,
    ) -> Result<Vec<PaymentCurrencyModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO payment_currency (id, currency_code, currency_name, symbol)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.id)
            .bind(item.currency_code.as_str())
            .bind(item.currency_name.as_str())
            .bind(opt_str(&item.symbol))
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
