use crate::utils::TryFromRow;
use async_trait::async_trait;
use logistics_db::models::PaymentCurrencyModel;
use logistics_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PaymentCurrencyRepositoryImpl;

#[async_trait]
impl LoadBatch<sqlx::Postgres, PaymentCurrencyModel> for PaymentCurrencyRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<PaymentCurrencyModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl PaymentCurrencyRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &PaymentCurrencyRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<PaymentCurrencyModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM payment_currency WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded = HashMap::new();
        for row in rows {
            let item = PaymentCurrencyModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}
