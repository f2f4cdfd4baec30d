use crate::utils::TryFromRow;
use async_trait::async_trait;
use logistics_db::models::PaymentRecordModel;
use logistics_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PaymentRecordRepositoryImpl;

#[async_trait]
impl LoadBatch<sqlx::Postgres, PaymentRecordModel> for PaymentRecordRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<PaymentRecordModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl PaymentRecordRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &PaymentRecordRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<PaymentRecordModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM payment_record WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded = HashMap::new();
        for row in rows {
            let item = PaymentRecordModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}
