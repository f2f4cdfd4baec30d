use async_trait::async_trait;
use logistics_db::models::StorageFeeModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StorageFeeRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, StorageFeeModel> for StorageFeeRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<StorageFeeModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<StorageFeeModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl StorageFeeRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &StorageFeeRepositoryImpl,
        items: Vec<StorageFeeModel>,
    ) -> Result<Vec<StorageFeeModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO storage_fee (id, fee_name, price_per_day, unit_type, currency_id)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.id)
            .bind(item.fee_name.as_str())
            .bind(item.price_per_day)
            .bind(item.unit_type)
            .bind(item.currency_id)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
