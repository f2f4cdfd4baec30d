use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::PaymentLocationModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PaymentLocationRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, PaymentLocationModel> for PaymentLocationRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<PaymentLocationModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<PaymentLocationModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl PaymentLocationRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &PaymentLocationRepositoryImpl,
        items: Vec<PaymentLocationModel>,
    ) -> Result<Vec<PaymentLocationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query("INSERT INTO payment_location (id, location_name, address) VALUES ($1, $2, $3)")
                .bind(item.id)
                .bind(item.location_name.as_str())
                .bind(opt_str(&item.address))
                .execute(&mut **transaction)
                .await?;
        }

        Ok(items)
    }
}
