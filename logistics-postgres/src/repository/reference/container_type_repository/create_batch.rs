use async_trait::async_trait;
use logistics_db::models::ContainerTypeModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerTypeRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, ContainerTypeModel> for ContainerTypeRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ContainerTypeModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContainerTypeModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl ContainerTypeRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ContainerTypeRepositoryImpl,
        items: Vec<ContainerTypeModel>,
    ) -> Result<Vec<ContainerTypeModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO container_type (id, type_code, type_name, price_per_kg, price_per_cbm, currency_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id)
            .bind(item.type_code.as_str())
            .bind(item.type_name.as_str())
            .bind(item.price_per_kg)
            .bind(item.price_per_cbm)
            .bind(item.currency_id)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
