use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::DirectionModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DirectionRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, DirectionModel> for DirectionRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<DirectionModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<DirectionModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl DirectionRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &DirectionRepositoryImpl,
        items: Vec<DirectionModel>,
    ) -> Result<Vec<DirectionModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO direction (id, direction_code, direction_name, from_location, to_location)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.id)
            .bind(item.direction_code.as_str())
            .bind(item.direction_name.as_str())
            .bind(opt_str(&item.from_location))
            .bind(opt_str(&item.to_location))
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
