use async_trait::async_trait;
use logistics_db::models::RoadInfoModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::RoadInfoRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, RoadInfoModel> for RoadInfoRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<RoadInfoModel>,
        _audit_log_id: Option<Uuid>,
    ) -> Result<Vec<RoadInfoModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl RoadInfoRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &RoadInfoRepositoryImpl,
        items: Vec<RoadInfoModel>,
    ) -> Result<Vec<RoadInfoModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query("INSERT INTO road_info (id, road_name, description) VALUES ($1, $2, $3)")
                .bind(item.id)
                .bind(item.road_name.as_str())
                .bind(item.description.as_deref())
                .execute(&mut **transaction)
                .await?;
        }

        Ok(items)
    }
}
