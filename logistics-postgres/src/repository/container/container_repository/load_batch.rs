use crate::utils::TryFromRow;
use async_trait::async_trait;
use logistics_db::models::ContainerModel;
use logistics_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerRepositoryImpl;

#[async_trait]
impl LoadBatch<sqlx::Postgres, ContainerModel> for ContainerRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ContainerModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl ContainerRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ContainerRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ContainerModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM container WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded = HashMap::new();
        for row in rows {
            let item = ContainerModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}
