use async_trait::async_trait;
use logistics_db::repository::ExistByIds;
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::RoadInfoRepositoryImpl;

#[async_trait]
impl ExistByIds<sqlx::Postgres> for RoadInfoRepositoryImpl {
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}

impl RoadInfoRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &RoadInfoRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<Uuid> = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_scalar("SELECT id FROM road_info WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };
        let found: HashSet<Uuid> = found.into_iter().collect();

        Ok(ids.iter().map(|id| (*id, found.contains(id))).collect())
    }
}
