use async_trait::async_trait;
use logistics_db::repository::DeleteBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerRepositoryImpl;

#[async_trait]
impl DeleteBatch<sqlx::Postgres> for ContainerRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        _audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}

impl ContainerRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &ContainerRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query("DELETE FROM container WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut **transaction)
            .await?;

        Ok(result.rows_affected() as usize)
    }
}
