use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerRepositoryImpl;

impl ContainerRepositoryImpl {
    /// Number of cargo batches still referencing the container.
    pub async fn count_batches(&self, id: Uuid) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cargo_batch WHERE container_id = $1")
            .bind(id)
            .fetch_one(&mut **transaction)
            .await?;

        Ok(count)
    }
}
