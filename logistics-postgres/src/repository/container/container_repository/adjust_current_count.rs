use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerRepositoryImpl;

impl ContainerRepositoryImpl {
    /// Adds `delta` pieces to the container's running count and returns the new count.
    pub async fn adjust_current_count(
        &self,
        id: Uuid,
        delta: i32,
        audit_log_id: Uuid,
    ) -> Result<i32, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let count: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE container
            SET current_count = current_count + $2, updated_at = NOW(), audit_log_id = $3
            WHERE id = $1
            RETURNING current_count
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(audit_log_id)
        .fetch_optional(&mut **transaction)
        .await?;

        count.ok_or_else(|| format!("Container {id} does not exist").into())
    }
}
