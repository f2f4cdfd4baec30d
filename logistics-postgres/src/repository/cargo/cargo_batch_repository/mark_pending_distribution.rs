use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoBatchRepositoryImpl;

impl CargoBatchRepositoryImpl {
    /// Moves the given batches to `pending_distribution` and starts their
    /// storage clock at `available_at`.
    ///
    /// Distributed batches are skipped even when listed. Returns the ids that
    /// actually moved.
    pub async fn mark_pending_distribution(
        &self,
        ids: &[Uuid],
        available_at: DateTime<Utc>,
        updated_by: Uuid,
        audit_log_id: Uuid,
    ) -> Result<Vec<Uuid>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let moved: Vec<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE cargo_batch
            SET status = 'pending_distribution', distribution_available_date = $2,
                updated_by = $3, updated_at = $2, audit_log_id = $4
            WHERE id = ANY($1) AND status <> 'distributed'
            RETURNING id
            "#,
        )
        .bind(ids)
        .bind(available_at)
        .bind(updated_by)
        .bind(audit_log_id)
        .fetch_all(&mut **transaction)
        .await?;

        Ok(moved)
    }
}
