use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Deletes several entities by id and returns how many rows went away.
///
/// Ids that do not exist are ignored.
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
