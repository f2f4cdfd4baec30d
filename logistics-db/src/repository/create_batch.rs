use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Inserts several entities through the repository's unit of work.
///
/// Nothing is visible to other sessions until the unit of work commits, so a
/// batch is written entirely or not at all. Returns the items as stored, with
/// generated fields such as hashes and audit log ids filled in.
///
/// # Example
/// ```ignore
/// let saved = uow.containers.create_batch(vec![container], Some(audit_log.id)).await?;
/// ```
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// # Arguments
    /// * `items` - Entities to insert
    /// * `audit_log_id` - Audit log of the current transaction, stamped on every row
    async fn create_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
