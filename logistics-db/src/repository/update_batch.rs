use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Writes back several modified entities.
///
/// Every updated row is stamped with the audit log of the current transaction.
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Identifiable>: Send + Sync {
    async fn update_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Uuid,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
