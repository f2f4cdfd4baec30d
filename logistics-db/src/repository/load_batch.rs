use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Loads several entities by id.
///
/// The result has one slot per requested id, in request order; `None` marks an
/// id with no row.
///
/// # Example
/// ```ignore
/// let loaded = uow.directions.load_batch(&[direction_id]).await?;
/// let direction = loaded.into_iter().next().flatten();
/// ```
#[async_trait]
pub trait LoadBatch<DB: Database, T: Identifiable>: Send + Sync {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<T>>, Box<dyn std::error::Error + Send + Sync>>;
}
