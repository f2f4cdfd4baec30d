use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Existence check for referenced ids, e.g. a road info or payment location
/// submitted with a request.
///
/// Returns one `(id, exists)` pair per requested id, in request order.
#[async_trait]
pub trait ExistByIds<DB: Database>: Send + Sync {
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
