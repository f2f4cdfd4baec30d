use crate::utils::TryFromRow;
use logistics_db::models::CargoBatchModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoBatchRepositoryImpl;

impl CargoBatchRepositoryImpl {
    /// Loads the batch row and holds its lock until the unit of work ends.
    ///
    /// A second distribution of the same batch waits here and then sees the
    /// batch already distributed.
    pub async fn lock_for_update(
        &self,
        id: Uuid,
    ) -> Result<Option<CargoBatchModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM cargo_batch WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **transaction)
                .await?
        };

        row.map(|r| CargoBatchModel::try_from_row(&r)).transpose()
    }
}
