use crate::utils::TryFromRow;
use logistics_db::models::ContainerModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerRepositoryImpl;

impl ContainerRepositoryImpl {
    /// Loads the container and holds its row lock until the unit of work ends.
    ///
    /// Every status change and piece-count change of a container goes through
    /// this first, so two transitions of the same container never interleave.
    pub async fn lock_for_update(
        &self,
        id: Uuid,
    ) -> Result<Option<ContainerModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM container WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **transaction)
                .await?
        };

        row.map(|r| ContainerModel::try_from_row(&r)).transpose()
    }
}
