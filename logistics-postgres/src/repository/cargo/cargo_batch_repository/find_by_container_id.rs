use crate::utils::TryFromRow;
use logistics_db::models::CargoBatchModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoBatchRepositoryImpl;

impl CargoBatchRepositoryImpl {
    /// All batches of a container in registration order.
    pub async fn find_by_container_id(
        &self,
        container_id: Uuid,
    ) -> Result<Vec<CargoBatchModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM cargo_batch
                WHERE container_id = $1
                ORDER BY registered_at, batch_number
                "#,
            )
            .bind(container_id)
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(CargoBatchModel::try_from_row(&row)?);
        }
        Ok(items)
    }
}
