use crate::utils::TryFromRow;
use logistics_db::models::CargoBatchModel;
use logistics_db::repository::pagination::{Page, PageRequest};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoBatchRepositoryImpl;

impl CargoBatchRepositoryImpl {
    /// Batches waiting in `pending_distribution`, longest waiting first.
    pub async fn find_pending(
        &self,
        container_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<CargoBatchModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM cargo_batch
            WHERE status = 'pending_distribution'
              AND ($1::uuid IS NULL OR container_id = $1)
            "#,
        )
        .bind(container_id)
        .fetch_one(&mut **transaction)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM cargo_batch
            WHERE status = 'pending_distribution'
              AND ($1::uuid IS NULL OR container_id = $1)
            ORDER BY distribution_available_date, batch_number
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(container_id)
        .bind(page.limit_i64())
        .bind(page.offset_i64())
        .fetch_all(&mut **transaction)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(CargoBatchModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}
