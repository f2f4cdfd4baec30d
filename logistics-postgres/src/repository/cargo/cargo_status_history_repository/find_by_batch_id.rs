use crate::utils::TryFromRow;
use logistics_db::models::CargoStatusHistoryModel;
use logistics_db::repository::pagination::{Page, PageRequest};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoStatusHistoryRepositoryImpl;

impl CargoStatusHistoryRepositoryImpl {
    /// History of one batch, newest first.
    pub async fn find_by_batch_id(
        &self,
        batch_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<CargoStatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cargo_status_history WHERE batch_id = $1")
                .bind(batch_id)
                .fetch_one(&mut **transaction)
                .await?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM cargo_status_history
            WHERE batch_id = $1
            ORDER BY changed_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(batch_id)
        .bind(page.limit_i64())
        .bind(page.offset_i64())
        .fetch_all(&mut **transaction)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(CargoStatusHistoryModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}
