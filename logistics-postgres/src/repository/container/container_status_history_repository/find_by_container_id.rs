use logistics_db::repository::pagination::{Page, PageRequest};
use crate::utils::TryFromRow;
use logistics_db::models::ContainerStatusHistoryModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerStatusHistoryRepositoryImpl;

impl ContainerStatusHistoryRepositoryImpl {
    /// History of one container, newest first.
    pub async fn find_by_container_id(
        &self,
        container_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ContainerStatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM container_status_history WHERE container_id = $1",
        )
        .bind(container_id)
        .fetch_one(&mut **transaction)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM container_status_history
            WHERE container_id = $1
            ORDER BY changed_at DESC, id
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
            items.push(ContainerStatusHistoryModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}
