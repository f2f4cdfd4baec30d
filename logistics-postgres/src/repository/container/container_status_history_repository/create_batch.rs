use async_trait::async_trait;
use logistics_db::models::ContainerStatusHistoryModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerStatusHistoryRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, ContainerStatusHistoryModel> for ContainerStatusHistoryRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ContainerStatusHistoryModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContainerStatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

impl ContainerStatusHistoryRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ContainerStatusHistoryRepositoryImpl,
        items: Vec<ContainerStatusHistoryModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContainerStatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO container_status_history (
                    id, container_id, old_status, new_status, changed_by, changed_at, note, audit_log_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.container_id)
            .bind(item.old_status)
            .bind(item.new_status)
            .bind(item.changed_by)
            .bind(item.changed_at)
            .bind(item.note.as_deref())
            .bind(item.audit_log_id)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}
