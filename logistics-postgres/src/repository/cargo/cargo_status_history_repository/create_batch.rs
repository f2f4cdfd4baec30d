use async_trait::async_trait;
use logistics_db::models::CargoStatusHistoryModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoStatusHistoryRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, CargoStatusHistoryModel> for CargoStatusHistoryRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CargoStatusHistoryModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<CargoStatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

impl CargoStatusHistoryRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CargoStatusHistoryRepositoryImpl,
        items: Vec<CargoStatusHistoryModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<CargoStatusHistoryModel>, Box<dyn Error + Send + Sync>> {
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
                INSERT INTO cargo_status_history (
                    id, batch_id, batch_number, old_status, new_status,
                    changed_by, changed_at, note, audit_log_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(item.batch_id)
            .bind(item.batch_number.as_str())
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
