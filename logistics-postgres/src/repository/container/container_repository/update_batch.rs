use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::ContainerModel;
use logistics_db::repository::UpdateBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerRepositoryImpl;

#[async_trait]
impl UpdateBatch<sqlx::Postgres, ContainerModel> for ContainerRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ContainerModel>,
        audit_log_id: Uuid,
    ) -> Result<Vec<ContainerModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items, audit_log_id).await
    }
}

impl ContainerRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &ContainerRepositoryImpl,
        items: Vec<ContainerModel>,
        audit_log_id: Uuid,
    ) -> Result<Vec<ContainerModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            item.audit_log_id = Some(audit_log_id);
            let result = sqlx::query(
                r#"
                UPDATE container
                SET name = $2, road_info_id = $3, registration_date = $4, departure_date = $5,
                    arrival_date = $6, description = $7, status = $8, status_changed_by = $9,
                    status_changed_at = $10, distribution_start_date = $11, updated_at = $12,
                    audit_log_id = $13
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(opt_str(&item.name))
            .bind(item.road_info_id)
            .bind(item.registration_date)
            .bind(item.departure_date)
            .bind(item.arrival_date)
            .bind(item.description.as_deref())
            .bind(item.status)
            .bind(item.status_changed_by)
            .bind(item.status_changed_at)
            .bind(item.distribution_start_date)
            .bind(item.updated_at)
            .bind(item.audit_log_id)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Container {} does not exist", item.id).into());
            }
            updated_items.push(item);
        }

        Ok(updated_items)
    }
}
