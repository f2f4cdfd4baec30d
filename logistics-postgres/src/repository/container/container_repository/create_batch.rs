use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::ContainerModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, ContainerModel> for ContainerRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ContainerModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContainerModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

impl ContainerRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ContainerRepositoryImpl,
        items: Vec<ContainerModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ContainerModel>, Box<dyn Error + Send + Sync>> {
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
                INSERT INTO container (
                    id, container_code, name, direction_id, container_type_id, road_info_id,
                    registration_date, departure_date, arrival_date, description,
                    current_count, status, status_changed_by, status_changed_at,
                    distribution_start_date, created_by, created_at, updated_at, audit_log_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
                "#,
            )
            .bind(item.id)
            .bind(item.container_code.as_str())
            .bind(opt_str(&item.name))
            .bind(item.direction_id)
            .bind(item.container_type_id)
            .bind(item.road_info_id)
            .bind(item.registration_date)
            .bind(item.departure_date)
            .bind(item.arrival_date)
            .bind(item.description.as_deref())
            .bind(item.current_count)
            .bind(item.status)
            .bind(item.status_changed_by)
            .bind(item.status_changed_at)
            .bind(item.distribution_start_date)
            .bind(item.created_by)
            .bind(item.created_at)
            .bind(item.updated_at)
            .bind(item.audit_log_id)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}
