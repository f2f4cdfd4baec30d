use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::CargoBatchModel;
use logistics_db::repository::UpdateBatch;
use sqlx::types::Json;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoBatchRepositoryImpl;

#[async_trait]
impl UpdateBatch<sqlx::Postgres, CargoBatchModel> for CargoBatchRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<CargoBatchModel>,
        audit_log_id: Uuid,
    ) -> Result<Vec<CargoBatchModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items, audit_log_id).await
    }
}

impl CargoBatchRepositoryImpl {
    /// Writes the mutable part of each batch. Codes, container and pricing
    /// are fixed at registration and are not touched.
    pub(super) async fn update_batch_impl(
        repo: &CargoBatchRepositoryImpl,
        items: Vec<CargoBatchModel>,
        audit_log_id: Uuid,
    ) -> Result<Vec<CargoBatchModel>, Box<dyn Error + Send + Sync>> {
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
                UPDATE cargo_batch
                SET cargo_name = $2, sender_name = $3, sender_phone = $4, sender_address = $5,
                    receiver_name = $6, receiver_phone = $7, receiver_address = $8,
                    payment_location_id = $9, description = $10, images = $11,
                    status = $12, distribution_available_date = $13,
                    storage_days = $14, storage_fee_amount = $15,
                    updated_by = $16, updated_at = $17, audit_log_id = $18
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(opt_str(&item.cargo_name))
            .bind(item.sender_name.as_str())
            .bind(opt_str(&item.sender_phone))
            .bind(opt_str(&item.sender_address))
            .bind(item.receiver_name.as_str())
            .bind(opt_str(&item.receiver_phone))
            .bind(opt_str(&item.receiver_address))
            .bind(item.payment_location_id)
            .bind(item.description.as_deref())
            .bind(Json(&item.images))
            .bind(item.status)
            .bind(item.distribution_available_date)
            .bind(item.storage_days)
            .bind(item.storage_fee_amount)
            .bind(item.updated_by)
            .bind(item.updated_at)
            .bind(item.audit_log_id)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Cargo batch {} does not exist", item.id).into());
            }
            updated_items.push(item);
        }

        Ok(updated_items)
    }
}
