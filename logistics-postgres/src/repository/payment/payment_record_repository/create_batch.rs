use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::PaymentRecordModel;
use logistics_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::PaymentRecordRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, PaymentRecordModel> for PaymentRecordRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<PaymentRecordModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<PaymentRecordModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

impl PaymentRecordRepositoryImpl {
    /// Seals every record (audit log id and tamper hash) before inserting it.
    pub(super) async fn create_batch_impl(
        repo: &PaymentRecordRepositoryImpl,
        items: Vec<PaymentRecordModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<PaymentRecordModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            item.seal(audit_log_id)?;
            sqlx::query(
                r#"
                INSERT INTO payment_record (
                    id, payment_type, batch_id, batch_number, cargo_code, container_id,
                    sender_name, receiver_name, cargo_price, storage_fee, total_amount,
                    currency_code, payment_method, receiver_phone_verified, description,
                    recorded_by, payment_date, hash, audit_log_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
                "#,
            )
            .bind(item.id)
            .bind(item.payment_type)
            .bind(item.batch_id)
            .bind(opt_str(&item.batch_number))
            .bind(opt_str(&item.cargo_code))
            .bind(item.container_id)
            .bind(opt_str(&item.sender_name))
            .bind(opt_str(&item.receiver_name))
            .bind(item.cargo_price)
            .bind(item.storage_fee)
            .bind(item.total_amount)
            .bind(item.currency_code.as_str())
            .bind(item.payment_method)
            .bind(opt_str(&item.receiver_phone_verified))
            .bind(item.description.as_deref())
            .bind(item.recorded_by)
            .bind(item.payment_date)
            .bind(item.hash)
            .bind(item.audit_log_id)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::create_test_expense;
    use crate::test_helper::setup_test_context;
    use logistics_db::models::AuditLogModel;
    use logistics_db::repository::{CreateBatch, LoadBatch};
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_stored_record_keeps_a_valid_hash() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();
        let audit_log = uow
            .audit_logs
            .create(&AuditLogModel::new(Uuid::new_v4(), Utc::now()))
            .await?;

        let saved = uow
            .payment_records
            .create_batch(vec![create_test_expense(None, 4000)], Some(audit_log.id))
            .await?;
        assert_eq!(saved[0].audit_log_id, Some(audit_log.id));

        let loaded = uow.payment_records.load_batch(&[saved[0].id]).await?;
        let loaded = loaded[0].as_ref().ok_or("record not loaded")?;

        assert_eq!(loaded.hash, saved[0].hash);
        assert!(loaded.verify_hash()?);

        Ok(())
    }
}
