use crate::utils::opt_str;
use async_trait::async_trait;
use logistics_db::models::CargoBatch;
use logistics_db::repository::CreateBatch;
use sqlx::types::Json;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoBatchRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, CargoBatch> for CargoBatchRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CargoBatch>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<CargoBatch>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}

impl CargoBatchRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CargoBatchRepositoryImpl,
        items: Vec<CargoBatch>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<CargoBatch>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            item.batch.audit_log_id = audit_log_id;
            let batch = &item.batch;
            sqlx::query(
                r#"
                INSERT INTO cargo_batch (
                    id, batch_number, container_id, cargo_name,
                    sender_name, sender_phone, sender_address,
                    receiver_name, receiver_phone, receiver_address,
                    cargo_type, weight_kg, length_cm, width_cm, height_cm, volume_cbm,
                    unit_price, is_manual_price, manual_price, total_pieces,
                    storage_fee_id, payment_location_id, description, images,
                    status, distribution_available_date, storage_days, storage_fee_amount,
                    registered_by, registered_at, updated_by, updated_at, audit_log_id
                )
                VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, $33
                )
                "#,
            )
            .bind(batch.id)
            .bind(batch.batch_number.as_str())
            .bind(batch.container_id)
            .bind(opt_str(&batch.cargo_name))
            .bind(batch.sender_name.as_str())
            .bind(opt_str(&batch.sender_phone))
            .bind(opt_str(&batch.sender_address))
            .bind(batch.receiver_name.as_str())
            .bind(opt_str(&batch.receiver_phone))
            .bind(opt_str(&batch.receiver_address))
            .bind(batch.cargo_type)
            .bind(batch.weight_kg)
            .bind(batch.length_cm)
            .bind(batch.width_cm)
            .bind(batch.height_cm)
            .bind(batch.volume_cbm)
            .bind(batch.unit_price)
            .bind(batch.is_manual_price)
            .bind(batch.manual_price)
            .bind(batch.total_pieces)
            .bind(batch.storage_fee_id)
            .bind(batch.payment_location_id)
            .bind(batch.description.as_deref())
            .bind(Json(&batch.images))
            .bind(batch.status)
            .bind(batch.distribution_available_date)
            .bind(batch.storage_days)
            .bind(batch.storage_fee_amount)
            .bind(batch.registered_by)
            .bind(batch.registered_at)
            .bind(batch.updated_by)
            .bind(batch.updated_at)
            .bind(batch.audit_log_id)
            .execute(&mut **transaction)
            .await?;

            for piece in &item.pieces {
                sqlx::query(
                    r#"
                    INSERT INTO cargo_piece (id, batch_id, piece_index, cargo_code)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(piece.id)
                .bind(piece.batch_id)
                .bind(piece.piece_index)
                .bind(piece.cargo_code.as_str())
                .execute(&mut **transaction)
                .await?;
            }

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::cargo::test_utils::create_test_cargo_batch;
    use crate::repository::container::test_utils::{create_test_container, seed_container_references};
    use crate::test_helper::setup_test_context;
    use logistics_db::repository::{CreateBatch, LoadBatch};

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_batch_and_pieces_are_stored_together() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();
        let refs = seed_container_references(uow).await?;
        let container = uow
            .containers
            .create_batch(vec![create_test_container(&refs, "KR-40FT-0307-C1")], None)
            .await?
            .remove(0);

        let batch = create_test_cargo_batch(container.id, "KR-40FT-0307-1", 3);
        uow.cargo_batches.create_batch(vec![batch.clone()], None).await?;

        let loaded = uow.cargo_batches.load_batch(&[batch.batch.id]).await?;
        let loaded = loaded[0].as_ref().ok_or("batch not loaded")?;

        assert_eq!(loaded.batch.batch_number.as_str(), "KR-40FT-0307-1");
        assert_eq!(loaded.batch.images, vec!["front.jpg".to_string()]);
        let codes: Vec<&str> = loaded.pieces.iter().map(|p| p.cargo_code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["KR-40FT-0307-1 3-1", "KR-40FT-0307-1 3-2", "KR-40FT-0307-1 3-3"]
        );

        Ok(())
    }
}
