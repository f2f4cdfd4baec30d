use crate::utils::TryFromRow;
use async_trait::async_trait;
use logistics_db::models::StorageFeeModel;
use logistics_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StorageFeeRepositoryImpl;

#[async_trait]
impl LoadBatch<sqlx::Postgres, StorageFeeModel> for StorageFeeRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<StorageFeeModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl StorageFeeRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &StorageFeeRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<StorageFeeModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM storage_fee WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded = HashMap::new();
        for row in rows {
            let item = StorageFeeModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::reference::test_utils::create_test_storage_fee;
    use crate::test_helper::setup_test_context;
    use logistics_api::domain::status::StorageUnitType;
    use logistics_db::repository::{CreateBatch, LoadBatch};

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_unit_type_round_trips_as_enum() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let storage_fees = &ctx.uow().storage_fees;

        let fee = create_test_storage_fee(StorageUnitType::PerCbm, None);
        storage_fees.create_batch(vec![fee.clone()], None).await?;

        let loaded = storage_fees.load_batch(&[fee.id]).await?;

        assert_eq!(loaded[0].as_ref().map(|f| f.unit_type), Some(StorageUnitType::PerCbm));

        Ok(())
    }
}
