use crate::utils::TryFromRow;
use async_trait::async_trait;
use logistics_db::models::ContainerTypeModel;
use logistics_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContainerTypeRepositoryImpl;

#[async_trait]
impl LoadBatch<sqlx::Postgres, ContainerTypeModel> for ContainerTypeRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ContainerTypeModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl ContainerTypeRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ContainerTypeRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ContainerTypeModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM container_type WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded = HashMap::new();
        for row in rows {
            let item = ContainerTypeModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::reference::test_utils::{create_test_container_type, create_test_currency};
    use crate::test_helper::setup_test_context;
    use logistics_db::repository::{CreateBatch, LoadBatch};
    use rust_decimal::Decimal;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_tariff_round_trips_through_numeric() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let currency = uow
            .payment_currencies
            .create_batch(vec![create_test_currency("KRW")], None)
            .await?
            .remove(0);
        let container_type = create_test_container_type("40FT", Some(currency.id));
        uow.container_types
            .create_batch(vec![container_type.clone()], None)
            .await?;

        let loaded = uow.container_types.load_batch(&[container_type.id]).await?;
        let loaded = loaded[0].as_ref().ok_or("container type not loaded")?;

        assert_eq!(loaded.tariff().price_per_kg, Decimal::from(1000));
        assert_eq!(loaded.tariff().price_per_cbm, Decimal::from(50000));
        assert_eq!(loaded.currency_id, Some(currency.id));

        Ok(())
    }
}
