use crate::utils::TryFromRow;
use async_trait::async_trait;
use logistics_db::models::DirectionModel;
use logistics_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DirectionRepositoryImpl;

#[async_trait]
impl LoadBatch<sqlx::Postgres, DirectionModel> for DirectionRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<DirectionModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl DirectionRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &DirectionRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<DirectionModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM direction WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded = HashMap::new();
        for row in rows {
            let item = DirectionModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::reference::test_utils::create_test_direction;
    use crate::test_helper::setup_test_context;
    use logistics_db::repository::{CreateBatch, LoadBatch};
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_load_batch_keeps_request_order() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let directions = &ctx.uow().directions;

        let saved = directions
            .create_batch(vec![create_test_direction("KR-UB"), create_test_direction("KR-TS")], None)
            .await?;
        let missing = Uuid::new_v4();

        let loaded = directions
            .load_batch(&[saved[1].id, missing, saved[0].id])
            .await?;

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].as_ref().map(|d| d.direction_code.as_str()), Some("KR-TS"));
        assert!(loaded[1].is_none());
        assert_eq!(loaded[2].as_ref(), Some(&saved[0]));

        Ok(())
    }
}
