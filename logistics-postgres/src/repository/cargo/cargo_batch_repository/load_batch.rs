use crate::utils::TryFromRow;
use async_trait::async_trait;
use logistics_db::models::{CargoBatch, CargoBatchModel, CargoPieceModel};
use logistics_db::repository::LoadBatch;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CargoBatchRepositoryImpl;

#[async_trait]
impl LoadBatch<sqlx::Postgres, CargoBatch> for CargoBatchRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CargoBatch>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl CargoBatchRepositoryImpl {
    /// Loads batches with their pieces ordered by piece index.
    pub(super) async fn load_batch_impl(
        repo: &CargoBatchRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CargoBatch>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let (batch_rows, piece_rows) = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let batch_rows = sqlx::query("SELECT * FROM cargo_batch WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?;
            let piece_rows = sqlx::query(
                "SELECT * FROM cargo_piece WHERE batch_id = ANY($1) ORDER BY batch_id, piece_index",
            )
            .bind(ids)
            .fetch_all(&mut **transaction)
            .await?;
            (batch_rows, piece_rows)
        };

        let mut pieces: HashMap<Uuid, Vec<CargoPieceModel>> = HashMap::new();
        for row in piece_rows {
            let piece = CargoPieceModel::try_from_row(&row)?;
            pieces.entry(piece.batch_id).or_default().push(piece);
        }

        let mut loaded = HashMap::new();
        for row in batch_rows {
            let batch = CargoBatchModel::try_from_row(&row)?;
            let batch_pieces = pieces.remove(&batch.id).unwrap_or_default();
            loaded.insert(
                batch.id,
                CargoBatch {
                    batch,
                    pieces: batch_pieces,
                },
            );
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}
