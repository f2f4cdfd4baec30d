use async_trait::async_trait;
use logistics_db::{models::AuditLogModel, repository::LoadBatch};
use postgres_unit_of_work::Executor;
use sqlx::Postgres;
use uuid::Uuid;

pub struct AuditLogRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditLogRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    pub async fn create(
        &self,
        audit_log: &AuditLogModel,
    ) -> Result<AuditLogModel, Box<dyn std::error::Error + Send + Sync>> {
        Self::create_impl(self, audit_log).await
    }
}

#[async_trait]
impl LoadBatch<Postgres, AuditLogModel> for AuditLogRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<AuditLogModel>>, Box<dyn std::error::Error + Send + Sync>> {
        super::load_batch::load_batch_impl(&self.executor, ids).await
    }
}
