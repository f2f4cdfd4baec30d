//! Test helper module for transaction-based test isolation
//!
//! Every test works inside one unit of work that is never committed, so the
//! transaction is rolled back when the context is dropped and no cleanup is
//! needed.

use crate::config::LogisticsConfig;
use crate::postgres_repositories::{LogisticsRepositories, UnitOfWork};
use crate::service::{PgCargoService, PgContainerService, PgPaymentService};
use std::sync::Arc;

/// Test context that provides a transactional database session
pub struct TestContext {
    pub uow: UnitOfWork,
    pub repos: Arc<LogisticsRepositories>,
    pub config: Arc<LogisticsConfig>,
}

impl TestContext {
    pub fn uow(&self) -> &UnitOfWork {
        &self.uow
    }

    pub fn container_service(&self) -> PgContainerService {
        PgContainerService::new(self.repos.clone(), self.config.clone())
    }

    pub fn cargo_service(&self) -> PgCargoService {
        PgCargoService::new(self.repos.clone(), self.config.clone())
    }

    pub fn payment_service(&self) -> PgPaymentService {
        PgPaymentService::new(self.repos.clone(), self.config.clone())
    }
}

/// Setup a test context with a transactional database session
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let audit_logs = &ctx.uow().audit_logs;
///
///     // All changes will be rolled back when ctx is dropped
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let config = LogisticsConfig {
        max_connections: 2,
        ..LogisticsConfig::from_env()?
    };
    let pool = config.connect().await?;

    let repos = Arc::new(LogisticsRepositories::new(Arc::new(pool)));
    repos.migrate().await?;
    let uow = repos.begin().await?;

    Ok(TestContext {
        uow,
        repos,
        config: Arc::new(config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use logistics_db::models::AuditLogModel;
    use logistics_db::repository::LoadBatch;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_transaction_rollback() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let audit_log = AuditLogModel::new(Uuid::new_v4(), Utc::now());
        {
            let ctx = setup_test_context().await?;
            ctx.uow().audit_logs.create(&audit_log).await?;

            let loaded = ctx.uow().audit_logs.load_batch(&[audit_log.id]).await?;
            assert!(loaded[0].is_some());
        }

        {
            let ctx = setup_test_context().await?;
            let loaded = ctx.uow().audit_logs.load_batch(&[audit_log.id]).await?;
            assert!(loaded[0].is_none());
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_commit_consumes_transaction() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.repos.begin().await?;
        uow.commit().await?;
        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_migrate_twice_is_a_no_op() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        ctx.repos.migrate().await?;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'public' \
             AND table_name IN ('container', 'cargo_batch', 'payment_record')",
        )
        .fetch_one(ctx.repos.pool())
        .await?;
        assert_eq!(tables, 3);

        Ok(())
    }
}
