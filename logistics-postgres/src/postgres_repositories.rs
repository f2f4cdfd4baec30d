use postgres_unit_of_work::Executor;
use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::audit::AuditLogRepositoryImpl;
use crate::repository::cargo::{CargoBatchRepositoryImpl, CargoStatusHistoryRepositoryImpl};
use crate::repository::container::{
    CodeSequenceRepositoryImpl, ContainerRepositoryImpl, ContainerStatusHistoryRepositoryImpl,
};
use crate::repository::payment::PaymentRecordRepositoryImpl;
use crate::repository::reference::{
    ContainerTypeRepositoryImpl, DirectionRepositoryImpl, PaymentCurrencyRepositoryImpl,
    PaymentLocationRepositoryImpl, RoadInfoRepositoryImpl, StorageFeeRepositoryImpl,
};

pub struct LogisticsRepositories {
    pool: Arc<PgPool>,
}

impl LogisticsRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded `migrations/` that the database has not seen yet.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&*self.pool).await
    }

    /// Create all repositories sharing a single transaction
    pub async fn begin(&self) -> Result<UnitOfWork, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork::new(Executor::new(tx)))
    }
}

/// Every repository bound to one transaction. Dropping it without calling
/// [`UnitOfWork::commit`] rolls the work back.
pub struct UnitOfWork {
    executor: Executor,

    pub audit_logs: Arc<AuditLogRepositoryImpl>,

    pub directions: Arc<DirectionRepositoryImpl>,
    pub container_types: Arc<ContainerTypeRepositoryImpl>,
    pub storage_fees: Arc<StorageFeeRepositoryImpl>,
    pub payment_currencies: Arc<PaymentCurrencyRepositoryImpl>,
    pub road_infos: Arc<RoadInfoRepositoryImpl>,
    pub payment_locations: Arc<PaymentLocationRepositoryImpl>,

    pub containers: Arc<ContainerRepositoryImpl>,
    pub container_history: Arc<ContainerStatusHistoryRepositoryImpl>,
    pub code_sequences: Arc<CodeSequenceRepositoryImpl>,

    pub cargo_batches: Arc<CargoBatchRepositoryImpl>,
    pub cargo_history: Arc<CargoStatusHistoryRepositoryImpl>,

    pub payment_records: Arc<PaymentRecordRepositoryImpl>,
}

impl UnitOfWork {
    fn new(executor: Executor) -> Self {
        Self {
            audit_logs: Arc::new(AuditLogRepositoryImpl::new(executor.clone())),
            directions: Arc::new(DirectionRepositoryImpl::new(executor.clone())),
            container_types: Arc::new(ContainerTypeRepositoryImpl::new(executor.clone())),
            storage_fees: Arc::new(StorageFeeRepositoryImpl::new(executor.clone())),
            payment_currencies: Arc::new(PaymentCurrencyRepositoryImpl::new(executor.clone())),
            road_infos: Arc::new(RoadInfoRepositoryImpl::new(executor.clone())),
            payment_locations: Arc::new(PaymentLocationRepositoryImpl::new(executor.clone())),
            containers: Arc::new(ContainerRepositoryImpl::new(executor.clone())),
            container_history: Arc::new(ContainerStatusHistoryRepositoryImpl::new(executor.clone())),
            code_sequences: Arc::new(CodeSequenceRepositoryImpl::new(executor.clone())),
            cargo_batches: Arc::new(CargoBatchRepositoryImpl::new(executor.clone())),
            cargo_history: Arc::new(CargoStatusHistoryRepositoryImpl::new(executor.clone())),
            payment_records: Arc::new(PaymentRecordRepositoryImpl::new(executor.clone())),
            executor,
        }
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        let tx = self.executor.tx.lock().await.take();
        match tx {
            Some(tx) => tx.commit().await,
            None => Err(sqlx::Error::Protocol(
                "Transaction has been consumed".to_string(),
            )),
        }
    }
}
