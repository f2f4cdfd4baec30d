//! PostgreSQL-backed implementations of the service traits.
//!
//! Every mutating call opens one [`UnitOfWork`], writes an audit log row that
//! all of its history and ledger rows point at, and commits only when every
//! step succeeded. The `*_in` methods run against a caller-supplied unit of
//! work and never commit.

pub mod cargo_service;
pub mod container_service;
pub mod payment_service;

pub use cargo_service::PgCargoService;
pub use container_service::PgContainerService;
pub use payment_service::PgPaymentService;

use chrono::{DateTime, Utc};
use logistics_api::domain::storage_fee::StorageFeeTariff;
use logistics_api::domain::actor::Actor;
use logistics_api::error::{ApiError, ApiResult};
use logistics_db::models::{AuditLogModel, ContainerTypeModel, Identifiable};
use logistics_db::repository::{ExistByIds, LoadBatch};
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use crate::config::LogisticsConfig;
use crate::postgres_repositories::UnitOfWork;
use crate::utils::is_unique_violation;

pub(crate) async fn open_audit(
    uow: &UnitOfWork,
    actor: &Actor,
    now: DateTime<Utc>,
) -> ApiResult<AuditLogModel> {
    Ok(uow.audit_logs.create(&AuditLogModel::new(actor.user_id, now)).await?)
}

/// Loads one row or reports `what` as not found.
pub(crate) async fn load_one<T, R>(repo: &R, id: Uuid, what: &str) -> ApiResult<T>
where
    T: Identifiable,
    R: LoadBatch<Postgres, T> + ?Sized,
{
    repo.load_batch(&[id])
        .await?
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| ApiError::NotFound(format!("{what} {id} not found")))
}

/// A duplicate generated code is a collision with a concurrent creation.
pub(crate) fn code_collision(error: Box<dyn Error + Send + Sync>) -> ApiError {
    if is_unique_violation(&*error) {
        ApiError::InvalidState("generated code already exists, retry the operation".to_string())
    } else {
        ApiError::from(error)
    }
}

/// Revenue currency of a container: its type's currency, else the configured default.
pub(crate) async fn revenue_currency(
    uow: &UnitOfWork,
    container_type: &ContainerTypeModel,
    config: &LogisticsConfig,
) -> ApiResult<String> {
    let Some(currency_id) = container_type.currency_id else {
        return Ok(config.default_currency_code.clone());
    };
    let currency = uow
        .payment_currencies
        .load_batch(&[currency_id])
        .await?
        .into_iter()
        .next()
        .flatten();
    Ok(currency
        .map(|c| c.currency_code.to_string())
        .unwrap_or_else(|| config.default_currency_code.clone()))
}

/// Storage-fee tariffs referenced by `ids`, keyed by id. Missing ones are left out.
pub(crate) async fn storage_tariffs(
    uow: &UnitOfWork,
    ids: impl IntoIterator<Item = Uuid>,
) -> ApiResult<HashMap<Uuid, StorageFeeTariff>> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(uow
        .storage_fees
        .load_batch(&ids)
        .await?
        .into_iter()
        .flatten()
        .map(|fee| (fee.id, fee.tariff()))
        .collect())
}

pub(crate) async fn require_exists<R>(repo: &R, id: Uuid, what: &str) -> ApiResult<()>
where
    R: ExistByIds<Postgres> + ?Sized,
{
    let found = repo
        .exist_by_ids(&[id])
        .await?
        .into_iter()
        .any(|(_, exists)| exists);
    if found {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("{what} {id} not found")))
    }
}

#[cfg(test)]
pub mod test_utils;
