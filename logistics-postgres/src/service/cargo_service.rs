use async_trait::async_trait;
use chrono::{DateTime, Utc};
use logistics_api::domain::actor::Actor;
use logistics_api::domain::cargo_lifecycle::{
    plan_distribution, plan_reversal, plan_status_change, reversal_note, CargoTransition,
    DISTRIBUTED_NOTE,
};
use logistics_api::domain::codes::{batch_number, code_prefix, piece_codes};
use logistics_api::domain::container_lifecycle::require_registration_open;
use logistics_api::domain::ledger::RevenueAmounts;
use logistics_api::domain::pricing::quote_price;
use logistics_api::domain::requests::{trimmed, CreateCargoBatchRequest};
use logistics_api::domain::status::{CargoStatus, PaymentMethod};
use logistics_api::domain::storage_fee::StorageFee;
use logistics_api::domain::views::{CreatedCargoBatch, HistoryEntry, PendingBatch};
use logistics_api::error::{ApiError, ApiResult};
use logistics_api::service::CargoService;
use logistics_db::models::{
    CargoBatch, CargoBatchModel, CargoPieceModel, CargoStatusHistoryModel, ContainerModel,
    ContainerTypeModel, DirectionModel, PaymentRecordModel, RevenueDetails, StorageFeeModel,
};
use logistics_db::repository::pagination::{Page, PageRequest};
use logistics_db::repository::{CreateBatch, DeleteBatch, UpdateBatch};
use logistics_db::utils::{to_heapless, to_optional_heapless};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{code_collision, load_one, open_audit, require_exists, revenue_currency, storage_tariffs};
use crate::config::LogisticsConfig;
use crate::postgres_repositories::{LogisticsRepositories, UnitOfWork};
use crate::repository::container::CodeSequenceRepositoryImpl;

fn invalid(error: String) -> ApiError {
    ApiError::ValidationError(error)
}

pub struct PgCargoService {
    repos: Arc<LogisticsRepositories>,
    config: Arc<LogisticsConfig>,
}

impl PgCargoService {
    pub fn new(repos: Arc<LogisticsRepositories>, config: Arc<LogisticsConfig>) -> Self {
        Self { repos, config }
    }

    async fn lock_batch(uow: &UnitOfWork, batch_id: Uuid) -> ApiResult<CargoBatchModel> {
        uow.cargo_batches
            .lock_for_update(batch_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("cargo batch {batch_id} not found")))
    }

    #[tracing::instrument(name = "cargo.create", skip_all, fields(container_id = %request.container_id))]
    pub async fn create_cargo_batch_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        request: CreateCargoBatchRequest,
    ) -> ApiResult<CreatedCargoBatch> {
        request.validate()?;
        let now = Utc::now();

        let container = uow
            .containers
            .lock_for_update(request.container_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("container {} not found", request.container_id))
            })?;
        require_registration_open(container.status).inspect_err(|e| {
            warn!(container_code = %container.container_code, error = %e, "cargo registration rejected")
        })?;

        let container_type: ContainerTypeModel =
            load_one(&*uow.container_types, container.container_type_id, "container type").await?;
        let direction: DirectionModel =
            load_one(&*uow.directions, container.direction_id, "direction").await?;
        if let Some(storage_fee_id) = request.storage_fee_id {
            let _: StorageFeeModel = load_one(&*uow.storage_fees, storage_fee_id, "storage fee").await?;
        }
        if let Some(location_id) = request.payment_location_id {
            require_exists(&*uow.payment_locations, location_id, "payment location").await?;
        }

        let quote = quote_price(&request.pricing_input(), &container_type.tariff())?;

        let audit = open_audit(uow, actor, now).await?;
        let prefix = code_prefix(&direction.direction_code, &container_type.type_code, now);
        let sequence = uow
            .code_sequences
            .next_value(&CodeSequenceRepositoryImpl::batch_scope(&prefix))
            .await?;
        let number = batch_number(&prefix, sequence);
        let cargo_codes = piece_codes(&number, request.total_pieces);

        let batch_id = Uuid::new_v4();
        let mut pieces = Vec::with_capacity(cargo_codes.len());
        for (index, code) in cargo_codes.iter().enumerate() {
            pieces.push(CargoPieceModel {
                id: Uuid::new_v4(),
                batch_id,
                piece_index: index as i32 + 1,
                cargo_code: to_heapless(code, "cargo_code").map_err(invalid)?,
            });
        }

        let batch = CargoBatchModel {
            id: batch_id,
            batch_number: to_heapless(&number, "batch_number").map_err(invalid)?,
            container_id: container.id,
            cargo_name: to_optional_heapless(request.cargo_name.as_deref(), "cargo_name").map_err(invalid)?,
            sender_name: to_heapless(request.sender.name.trim(), "sender_name").map_err(invalid)?,
            sender_phone: to_optional_heapless(request.sender.phone.as_deref(), "sender_phone")
                .map_err(invalid)?,
            sender_address: to_optional_heapless(request.sender.address.as_deref(), "sender_address")
                .map_err(invalid)?,
            receiver_name: to_heapless(request.receiver.name.trim(), "receiver_name").map_err(invalid)?,
            receiver_phone: to_optional_heapless(request.receiver.phone.as_deref(), "receiver_phone")
                .map_err(invalid)?,
            receiver_address: to_optional_heapless(
                request.receiver.address.as_deref(),
                "receiver_address",
            )
            .map_err(invalid)?,
            cargo_type: quote.cargo_type,
            weight_kg: quote.weight_kg,
            length_cm: quote.length_cm,
            width_cm: quote.width_cm,
            height_cm: quote.height_cm,
            volume_cbm: quote.volume_cbm,
            unit_price: quote.unit_price,
            is_manual_price: quote.is_manual_price,
            manual_price: quote.manual_price,
            total_pieces: request.total_pieces,
            storage_fee_id: request.storage_fee_id,
            payment_location_id: request.payment_location_id,
            description: trimmed(request.description),
            images: request.images,
            status: CargoStatus::Registered,
            distribution_available_date: None,
            storage_days: None,
            storage_fee_amount: None,
            registered_by: actor.user_id,
            registered_at: now,
            updated_by: None,
            updated_at: now,
            audit_log_id: None,
        };
        let batch_number_hs = batch.batch_number.clone();

        uow.cargo_batches
            .create_batch(vec![CargoBatch { batch, pieces }], Some(audit.id))
            .await
            .map_err(code_collision)?;
        let current_count = uow
            .containers
            .adjust_current_count(container.id, request.total_pieces, audit.id)
            .await?;

        let history = CargoStatusHistoryModel::new(
            batch_id,
            batch_number_hs,
            None,
            CargoStatus::Registered,
            actor.user_id,
            now,
            Some(format!("Batch registered: {} pieces", request.total_pieces)),
        );
        uow.cargo_history.create_batch(vec![history], Some(audit.id)).await?;

        info!(
            batch_number = %number,
            pieces = request.total_pieces,
            unit_price = %quote.unit_price,
            current_count,
            "cargo batch registered"
        );
        Ok(CreatedCargoBatch {
            batch_id,
            batch_number: number,
            cargo_codes,
            unit_price: quote.unit_price,
        })
    }

    #[tracing::instrument(name = "cargo.change_status", skip_all, fields(%batch_id, to = %status))]
    pub async fn change_cargo_status_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        batch_id: Uuid,
        status: CargoStatus,
        payment_method: Option<PaymentMethod>,
        receiver_phone: Option<String>,
    ) -> ApiResult<()> {
        let mut batch = Self::lock_batch(uow, batch_id).await?;
        let container: ContainerModel =
            load_one(&*uow.containers, batch.container_id, "container").await?;
        let transition = plan_status_change(batch.status, status, payment_method, container.status)
            .inspect_err(|e| warn!(from = %batch.status, error = %e, "cargo status change rejected"))?;

        let now = Utc::now();
        match transition {
            CargoTransition::Distribute { from, payment_method } => {
                self.run_distribution(uow, actor, batch, &container, from, payment_method, receiver_phone, now)
                    .await
            }
            CargoTransition::Relabel { from, to } => {
                let audit = open_audit(uow, actor, now).await?;
                batch.status = to;
                batch.updated_by = Some(actor.user_id);
                batch.updated_at = now;
                let number = batch.batch_number.clone();
                uow.cargo_batches.update_batch(vec![batch], audit.id).await?;

                let history = CargoStatusHistoryModel::new(
                    batch_id,
                    number,
                    Some(from),
                    to,
                    actor.user_id,
                    now,
                    Some(format!("Status changed from {from} to {to}")),
                );
                uow.cargo_history.create_batch(vec![history], Some(audit.id)).await?;
                info!(%from, %to, "cargo status changed");
                Ok(())
            }
            CargoTransition::Reverse { .. } => Err(ApiError::InvalidState(
                "a distribution is reversed only through the reversal operation".to_string(),
            )),
        }
    }

    #[tracing::instrument(name = "cargo.distribute", skip_all, fields(%batch_id))]
    pub async fn distribute_cargo_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        batch_id: Uuid,
        payment_method: Option<PaymentMethod>,
        receiver_phone: Option<String>,
    ) -> ApiResult<()> {
        let batch = Self::lock_batch(uow, batch_id).await?;
        let transition = plan_distribution(batch.status, payment_method)
            .inspect_err(|e| warn!(from = %batch.status, error = %e, "distribution rejected"))?;
        let CargoTransition::Distribute { from, payment_method } = transition else {
            return Err(ApiError::InternalError(
                "distribution planned an unexpected transition".to_string(),
            ));
        };

        let container: ContainerModel =
            load_one(&*uow.containers, batch.container_id, "container").await?;
        self.run_distribution(uow, actor, batch, &container, from, payment_method, receiver_phone, Utc::now())
            .await
    }

    /// Freezes the storage fee of a locked batch, marks it distributed and
    /// books its single revenue line.
    #[allow(clippy::too_many_arguments)]
    async fn run_distribution(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        mut batch: CargoBatchModel,
        container: &ContainerModel,
        from: CargoStatus,
        payment_method: PaymentMethod,
        receiver_phone: Option<String>,
        now: DateTime<Utc>,
    ) -> ApiResult<()> {
        let audit = open_audit(uow, actor, now).await?;

        let tariffs = storage_tariffs(uow, batch.storage_fee_id).await?;
        let tariff = batch.storage_fee_id.and_then(|id| tariffs.get(&id));
        let fee = self.config.accrual_policy().accrue(&batch.accrual_input(), tariff, now);

        batch.status = CargoStatus::Distributed;
        batch.storage_days = Some(fee.storage_days);
        batch.storage_fee_amount = Some(fee.storage_fee_amount);
        batch.updated_by = Some(actor.user_id);
        batch.updated_at = now;
        uow.cargo_batches.update_batch(vec![batch.clone()], audit.id).await?;

        let history = CargoStatusHistoryModel::new(
            batch.id,
            batch.batch_number.clone(),
            Some(from),
            CargoStatus::Distributed,
            actor.user_id,
            now,
            Some(DISTRIBUTED_NOTE.to_string()),
        );
        uow.cargo_history.create_batch(vec![history], Some(audit.id)).await?;

        let container_type: ContainerTypeModel =
            load_one(&*uow.container_types, container.container_type_id, "container type").await?;
        let currency_code = revenue_currency(uow, &container_type, &self.config).await?;
        let aggregate: CargoBatch = load_one(&*uow.cargo_batches, batch.id, "cargo batch").await?;
        let cargo_code = aggregate
            .first_cargo_code()
            .map(|code| to_heapless(code, "cargo_code"))
            .transpose()
            .map_err(ApiError::InternalError)?;
        let receiver_phone_verified = match trimmed(receiver_phone) {
            Some(phone) => Some(to_heapless(&phone, "receiver_phone").map_err(invalid)?),
            None => batch.receiver_phone.clone(),
        };

        let amounts = RevenueAmounts::new(batch.base_price(), fee.storage_fee_amount);
        let record = PaymentRecordModel::revenue(
            &batch,
            RevenueDetails {
                cargo_code,
                amounts,
                currency_code: to_heapless(&currency_code, "currency_code").map_err(invalid)?,
                payment_method,
                receiver_phone_verified,
            },
            actor.user_id,
            now,
        );
        uow.payment_records.create_batch(vec![record], Some(audit.id)).await?;

        info!(
            batch_number = %batch.batch_number,
            %from,
            storage_days = fee.storage_days,
            total = %amounts.total_amount,
            currency = %currency_code,
            "cargo distributed"
        );
        Ok(())
    }

    #[tracing::instrument(name = "cargo.reverse_distribution", skip_all, fields(%batch_id))]
    pub async fn reverse_distribution_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        batch_id: Uuid,
        reason: &str,
    ) -> ApiResult<()> {
        actor.require_system_admin("reverse a distribution")?;
        let mut batch = Self::lock_batch(uow, batch_id).await?;
        let transition = plan_reversal(batch.status, actor, reason)
            .inspect_err(|e| warn!(from = %batch.status, error = %e, "reversal rejected"))?;
        let CargoTransition::Reverse { reason } = transition else {
            return Err(ApiError::InternalError(
                "reversal planned an unexpected transition".to_string(),
            ));
        };

        let now = Utc::now();
        let audit = open_audit(uow, actor, now).await?;
        let deleted = uow
            .payment_records
            .delete_revenue_by_batch_number(&batch.batch_number)
            .await?;

        batch.status = CargoStatus::PendingDistribution;
        batch.updated_by = Some(actor.user_id);
        batch.updated_at = now;
        let number = batch.batch_number.clone();
        uow.cargo_batches.update_batch(vec![batch], audit.id).await?;

        let history = CargoStatusHistoryModel::new(
            batch_id,
            number.clone(),
            Some(CargoStatus::Distributed),
            CargoStatus::PendingDistribution,
            actor.user_id,
            now,
            Some(reversal_note(&reason, deleted.records, deleted.total_amount)),
        );
        uow.cargo_history.create_batch(vec![history], Some(audit.id)).await?;

        warn!(
            batch_number = %number,
            deleted_records = deleted.records,
            deleted_amount = %deleted.total_amount,
            %reason,
            "distribution reversed, revenue deleted"
        );
        Ok(())
    }

    #[tracing::instrument(name = "cargo.delete", skip_all, fields(%batch_id))]
    pub async fn delete_cargo_batch_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        batch_id: Uuid,
    ) -> ApiResult<()> {
        actor.require_system_admin("delete a cargo batch")?;
        let batch = Self::lock_batch(uow, batch_id).await?;

        let now = Utc::now();
        let audit = open_audit(uow, actor, now).await?;
        uow.cargo_batches.delete_batch(&[batch_id], Some(audit.id)).await?;
        let current_count = uow
            .containers
            .adjust_current_count(batch.container_id, -batch.total_pieces, audit.id)
            .await?;

        let history = CargoStatusHistoryModel::new(
            batch_id,
            batch.batch_number.clone(),
            Some(batch.status),
            batch.status,
            actor.user_id,
            now,
            Some(format!("Batch deleted: {} pieces", batch.total_pieces)),
        );
        uow.cargo_history.create_batch(vec![history], Some(audit.id)).await?;

        info!(batch_number = %batch.batch_number, current_count, "cargo batch deleted");
        Ok(())
    }

    pub async fn get_storage_fee_in(&self, uow: &UnitOfWork, batch_id: Uuid) -> ApiResult<StorageFee> {
        let aggregate: CargoBatch = load_one(&*uow.cargo_batches, batch_id, "cargo batch").await?;
        let batch = aggregate.batch;
        let tariffs = storage_tariffs(uow, batch.storage_fee_id).await?;
        let tariff = batch.storage_fee_id.and_then(|id| tariffs.get(&id));
        Ok(self
            .config
            .accrual_policy()
            .accrue(&batch.accrual_input(), tariff, Utc::now()))
    }

    pub async fn list_pending_distribution_in(
        &self,
        uow: &UnitOfWork,
        container_id: Option<Uuid>,
        page: PageRequest,
    ) -> ApiResult<Page<PendingBatch>> {
        let page = uow.cargo_batches.find_pending(container_id, page).await?;
        let tariffs = storage_tariffs(uow, page.items.iter().filter_map(|b| b.storage_fee_id)).await?;

        let mut currencies: HashMap<Uuid, String> = HashMap::new();
        for batch in &page.items {
            if currencies.contains_key(&batch.container_id) {
                continue;
            }
            let container: ContainerModel =
                load_one(&*uow.containers, batch.container_id, "container").await?;
            let container_type: ContainerTypeModel =
                load_one(&*uow.container_types, container.container_type_id, "container type")
                    .await?;
            let currency = revenue_currency(uow, &container_type, &self.config).await?;
            currencies.insert(batch.container_id, currency);
        }

        let policy = self.config.accrual_policy();
        let now = Utc::now();
        Ok(page.map(|batch| {
            let tariff = batch.storage_fee_id.and_then(|id| tariffs.get(&id));
            let line = batch.to_batch_line(policy.accrue(&batch.accrual_input(), tariff, now));
            PendingBatch {
                total_amount: line.storage.total_with_storage,
                container_id: batch.container_id,
                currency_code: currencies
                    .get(&batch.container_id)
                    .cloned()
                    .unwrap_or_else(|| self.config.default_currency_code.clone()),
                line,
            }
        }))
    }

    pub async fn cargo_history_in(
        &self,
        uow: &UnitOfWork,
        batch_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry<CargoStatus>>> {
        let page = uow.cargo_history.find_by_batch_id(batch_id, page).await?;
        Ok(page.map(|h| h.to_entry()))
    }
}

#[async_trait]
impl CargoService for PgCargoService {
    async fn create_cargo_batch(
        &self,
        actor: &Actor,
        request: CreateCargoBatchRequest,
    ) -> ApiResult<CreatedCargoBatch> {
        let uow = self.repos.begin().await?;
        let created = self.create_cargo_batch_in(&uow, actor, request).await?;
        uow.commit().await?;
        Ok(created)
    }

    async fn change_cargo_status(
        &self,
        actor: &Actor,
        batch_id: Uuid,
        status: CargoStatus,
        payment_method: Option<PaymentMethod>,
        receiver_phone: Option<String>,
    ) -> ApiResult<()> {
        let uow = self.repos.begin().await?;
        self.change_cargo_status_in(&uow, actor, batch_id, status, payment_method, receiver_phone)
            .await?;
        uow.commit().await?;
        Ok(())
    }

    async fn distribute_cargo(
        &self,
        actor: &Actor,
        batch_id: Uuid,
        payment_method: Option<PaymentMethod>,
        receiver_phone: Option<String>,
    ) -> ApiResult<()> {
        let uow = self.repos.begin().await?;
        self.distribute_cargo_in(&uow, actor, batch_id, payment_method, receiver_phone)
            .await?;
        uow.commit().await?;
        Ok(())
    }

    async fn reverse_distribution(&self, actor: &Actor, batch_id: Uuid, reason: &str) -> ApiResult<()> {
        let uow = self.repos.begin().await?;
        self.reverse_distribution_in(&uow, actor, batch_id, reason).await?;
        uow.commit().await?;
        Ok(())
    }

    async fn delete_cargo_batch(&self, actor: &Actor, batch_id: Uuid) -> ApiResult<()> {
        let uow = self.repos.begin().await?;
        self.delete_cargo_batch_in(&uow, actor, batch_id).await?;
        uow.commit().await?;
        Ok(())
    }

    async fn get_storage_fee(&self, batch_id: Uuid) -> ApiResult<StorageFee> {
        let uow = self.repos.begin().await?;
        self.get_storage_fee_in(&uow, batch_id).await
    }

    async fn list_pending_distribution(
        &self,
        container_id: Option<Uuid>,
        page: PageRequest,
    ) -> ApiResult<Page<PendingBatch>> {
        let uow = self.repos.begin().await?;
        self.list_pending_distribution_in(&uow, container_id, page).await
    }

    async fn cargo_history(
        &self,
        batch_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry<CargoStatus>>> {
        let uow = self.repos.begin().await?;
        self.cargo_history_in(&uow, batch_id, page).await
    }
}
