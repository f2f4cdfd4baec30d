use async_trait::async_trait;
use chrono::{DateTime, Utc};
use logistics_api::domain::actor::Actor;
use logistics_api::domain::codes::{code_prefix, container_code};
use logistics_api::domain::container_lifecycle::{
    plan_container_status_change, plan_start_distribution, CascadeCandidate, ContainerTransition,
    DistributionCascade,
};
use logistics_api::domain::settlement::SummaryStatistics;
use logistics_api::domain::requests::{
    trimmed, CreateContainerRequest, UpdateContainerDetailsRequest,
};
use logistics_api::domain::status::{CargoStatus, ContainerStatus};
use logistics_api::domain::views::{
    ContainerSummary, CreatedContainer, DistributionStarted, HistoryEntry,
};
use logistics_api::error::{ApiError, ApiResult};
use logistics_api::service::ContainerService;
use logistics_db::models::{
    AuditLogModel, CargoStatusHistoryModel, ContainerModel, ContainerStatusHistoryModel,
    ContainerTypeModel, DirectionModel,
};
use logistics_db::repository::pagination::{Page, PageRequest};
use logistics_db::repository::{CreateBatch, DeleteBatch, UpdateBatch};
use logistics_db::utils::{to_heapless, to_optional_heapless};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{code_collision, load_one, open_audit, require_exists, revenue_currency, storage_tariffs};
use crate::config::LogisticsConfig;
use crate::postgres_repositories::{LogisticsRepositories, UnitOfWork};
use crate::repository::container::CodeSequenceRepositoryImpl;

pub const CONTAINER_CREATED_NOTE: &str = "Container created";

pub struct PgContainerService {
    repos: Arc<LogisticsRepositories>,
    config: Arc<LogisticsConfig>,
}

impl PgContainerService {
    pub fn new(repos: Arc<LogisticsRepositories>, config: Arc<LogisticsConfig>) -> Self {
        Self { repos, config }
    }

    async fn lock_container(uow: &UnitOfWork, container_id: Uuid) -> ApiResult<ContainerModel> {
        uow.containers
            .lock_for_update(container_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("container {container_id} not found")))
    }

    #[tracing::instrument(name = "container.create", skip_all, fields(direction_id = %request.direction_id))]
    pub async fn create_container_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        request: CreateContainerRequest,
    ) -> ApiResult<CreatedContainer> {
        request.validate()?;
        let now = Utc::now();

        let direction: DirectionModel = load_one(&*uow.directions, request.direction_id, "direction").await?;
        let container_type: ContainerTypeModel =
            load_one(&*uow.container_types, request.container_type_id, "container type").await?;
        if let Some(road_info_id) = request.road_info_id {
            require_exists(&*uow.road_infos, road_info_id, "road info").await?;
        }

        let audit = open_audit(uow, actor, now).await?;
        let prefix = code_prefix(&direction.direction_code, &container_type.type_code, now);
        let sequence = uow
            .code_sequences
            .next_value(&CodeSequenceRepositoryImpl::container_scope(&prefix))
            .await?;
        let code = container_code(&prefix, sequence);

        let container = ContainerModel {
            id: Uuid::new_v4(),
            container_code: to_heapless(&code, "container_code").map_err(ApiError::ValidationError)?,
            name: to_optional_heapless(request.name.as_deref(), "name")
                .map_err(ApiError::ValidationError)?,
            direction_id: direction.id,
            container_type_id: container_type.id,
            road_info_id: request.road_info_id,
            registration_date: Some(request.registration_date.unwrap_or_else(|| now.date_naive())),
            departure_date: request.departure_date,
            arrival_date: request.arrival_date,
            description: trimmed(request.description),
            current_count: 0,
            status: ContainerStatus::OpenRegistration,
            status_changed_by: Some(actor.user_id),
            status_changed_at: Some(now),
            distribution_start_date: None,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
            audit_log_id: None,
        };
        let container = uow
            .containers
            .create_batch(vec![container], Some(audit.id))
            .await
            .map_err(code_collision)?
            .remove(0);

        let history = ContainerStatusHistoryModel::new(
            container.id,
            None,
            ContainerStatus::OpenRegistration,
            actor.user_id,
            now,
            Some(CONTAINER_CREATED_NOTE.to_string()),
        );
        uow.container_history.create_batch(vec![history], Some(audit.id)).await?;

        info!(container_code = %code, container_id = %container.id, "container created");
        Ok(CreatedContainer {
            container_id: container.id,
            container_code: code,
        })
    }

    #[tracing::instrument(name = "container.update_details", skip_all, fields(%container_id))]
    pub async fn update_container_details_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        container_id: Uuid,
        request: UpdateContainerDetailsRequest,
    ) -> ApiResult<()> {
        request.validate()?;
        let request = request.normalized();
        let mut container = Self::lock_container(uow, container_id).await?;
        if let Some(road_info_id) = request.road_info_id {
            require_exists(&*uow.road_infos, road_info_id, "road info").await?;
        }

        let now = Utc::now();
        let audit = open_audit(uow, actor, now).await?;
        container.name =
            to_optional_heapless(request.name.as_deref(), "name").map_err(ApiError::ValidationError)?;
        container.road_info_id = request.road_info_id;
        container.departure_date = request.departure_date;
        container.arrival_date = request.arrival_date;
        container.description = request.description;
        container.updated_at = now;
        uow.containers.update_batch(vec![container], audit.id).await?;

        info!(%container_id, "container details updated");
        Ok(())
    }

    #[tracing::instrument(name = "container.change_status", skip_all, fields(%container_id, to = %status))]
    pub async fn change_container_status_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        container_id: Uuid,
        status: ContainerStatus,
    ) -> ApiResult<()> {
        let container = Self::lock_container(uow, container_id).await?;
        let transition = plan_container_status_change(container.status, status)
            .inspect_err(|e| warn!(from = %container.status, error = %e, "container status change rejected"))?;

        let now = Utc::now();
        let audit = open_audit(uow, actor, now).await?;
        match transition {
            ContainerTransition::StartDistribution { .. } => {
                Self::run_distribution_start(uow, actor, &audit, container, transition, now).await?;
            }
            ContainerTransition::Relabel { from, to } => {
                let mut container = container;
                container.status = to;
                container.status_changed_by = Some(actor.user_id);
                container.status_changed_at = Some(now);
                container.updated_at = now;
                uow.containers.update_batch(vec![container], audit.id).await?;

                let history = ContainerStatusHistoryModel::new(
                    container_id,
                    Some(from),
                    to,
                    actor.user_id,
                    now,
                    Some(format!("Status changed from {from} to {to}")),
                );
                uow.container_history.create_batch(vec![history], Some(audit.id)).await?;
                info!(%from, %to, "container status changed");
            }
        }
        Ok(())
    }

    #[tracing::instrument(name = "container.start_distribution", skip_all, fields(%container_id))]
    pub async fn start_container_distribution_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        container_id: Uuid,
    ) -> ApiResult<DistributionStarted> {
        let container = Self::lock_container(uow, container_id).await?;
        let transition = plan_start_distribution(container.status)
            .inspect_err(|e| warn!(from = %container.status, error = %e, "distribution start rejected"))?;

        let now = Utc::now();
        let audit = open_audit(uow, actor, now).await?;
        Self::run_distribution_start(uow, actor, &audit, container, transition, now).await
    }

    /// Opens distribution on a locked container and moves every batch not yet
    /// distributed to `pending_distribution`, starting its storage-fee clock.
    async fn run_distribution_start(
        uow: &UnitOfWork,
        actor: &Actor,
        audit: &AuditLogModel,
        mut container: ContainerModel,
        transition: ContainerTransition,
        now: DateTime<Utc>,
    ) -> ApiResult<DistributionStarted> {
        let batches = uow.cargo_batches.find_by_container_id(container.id).await?;
        let cascade = DistributionCascade::plan(
            batches
                .iter()
                .map(|b| CascadeCandidate {
                    batch_id: b.id,
                    batch_number: b.batch_number.to_string(),
                    status: b.status,
                    total_pieces: b.total_pieces,
                })
                .collect(),
        );

        let ids: Vec<Uuid> = cascade.moved.iter().map(|c| c.batch_id).collect();
        uow.cargo_batches
            .mark_pending_distribution(&ids, now, actor.user_id, audit.id)
            .await?;

        let mut batch_history = Vec::with_capacity(cascade.moved.len());
        for candidate in &cascade.moved {
            batch_history.push(CargoStatusHistoryModel::new(
                candidate.batch_id,
                to_heapless(&candidate.batch_number, "batch_number").map_err(ApiError::InternalError)?,
                Some(candidate.status),
                CargoStatus::PendingDistribution,
                actor.user_id,
                now,
                Some(DistributionCascade::batch_note(candidate)),
            ));
        }
        if !batch_history.is_empty() {
            uow.cargo_history.create_batch(batch_history, Some(audit.id)).await?;
        }

        let from = transition.from_status();
        container.status = transition.to_status();
        container.status_changed_by = Some(actor.user_id);
        container.status_changed_at = Some(now);
        container.distribution_start_date = Some(now);
        container.updated_at = now;
        let container_id = container.id;
        uow.containers.update_batch(vec![container], audit.id).await?;

        let history = ContainerStatusHistoryModel::new(
            container_id,
            Some(from),
            ContainerStatus::OpenDistribution,
            actor.user_id,
            now,
            Some(cascade.container_note()),
        );
        uow.container_history.create_batch(vec![history], Some(audit.id)).await?;

        info!(
            %container_id,
            updated = cascade.moved.len(),
            total = cascade.total_batches,
            pieces = cascade.moved_pieces,
            "container distribution started"
        );
        Ok(DistributionStarted {
            updated_cargo_count: cascade.moved_pieces,
            updated_batch_count: cascade.moved.len(),
            total_cargo_count: cascade.total_batches,
        })
    }

    #[tracing::instrument(name = "container.delete", skip_all, fields(%container_id))]
    pub async fn delete_container_in(
        &self,
        uow: &UnitOfWork,
        actor: &Actor,
        container_id: Uuid,
    ) -> ApiResult<()> {
        actor.require_system_admin("delete a container")?;
        let container = Self::lock_container(uow, container_id).await?;

        let batches = uow.containers.count_batches(container_id).await?;
        if batches > 0 {
            warn!(%container_id, batches, "container delete rejected, cargo still references it");
            return Err(ApiError::ReferentialConflict(format!(
                "container {} still holds {batches} cargo batch(es)",
                container.container_code
            )));
        }

        let audit = open_audit(uow, actor, Utc::now()).await?;
        uow.containers.delete_batch(&[container_id], Some(audit.id)).await?;

        info!(container_code = %container.container_code, "container deleted");
        Ok(())
    }

    pub async fn get_container_summary_in(
        &self,
        uow: &UnitOfWork,
        container_id: Uuid,
    ) -> ApiResult<ContainerSummary> {
        let container: ContainerModel = load_one(&*uow.containers, container_id, "container").await?;
        let container_type: ContainerTypeModel =
            load_one(&*uow.container_types, container.container_type_id, "container type").await?;
        let currency_code = revenue_currency(uow, &container_type, &self.config).await?;

        let batches = uow.cargo_batches.find_by_container_id(container_id).await?;
        let tariffs = storage_tariffs(uow, batches.iter().filter_map(|b| b.storage_fee_id)).await?;
        let policy = self.config.accrual_policy();
        let now = Utc::now();

        let lines: Vec<_> = batches
            .iter()
            .map(|batch| {
                let tariff = batch.storage_fee_id.and_then(|id| tariffs.get(&id));
                batch.to_batch_line(policy.accrue(&batch.accrual_input(), tariff, now))
            })
            .collect();
        let statistics = SummaryStatistics::from_lines(&lines, &currency_code);

        Ok(ContainerSummary {
            container: container.to_view(),
            batches: lines,
            statistics,
        })
    }

    pub async fn container_history_in(
        &self,
        uow: &UnitOfWork,
        container_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry<ContainerStatus>>> {
        let page = uow.container_history.find_by_container_id(container_id, page).await?;
        Ok(page.map(|h| h.to_entry()))
    }
}

#[async_trait]
impl ContainerService for PgContainerService {
    async fn create_container(
        &self,
        actor: &Actor,
        request: CreateContainerRequest,
    ) -> ApiResult<CreatedContainer> {
        let uow = self.repos.begin().await?;
        let created = self.create_container_in(&uow, actor, request).await?;
        uow.commit().await?;
        Ok(created)
    }

    async fn update_container_details(
        &self,
        actor: &Actor,
        container_id: Uuid,
        request: UpdateContainerDetailsRequest,
    ) -> ApiResult<()> {
        let uow = self.repos.begin().await?;
        self.update_container_details_in(&uow, actor, container_id, request).await?;
        uow.commit().await?;
        Ok(())
    }

    async fn change_container_status(
        &self,
        actor: &Actor,
        container_id: Uuid,
        status: ContainerStatus,
    ) -> ApiResult<()> {
        let uow = self.repos.begin().await?;
        self.change_container_status_in(&uow, actor, container_id, status).await?;
        uow.commit().await?;
        Ok(())
    }

    async fn start_container_distribution(
        &self,
        actor: &Actor,
        container_id: Uuid,
    ) -> ApiResult<DistributionStarted> {
        let uow = self.repos.begin().await?;
        let started = self.start_container_distribution_in(&uow, actor, container_id).await?;
        uow.commit().await?;
        Ok(started)
    }

    async fn delete_container(&self, actor: &Actor, container_id: Uuid) -> ApiResult<()> {
        let uow = self.repos.begin().await?;
        self.delete_container_in(&uow, actor, container_id).await?;
        uow.commit().await?;
        Ok(())
    }

    async fn get_container_summary(&self, container_id: Uuid) -> ApiResult<ContainerSummary> {
        let uow = self.repos.begin().await?;
        self.get_container_summary_in(&uow, container_id).await
    }

    async fn container_history(
        &self,
        container_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry<ContainerStatus>>> {
        let uow = self.repos.begin().await?;
        self.container_history_in(&uow, container_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{open_container, weight_batch_request};
    use super::CONTAINER_CREATED_NOTE;
    use crate::test_helper::setup_test_context;
    use chrono::{Datelike, Utc};
    use logistics_api::domain::actor::Actor;
    use logistics_api::domain::status::{CargoStatus, ContainerStatus, PaymentMethod};
    use logistics_api::error::ApiError;
    use logistics_db::models::{CargoBatch, ContainerModel};
    use logistics_db::repository::pagination::PageRequest;
    use logistics_db::repository::LoadBatch;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_create_container_generates_daily_code() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let actor = Actor::staff(Uuid::new_v4());
        let (refs, first) = open_container(&ctx, &actor).await?;

        let second = ctx
            .container_service()
            .create_container_in(ctx.uow(), &actor, super::super::test_utils::container_request(&refs))
            .await?;

        let today = Utc::now();
        let stamp = format!("{:02}{:02}", today.month(), today.day());
        assert_eq!(first.container_code, format!("KR-40FT-{stamp}-C1"));
        assert_eq!(second.container_code, format!("KR-40FT-{stamp}-C2"));

        let history = ctx
            .container_service()
            .container_history_in(ctx.uow(), first.container_id, PageRequest::default())
            .await?;
        assert_eq!(history.total, 1);
        assert_eq!(history.items[0].old_status, None);
        assert_eq!(history.items[0].new_status, ContainerStatus::OpenRegistration);
        assert_eq!(history.items[0].note.as_deref(), Some(CONTAINER_CREATED_NOTE));

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_create_container_with_unknown_direction() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let actor = Actor::staff(Uuid::new_v4());
        let refs = crate::repository::container::test_utils::seed_container_references(ctx.uow()).await?;

        let mut request = super::super::test_utils::container_request(&refs);
        request.direction_id = Uuid::new_v4();
        let result = ctx.container_service().create_container_in(ctx.uow(), &actor, request).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_start_distribution_happens_once() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let actor = Actor::staff(Uuid::new_v4());
        let (_, container) = open_container(&ctx, &actor).await?;
        let cargo = ctx.cargo_service();
        let containers = ctx.container_service();

        let paid = cargo
            .create_cargo_batch_in(ctx.uow(), &actor, weight_batch_request(container.container_id, 2))
            .await?;
        let waiting = cargo
            .create_cargo_batch_in(ctx.uow(), &actor, weight_batch_request(container.container_id, 3))
            .await?;
        cargo
            .distribute_cargo_in(ctx.uow(), &actor, paid.batch_id, Some(PaymentMethod::Cash), None)
            .await?;

        let started = containers
            .start_container_distribution_in(ctx.uow(), &actor, container.container_id)
            .await?;
        assert_eq!(started.updated_batch_count, 1);
        assert_eq!(started.updated_cargo_count, 3);
        assert_eq!(started.total_cargo_count, 2);

        let again = containers
            .start_container_distribution_in(ctx.uow(), &actor, container.container_id)
            .await;
        assert!(matches!(again, Err(ApiError::InvalidState(_))));

        let history = containers
            .container_history_in(ctx.uow(), container.container_id, PageRequest::default())
            .await?;
        let starts = history
            .items
            .iter()
            .filter(|h| h.new_status == ContainerStatus::OpenDistribution)
            .count();
        assert_eq!(starts, 1);

        let batches: Vec<CargoBatch> = ctx
            .uow()
            .cargo_batches
            .load_batch(&[paid.batch_id, waiting.batch_id])
            .await?
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(batches[0].batch.status, CargoStatus::Distributed);
        assert_eq!(batches[1].batch.status, CargoStatus::PendingDistribution);
        assert!(batches[1].batch.distribution_available_date.is_some());

        let waiting_history = cargo
            .cargo_history_in(ctx.uow(), waiting.batch_id, PageRequest::default())
            .await?;
        assert_eq!(waiting_history.items[0].old_status, Some(CargoStatus::Registered));
        assert_eq!(waiting_history.items[0].new_status, CargoStatus::PendingDistribution);

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_generic_status_change() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let actor = Actor::staff(Uuid::new_v4());
        let (_, container) = open_container(&ctx, &actor).await?;
        let service = ctx.container_service();

        service
            .change_container_status_in(ctx.uow(), &actor, container.container_id, ContainerStatus::ClosedFull)
            .await?;
        let rejected = service
            .change_container_status_in(ctx.uow(), &actor, container.container_id, ContainerStatus::Completed)
            .await;
        assert!(matches!(rejected, Err(ApiError::InvalidState(_))));

        service
            .change_container_status_in(
                ctx.uow(),
                &actor,
                container.container_id,
                ContainerStatus::OpenDistribution,
            )
            .await?;

        let loaded: Vec<Option<ContainerModel>> =
            ctx.uow().containers.load_batch(&[container.container_id]).await?;
        let loaded = loaded[0].as_ref().unwrap();
        assert_eq!(loaded.status, ContainerStatus::OpenDistribution);
        assert!(loaded.distribution_start_date.is_some());
        assert_eq!(loaded.status_changed_by, Some(actor.user_id));

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_delete_container_blocked_by_cargo() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let admin = Actor::system_admin(Uuid::new_v4());
        let (_, container) = open_container(&ctx, &admin).await?;
        let batch = ctx
            .cargo_service()
            .create_cargo_batch_in(ctx.uow(), &admin, weight_batch_request(container.container_id, 1))
            .await?;
        let service = ctx.container_service();

        let staff = Actor::staff(Uuid::new_v4());
        let forbidden = service.delete_container_in(ctx.uow(), &staff, container.container_id).await;
        assert!(matches!(forbidden, Err(ApiError::Forbidden(_))));

        let blocked = service.delete_container_in(ctx.uow(), &admin, container.container_id).await;
        assert!(matches!(blocked, Err(ApiError::ReferentialConflict(_))));

        ctx.cargo_service()
            .delete_cargo_batch_in(ctx.uow(), &admin, batch.batch_id)
            .await?;
        service.delete_container_in(ctx.uow(), &admin, container.container_id).await?;

        let loaded: Vec<Option<ContainerModel>> =
            ctx.uow().containers.load_batch(&[container.container_id]).await?;
        assert!(loaded[0].is_none());

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_container_summary_counts_each_batch_once() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let actor = Actor::staff(Uuid::new_v4());
        let (_, container) = open_container(&ctx, &actor).await?;
        let cargo = ctx.cargo_service();
        cargo
            .create_cargo_batch_in(ctx.uow(), &actor, weight_batch_request(container.container_id, 4))
            .await?;
        cargo
            .create_cargo_batch_in(ctx.uow(), &actor, weight_batch_request(container.container_id, 1))
            .await?;

        let summary = ctx
            .container_service()
            .get_container_summary_in(ctx.uow(), container.container_id)
            .await?;

        assert_eq!(summary.container.current_count, 5);
        assert_eq!(summary.batches.len(), 2);
        assert_eq!(summary.statistics.batch_count, 2);
        assert_eq!(summary.statistics.piece_count, 5);
        assert_eq!(summary.statistics.total_cargo_price, rust_decimal::Decimal::from(20000));
        assert_eq!(summary.statistics.currency_code, "TST");
        assert_eq!(summary.statistics.sender_totals.len(), 1);

        Ok(())
    }
}
