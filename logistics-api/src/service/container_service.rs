use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::actor::Actor;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::requests::{CreateContainerRequest, UpdateContainerDetailsRequest};
use crate::domain::status::ContainerStatus;
use crate::domain::views::{ContainerSummary, CreatedContainer, DistributionStarted, HistoryEntry};
use crate::error::ApiResult;

/// Container lifecycle operations.
///
/// Every mutating call runs in its own transaction and either commits all of
/// its writes or none of them.
#[async_trait]
pub trait ContainerService: Send + Sync {
    /// Creates a container in `open_registration` with a freshly generated code.
    ///
    /// # Errors
    /// * `NotFound` - the direction, container type or road info does not exist
    async fn create_container(
        &self,
        actor: &Actor,
        request: CreateContainerRequest,
    ) -> ApiResult<CreatedContainer>;

    /// Updates the descriptive fields. Status is left alone.
    async fn update_container_details(
        &self,
        actor: &Actor,
        container_id: Uuid,
        request: UpdateContainerDetailsRequest,
    ) -> ApiResult<()>;

    /// Generic status change. A request for `open_distribution` starts distribution.
    async fn change_container_status(
        &self,
        actor: &Actor,
        container_id: Uuid,
        status: ContainerStatus,
    ) -> ApiResult<()>;

    /// Moves the container to `open_distribution` and every batch not yet
    /// distributed to `pending_distribution`, starting their storage-fee clock.
    ///
    /// # Errors
    /// * `InvalidState` - distribution has already started
    async fn start_container_distribution(
        &self,
        actor: &Actor,
        container_id: Uuid,
    ) -> ApiResult<DistributionStarted>;

    /// Admin only. Rejected with `ReferentialConflict` while cargo references the container.
    async fn delete_container(&self, actor: &Actor, container_id: Uuid) -> ApiResult<()>;

    async fn get_container_summary(&self, container_id: Uuid) -> ApiResult<ContainerSummary>;

    /// Newest first.
    async fn container_history(
        &self,
        container_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry<ContainerStatus>>>;
}
