use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::actor::Actor;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::requests::CreateCargoBatchRequest;
use crate::domain::status::{CargoStatus, PaymentMethod};
use crate::domain::storage_fee::StorageFee;
use crate::domain::views::{CreatedCargoBatch, HistoryEntry, PendingBatch};
use crate::error::ApiResult;

/// Cargo batch lifecycle operations.
#[async_trait]
pub trait CargoService: Send + Sync {
    /// Registers a batch of `total_pieces` pieces into an open container.
    ///
    /// # Errors
    /// * `NotFound` - the container or one of the referenced tariffs does not exist
    /// * `InvalidState` - the container is not in `open_registration`
    /// * `ValidationError` - missing measurements or manual price
    async fn create_cargo_batch(
        &self,
        actor: &Actor,
        request: CreateCargoBatchRequest,
    ) -> ApiResult<CreatedCargoBatch>;

    /// Generic status change. Targeting `distributed` takes the distribution
    /// path and needs a payment method.
    async fn change_cargo_status(
        &self,
        actor: &Actor,
        batch_id: Uuid,
        status: CargoStatus,
        payment_method: Option<PaymentMethod>,
        receiver_phone: Option<String>,
    ) -> ApiResult<()>;

    /// Hands the batch over against payment: freezes its storage fee and
    /// records one revenue line.
    async fn distribute_cargo(
        &self,
        actor: &Actor,
        batch_id: Uuid,
        payment_method: Option<PaymentMethod>,
        receiver_phone: Option<String>,
    ) -> ApiResult<()>;

    /// Admin only. Deletes the batch's revenue lines and puts it back to
    /// `pending_distribution`. Cannot be undone except by distributing again.
    async fn reverse_distribution(&self, actor: &Actor, batch_id: Uuid, reason: &str) -> ApiResult<()>;

    /// Admin only. Removes the batch and its pieces. Ledger lines are kept.
    async fn delete_cargo_batch(&self, actor: &Actor, batch_id: Uuid) -> ApiResult<()>;

    /// Storage fee as of now. Pure read.
    async fn get_storage_fee(&self, batch_id: Uuid) -> ApiResult<StorageFee>;

    async fn list_pending_distribution(
        &self,
        container_id: Option<Uuid>,
        page: PageRequest,
    ) -> ApiResult<Page<PendingBatch>>;

    /// Newest first.
    async fn cargo_history(
        &self,
        batch_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<HistoryEntry<CargoStatus>>>;
}
