use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::actor::Actor;
use crate::domain::ledger::{DateRange, PaymentStats};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::requests::{PaymentRecordFilter, RecordExpenseRequest};
use crate::domain::views::PaymentRecordView;
use crate::error::ApiResult;

/// Ledger writes and reads. Revenue lines are written by the cargo service.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Records an expense and returns its id.
    async fn record_expense(&self, actor: &Actor, request: RecordExpenseRequest) -> ApiResult<Uuid>;

    /// Aggregates the whole ledger when `range` is `None`.
    async fn get_payment_stats(&self, range: Option<DateRange>) -> ApiResult<PaymentStats>;

    /// Newest first.
    async fn list_payment_records(
        &self,
        filter: PaymentRecordFilter,
        page: PageRequest,
    ) -> ApiResult<Page<PaymentRecordView>>;
}
