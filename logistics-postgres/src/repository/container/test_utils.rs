use crate::postgres_repositories::UnitOfWork;
use crate::repository::reference::test_utils::{
    create_test_container_type, create_test_currency, create_test_direction,
};
use chrono::Utc;
use heapless::String as HeaplessString;
use logistics_api::domain::status::ContainerStatus;
use logistics_db::models::{ContainerModel, ContainerTypeModel, DirectionModel, PaymentCurrencyModel};
use logistics_db::repository::CreateBatch;
use uuid::Uuid;

/// Reference rows every container needs.
pub struct ContainerRefs {
    pub direction: DirectionModel,
    pub container_type: ContainerTypeModel,
    pub currency: PaymentCurrencyModel,
}

/// Inserts a `KR` direction, a `40FT` container type (1000/kg, 50000/cbm) and a
/// `TST` currency for it.
pub async fn seed_container_references(
    uow: &UnitOfWork,
) -> Result<ContainerRefs, Box<dyn std::error::Error + Send + Sync>> {
    let currency = uow
        .payment_currencies
        .create_batch(vec![create_test_currency("TST")], None)
        .await?
        .remove(0);
    let direction = uow
        .directions
        .create_batch(vec![create_test_direction("KR")], None)
        .await?
        .remove(0);
    let container_type = uow
        .container_types
        .create_batch(vec![create_test_container_type("40FT", Some(currency.id))], None)
        .await?
        .remove(0);

    Ok(ContainerRefs {
        direction,
        container_type,
        currency,
    })
}

pub fn create_test_container(refs: &ContainerRefs, code: &str) -> ContainerModel {
    let now = Utc::now();
    ContainerModel {
        id: Uuid::new_v4(),
        container_code: HeaplessString::try_from(code).unwrap(),
        name: None,
        direction_id: refs.direction.id,
        container_type_id: refs.container_type.id,
        road_info_id: None,
        registration_date: Some(now.date_naive()),
        departure_date: None,
        arrival_date: None,
        description: None,
        current_count: 0,
        status: ContainerStatus::OpenRegistration,
        status_changed_by: None,
        status_changed_at: None,
        distribution_start_date: None,
        created_by: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        audit_log_id: None,
    }
}
