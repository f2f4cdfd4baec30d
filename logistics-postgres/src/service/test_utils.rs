use logistics_api::domain::actor::Actor;
use logistics_api::domain::requests::{CreateCargoBatchRequest, CreateContainerRequest, PartyDetails};
use logistics_api::domain::status::CargoType;
use logistics_api::domain::views::CreatedContainer;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::repository::container::test_utils::{seed_container_references, ContainerRefs};
use crate::test_helper::TestContext;

pub fn party(name: &str, phone: Option<&str>) -> PartyDetails {
    PartyDetails {
        name: name.to_string(),
        phone: phone.map(str::to_string),
        address: None,
    }
}

pub fn container_request(refs: &ContainerRefs) -> CreateContainerRequest {
    CreateContainerRequest {
        direction_id: refs.direction.id,
        container_type_id: refs.container_type.id,
        road_info_id: None,
        registration_date: None,
        departure_date: None,
        arrival_date: None,
        name: Some("Spring consolidation".to_string()),
        description: None,
    }
}

/// A 10 kg weight batch, priced at 10000 by the seeded `40FT` tariff.
pub fn weight_batch_request(container_id: Uuid, total_pieces: i32) -> CreateCargoBatchRequest {
    CreateCargoBatchRequest {
        container_id,
        cargo_name: Some("Kitchenware".to_string()),
        sender: party("Kim Minjun", Some("01012345678")),
        receiver: party("Bat-Erdene", Some("99112233")),
        cargo_type: CargoType::Weight,
        weight_kg: Some(Decimal::from(10)),
        length_cm: None,
        width_cm: None,
        height_cm: None,
        total_pieces,
        storage_fee_id: None,
        payment_location_id: None,
        description: None,
        images: Vec::new(),
        is_manual_price: false,
        manual_price: None,
    }
}

/// Seeds the reference rows and creates an open container through the service.
pub async fn open_container(
    ctx: &TestContext,
    actor: &Actor,
) -> Result<(ContainerRefs, CreatedContainer), Box<dyn std::error::Error + Send + Sync>> {
    let refs = seed_container_references(ctx.uow()).await?;
    let created = ctx
        .container_service()
        .create_container_in(ctx.uow(), actor, container_request(&refs))
        .await?;
    Ok((refs, created))
}
