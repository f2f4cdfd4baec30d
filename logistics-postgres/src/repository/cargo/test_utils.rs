use chrono::Utc;
use heapless::String as HeaplessString;
use logistics_api::domain::codes::piece_codes;
use logistics_api::domain::status::{CargoStatus, CargoType};
use logistics_db::models::{CargoBatch, CargoBatchModel, CargoPieceModel};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A registered 10 kg weight batch priced at 10000.
pub fn create_test_cargo_batch(container_id: Uuid, batch_number: &str, total_pieces: i32) -> CargoBatch {
    let now = Utc::now();
    let batch_id = Uuid::new_v4();
    let batch = CargoBatchModel {
        id: batch_id,
        batch_number: HeaplessString::try_from(batch_number).unwrap(),
        container_id,
        cargo_name: None,
        sender_name: HeaplessString::try_from("Kim Minjun").unwrap(),
        sender_phone: None,
        sender_address: None,
        receiver_name: HeaplessString::try_from("Bat-Erdene").unwrap(),
        receiver_phone: Some(HeaplessString::try_from("99112233").unwrap()),
        receiver_address: None,
        cargo_type: CargoType::Weight,
        weight_kg: Some(Decimal::from(10)),
        length_cm: None,
        width_cm: None,
        height_cm: None,
        volume_cbm: None,
        unit_price: Decimal::from(10000),
        is_manual_price: false,
        manual_price: None,
        total_pieces,
        storage_fee_id: None,
        payment_location_id: None,
        description: None,
        images: vec!["front.jpg".to_string()],
        status: CargoStatus::Registered,
        distribution_available_date: None,
        storage_days: None,
        storage_fee_amount: None,
        registered_by: Uuid::new_v4(),
        registered_at: now,
        updated_by: None,
        updated_at: now,
        audit_log_id: None,
    };
    let pieces = piece_codes(batch_number, total_pieces)
        .into_iter()
        .zip(1..)
        .map(|(code, index)| CargoPieceModel {
            id: Uuid::new_v4(),
            batch_id,
            piece_index: index,
            cargo_code: HeaplessString::try_from(code.as_str()).unwrap(),
        })
        .collect();

    CargoBatch { batch, pieces }
}
