use heapless::String as HeaplessString;
use logistics_api::domain::status::StorageUnitType;
use logistics_db::models::{
    ContainerTypeModel, DirectionModel, PaymentCurrencyModel, PaymentLocationModel, RoadInfoModel,
    StorageFeeModel,
};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_direction(code: &str) -> DirectionModel {
    DirectionModel {
        id: Uuid::new_v4(),
        direction_code: HeaplessString::try_from(code).unwrap(),
        direction_name: HeaplessString::try_from("Incheon to Ulaanbaatar").unwrap(),
        from_location: Some(HeaplessString::try_from("Incheon").unwrap()),
        to_location: Some(HeaplessString::try_from("Ulaanbaatar").unwrap()),
    }
}

/// 1000 per kg and 50000 per cbm.
pub fn create_test_container_type(code: &str, currency_id: Option<Uuid>) -> ContainerTypeModel {
    ContainerTypeModel {
        id: Uuid::new_v4(),
        type_code: HeaplessString::try_from(code).unwrap(),
        type_name: HeaplessString::try_from("Forty foot").unwrap(),
        price_per_kg: Decimal::from(1000),
        price_per_cbm: Decimal::from(50000),
        currency_id,
    }
}

pub fn create_test_currency(code: &str) -> PaymentCurrencyModel {
    PaymentCurrencyModel {
        id: Uuid::new_v4(),
        currency_code: HeaplessString::try_from(code).unwrap(),
        currency_name: HeaplessString::try_from("Test currency").unwrap(),
        symbol: None,
    }
}

/// 1000 per day and unit.
pub fn create_test_storage_fee(unit_type: StorageUnitType, currency_id: Option<Uuid>) -> StorageFeeModel {
    StorageFeeModel {
        id: Uuid::new_v4(),
        fee_name: HeaplessString::try_from("Warehouse daily").unwrap(),
        price_per_day: Decimal::from(1000),
        unit_type,
        currency_id,
    }
}

pub fn create_test_road_info(name: &str) -> RoadInfoModel {
    RoadInfoModel {
        id: Uuid::new_v4(),
        road_name: HeaplessString::try_from(name).unwrap(),
        description: None,
    }
}

pub fn create_test_payment_location(name: &str) -> PaymentLocationModel {
    PaymentLocationModel {
        id: Uuid::new_v4(),
        location_name: HeaplessString::try_from(name).unwrap(),
        address: None,
    }
}
