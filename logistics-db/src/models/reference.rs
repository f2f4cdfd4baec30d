use heapless::String as HeaplessString;
use logistics_api::domain::pricing::ContainerTariff;
use logistics_api::domain::status::StorageUnitType;
use logistics_api::domain::storage_fee::StorageFeeTariff;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - Trade route; `direction_code` is the first segment of every container and batch code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionModel {
    pub id: Uuid,
    pub direction_code: HeaplessString<80>,
    pub direction_name: HeaplessString<400>,
    pub from_location: Option<HeaplessString<400>>,
    pub to_location: Option<HeaplessString<400>>,
}

/// # Documentation
/// - Tariff template of a container; `type_code` is the second segment of generated codes.
/// - `currency_id` is the currency revenue of the container is recorded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerTypeModel {
    pub id: Uuid,
    pub type_code: HeaplessString<80>,
    pub type_name: HeaplessString<400>,
    pub price_per_kg: Decimal,
    pub price_per_cbm: Decimal,
    pub currency_id: Option<Uuid>,
}

impl ContainerTypeModel {
    pub fn tariff(&self) -> ContainerTariff {
        ContainerTariff {
            price_per_kg: self.price_per_kg,
            price_per_cbm: self.price_per_cbm,
        }
    }
}

/// # Documentation
/// - Daily storage tariff. Its currency is informational; no conversion is ever applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFeeModel {
    pub id: Uuid,
    pub fee_name: HeaplessString<400>,
    pub price_per_day: Decimal,
    pub unit_type: StorageUnitType,
    pub currency_id: Option<Uuid>,
}

impl StorageFeeModel {
    pub fn tariff(&self) -> StorageFeeTariff {
        StorageFeeTariff {
            price_per_day: self.price_per_day,
            unit_type: self.unit_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCurrencyModel {
    pub id: Uuid,
    pub currency_code: HeaplessString<40>,
    pub currency_name: HeaplessString<200>,
    pub symbol: Option<HeaplessString<40>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadInfoModel {
    pub id: Uuid,
    pub road_name: HeaplessString<400>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLocationModel {
    pub id: Uuid,
    pub location_name: HeaplessString<400>,
    pub address: Option<HeaplessString<1020>>,
}

impl Identifiable for DirectionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for ContainerTypeModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for StorageFeeModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for PaymentCurrencyModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for RoadInfoModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for PaymentLocationModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
