//! Reference data the lifecycle engines read: routes, tariffs, currencies and
//! locations. Only creation and lookups live here; maintaining them is done
//! elsewhere.

pub mod container_type_repository;
pub mod direction_repository;
pub mod payment_currency_repository;
pub mod payment_location_repository;
pub mod road_info_repository;
pub mod storage_fee_repository;

#[cfg(test)]
pub mod test_utils;

pub use container_type_repository::ContainerTypeRepositoryImpl;
pub use direction_repository::DirectionRepositoryImpl;
pub use payment_currency_repository::PaymentCurrencyRepositoryImpl;
pub use payment_location_repository::PaymentLocationRepositoryImpl;
pub use road_info_repository::RoadInfoRepositoryImpl;
pub use storage_fee_repository::StorageFeeRepositoryImpl;
