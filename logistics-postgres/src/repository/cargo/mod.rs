pub mod cargo_batch_repository;
pub mod cargo_status_history_repository;

#[cfg(test)]
pub mod test_utils;

pub use cargo_batch_repository::CargoBatchRepositoryImpl;
pub use cargo_status_history_repository::CargoStatusHistoryRepositoryImpl;
