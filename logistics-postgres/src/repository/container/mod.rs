pub mod code_sequence_repository;
pub mod container_repository;
pub mod container_status_history_repository;

#[cfg(test)]
pub mod test_utils;

pub use code_sequence_repository::CodeSequenceRepositoryImpl;
pub use container_repository::ContainerRepositoryImpl;
pub use container_status_history_repository::ContainerStatusHistoryRepositoryImpl;
