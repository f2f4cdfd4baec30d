pub mod repo_impl;
pub mod create_batch;
pub mod find_by_container_id;

pub use repo_impl::ContainerStatusHistoryRepositoryImpl;
