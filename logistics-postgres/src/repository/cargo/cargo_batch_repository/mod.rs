pub mod repo_impl;
pub mod create_batch;
pub mod delete_batch;
pub mod load_batch;
pub mod update_batch;
pub mod lock_for_update;
pub mod find_by_container_id;
pub mod find_pending;
pub mod mark_pending_distribution;

pub use repo_impl::CargoBatchRepositoryImpl;
