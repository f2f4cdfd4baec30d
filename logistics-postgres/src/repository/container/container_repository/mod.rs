pub mod repo_impl;
pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod load_batch;
pub mod update_batch;
pub mod lock_for_update;
pub mod adjust_current_count;
pub mod count_batches;

pub use repo_impl::ContainerRepositoryImpl;
