pub mod repo_impl;
pub mod create_batch;
pub mod exist_by_ids;

pub use repo_impl::PaymentLocationRepositoryImpl;
