pub mod repo_impl;
pub mod create;
pub mod load_batch;

pub use repo_impl::AuditLogRepositoryImpl;
