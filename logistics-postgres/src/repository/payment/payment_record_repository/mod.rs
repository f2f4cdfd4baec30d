pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod delete_revenue_by_batch_number;
pub mod find_by_batch_number;
pub mod totals_in_range;
pub mod find_by_filter;

#[cfg(test)]
pub mod test_utils;

pub use delete_revenue_by_batch_number::DeletedRevenue;
pub use repo_impl::PaymentRecordRepositoryImpl;
