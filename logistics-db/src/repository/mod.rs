pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod load_batch;
pub mod update_batch;

/// Paging types shared with the service layer.
pub mod pagination {
    pub use logistics_api::domain::pagination::{Page, PageRequest};
}

pub use create_batch::*;
pub use delete_batch::*;
pub use exist_by_ids::*;
pub use load_batch::*;
pub use update_batch::*;
