pub mod actor;
pub mod cargo_lifecycle;
pub mod codes;
pub mod container_lifecycle;
pub mod ledger;
pub mod pagination;
pub mod pricing;
pub mod requests;
pub mod settlement;
pub mod status;
pub mod storage_fee;
pub mod views;

pub use actor::*;
pub use cargo_lifecycle::*;
pub use container_lifecycle::*;
pub use ledger::*;
pub use pagination::*;
pub use pricing::*;
pub use requests::*;
pub use settlement::*;
pub use status::*;
pub use storage_fee::*;
pub use views::*;
