pub mod audit_log;
pub mod cargo_batch;
pub mod container;
pub mod identifiable;
pub mod payment_record;
pub mod reference;
pub mod status_history;

pub use audit_log::*;
pub use cargo_batch::*;
pub use container::*;
pub use identifiable::*;
pub use payment_record::*;
pub use reference::*;
pub use status_history::*;
