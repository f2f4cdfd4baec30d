pub mod cargo_service;
pub mod container_service;
pub mod payment_service;

pub use cargo_service::CargoService;
pub use container_service::ContainerService;
pub use payment_service::PaymentService;
