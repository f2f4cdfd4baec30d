pub mod audit;
pub mod cargo;
pub mod container;
pub mod payment;
pub mod reference;
