pub mod config;
pub mod postgres_repositories;
pub mod repository;
pub mod service;
pub mod utils;

pub use config::LogisticsConfig;
pub use postgres_repositories::{LogisticsRepositories, UnitOfWork};
pub use service::{PgCargoService, PgContainerService, PgPaymentService};

#[cfg(test)]
pub mod test_helper;
