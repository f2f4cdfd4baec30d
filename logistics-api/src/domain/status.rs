use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a shipping container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "container_status", rename_all = "snake_case"))]
pub enum ContainerStatus {
    OpenRegistration,
    OpenDistribution,
    ClosedFull,
    ClosedShipped,
    Distributing,
    Completed,
}

impl ContainerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::OpenRegistration => "open_registration",
            ContainerStatus::OpenDistribution => "open_distribution",
            ContainerStatus::ClosedFull => "closed_full",
            ContainerStatus::ClosedShipped => "closed_shipped",
            ContainerStatus::Distributing => "distributing",
            ContainerStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open_registration" => Ok(ContainerStatus::OpenRegistration),
            "open_distribution" => Ok(ContainerStatus::OpenDistribution),
            "closed_full" => Ok(ContainerStatus::ClosedFull),
            "closed_shipped" => Ok(ContainerStatus::ClosedShipped),
            "distributing" => Ok(ContainerStatus::Distributing),
            "completed" => Ok(ContainerStatus::Completed),
            _ => Err(()),
        }
    }
}

/// Lifecycle status of a cargo batch. Every piece of the batch shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "cargo_status", rename_all = "snake_case"))]
pub enum CargoStatus {
    Registered,
    PendingDistribution,
    Distributed,
    OnHold,
    CustomsProcessing,
    Shipped,
    Arrived,
    Delivered,
}

impl CargoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CargoStatus::Registered => "registered",
            CargoStatus::PendingDistribution => "pending_distribution",
            CargoStatus::Distributed => "distributed",
            CargoStatus::OnHold => "on_hold",
            CargoStatus::CustomsProcessing => "customs_processing",
            CargoStatus::Shipped => "shipped",
            CargoStatus::Arrived => "arrived",
            CargoStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for CargoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CargoStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(CargoStatus::Registered),
            "pending_distribution" => Ok(CargoStatus::PendingDistribution),
            "distributed" => Ok(CargoStatus::Distributed),
            "on_hold" => Ok(CargoStatus::OnHold),
            "customs_processing" => Ok(CargoStatus::CustomsProcessing),
            "shipped" => Ok(CargoStatus::Shipped),
            "arrived" => Ok(CargoStatus::Arrived),
            "delivered" => Ok(CargoStatus::Delivered),
            _ => Err(()),
        }
    }
}

/// How a batch is measured for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "cargo_type", rename_all = "snake_case"))]
pub enum CargoType {
    Weight,
    Volume,
}

/// Quantity a storage-fee tariff is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "storage_unit_type", rename_all = "snake_case"))]
pub enum StorageUnitType {
    PerPiece,
    PerKg,
    PerCbm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "payment_method", rename_all = "snake_case"))]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Transfer => write!(f, "transfer"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "payment_type", rename_all = "snake_case"))]
pub enum PaymentType {
    Revenue,
    Expense,
}
