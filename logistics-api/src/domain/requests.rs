use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::ledger::DateRange;
use crate::domain::pricing::PricingInput;
use crate::domain::status::{CargoType, PaymentMethod, PaymentType};
use crate::error::{ApiError, ApiResult};

pub const MAX_PIECES_PER_BATCH: i32 = 1000;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Trims a free-text field, mapping blank input to `None`.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateContainerRequest {
    pub direction_id: Uuid,
    pub container_type_id: Uuid,
    pub road_info_id: Option<Uuid>,
    pub registration_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateContainerDetailsRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub road_info_id: Option<Uuid>,
    pub departure_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl UpdateContainerDetailsRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            description: trimmed(self.description),
            ..self
        }
    }
}

/// Sender or receiver of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PartyDetails {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateCargoBatchRequest {
    pub container_id: Uuid,
    #[validate(length(max = 100))]
    pub cargo_name: Option<String>,
    #[validate(nested)]
    pub sender: PartyDetails,
    #[validate(nested)]
    pub receiver: PartyDetails,
    pub cargo_type: CargoType,
    pub weight_kg: Option<Decimal>,
    pub length_cm: Option<Decimal>,
    pub width_cm: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    #[validate(range(min = 1, max = 1000))]
    pub total_pieces: i32,
    pub storage_fee_id: Option<Uuid>,
    pub payment_location_id: Option<Uuid>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_manual_price: bool,
    pub manual_price: Option<Decimal>,
}

impl CreateCargoBatchRequest {
    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            cargo_type: Some(self.cargo_type),
            weight_kg: self.weight_kg,
            length_cm: self.length_cm,
            width_cm: self.width_cm,
            height_cm: self.height_cm,
            is_manual_price: self.is_manual_price,
            manual_price: self.manual_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RecordExpenseRequest {
    pub container_id: Option<Uuid>,
    pub amount: Decimal,
    #[validate(length(min = 1, max = 10))]
    pub currency_code: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    #[validate(length(max = 1000))]
    pub description: String,
}

impl RecordExpenseRequest {
    /// Field checks plus the rules the derive cannot express.
    pub fn check(&self) -> ApiResult<()> {
        self.validate()?;
        if self.amount <= Decimal::ZERO {
            return Err(ApiError::ValidationError(
                "amount must be greater than zero".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "description is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecordFilter {
    pub date_range: Option<DateRange>,
    pub payment_type: Option<PaymentType>,
    pub payment_method: Option<PaymentMethod>,
    pub container_id: Option<Uuid>,
}
