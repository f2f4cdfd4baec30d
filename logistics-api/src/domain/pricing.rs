//! Base price of a cargo batch.
//!
//! The price is computed once at registration from the container type tariff
//! and stored on the batch. It applies to the batch as a whole, never per piece.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::status::CargoType;
use crate::domain::storage_fee::round_money;
use crate::error::{ApiError, ApiResult};

/// Cubic centimetres in one cubic metre.
const CM3_PER_CBM: i64 = 1_000_000;

/// Scales of the stored measurement columns. A quote is rounded to them so the
/// price returned at registration is the price stored and billed later.
const WEIGHT_DP: u32 = 3;
const DIMENSION_DP: u32 = 2;
const VOLUME_DP: u32 = 6;

fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Tariff carried by a container type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerTariff {
    pub price_per_kg: Decimal,
    pub price_per_cbm: Decimal,
}

/// Measurements and price override submitted with a new batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PricingInput {
    pub cargo_type: Option<CargoType>,
    pub weight_kg: Option<Decimal>,
    pub length_cm: Option<Decimal>,
    pub width_cm: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    pub is_manual_price: bool,
    pub manual_price: Option<Decimal>,
}

/// Priced and normalized measurements ready to be stored on the batch.
///
/// Only the measurements belonging to the batch's cargo type are kept:
/// a weight batch stores no dimensions, a volume batch stores no weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub cargo_type: CargoType,
    pub unit_price: Decimal,
    pub weight_kg: Option<Decimal>,
    pub length_cm: Option<Decimal>,
    pub width_cm: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    pub volume_cbm: Option<Decimal>,
    pub is_manual_price: bool,
    pub manual_price: Option<Decimal>,
}

/// Volume in cubic metres of a box measured in centimetres, at the stored six decimals.
pub fn volume_cbm(length_cm: Decimal, width_cm: Decimal, height_cm: Decimal) -> Decimal {
    round_to(length_cm * width_cm * height_cm / Decimal::from(CM3_PER_CBM), VOLUME_DP)
}

/// The price a stored batch is charged at: the manual price when flagged, else the computed one.
pub fn base_price(is_manual_price: bool, manual_price: Option<Decimal>, unit_price: Decimal) -> Decimal {
    if is_manual_price {
        manual_price.unwrap_or(Decimal::ZERO)
    } else {
        unit_price
    }
}

/// Rounds to the column scale first, so a value that rounds to zero is rejected.
fn positive(value: Option<Decimal>, dp: u32, field: &str) -> ApiResult<Decimal> {
    match value.map(|v| round_to(v, dp)) {
        Some(v) if v > Decimal::ZERO => Ok(v),
        Some(_) => Err(ApiError::ValidationError(format!("{field} must be greater than zero"))),
        None => Err(ApiError::ValidationError(format!("{field} is required"))),
    }
}

/// Prices a batch.
///
/// A manual price always wins; otherwise weight batches pay `weight_kg × price_per_kg`
/// and volume batches pay `volume_cbm × price_per_cbm`.
pub fn quote_price(input: &PricingInput, tariff: &ContainerTariff) -> ApiResult<PriceQuote> {
    let cargo_type = input
        .cargo_type
        .ok_or_else(|| ApiError::ValidationError("cargo_type is required".to_string()))?;

    if input.is_manual_price {
        let manual_price = match input.manual_price {
            Some(price) if price >= Decimal::ZERO => round_money(price),
            Some(_) => {
                return Err(ApiError::ValidationError(
                    "manual_price must not be negative".to_string(),
                ))
            }
            None => {
                return Err(ApiError::ValidationError(
                    "manual_price is required when the price is set manually".to_string(),
                ))
            }
        };

        // Measurements are optional here but kept when complete, the storage
        // tariff may still charge per kg or per cbm.
        let mut quote = PriceQuote {
            cargo_type,
            unit_price: manual_price,
            weight_kg: None,
            length_cm: None,
            width_cm: None,
            height_cm: None,
            volume_cbm: None,
            is_manual_price: true,
            manual_price: Some(manual_price),
        };
        match cargo_type {
            CargoType::Weight => {
                quote.weight_kg = input
                    .weight_kg
                    .map(|w| round_to(w, WEIGHT_DP))
                    .filter(|w| *w > Decimal::ZERO)
            }
            CargoType::Volume => {
                let dimension = |d: Option<Decimal>| d.map(|d| round_to(d, DIMENSION_DP));
                if let (Some(l), Some(w), Some(h)) = (
                    dimension(input.length_cm),
                    dimension(input.width_cm),
                    dimension(input.height_cm),
                ) {
                    quote.length_cm = Some(l);
                    quote.width_cm = Some(w);
                    quote.height_cm = Some(h);
                    quote.volume_cbm = Some(volume_cbm(l, w, h));
                }
            }
        }
        return Ok(quote);
    }

    match cargo_type {
        CargoType::Weight => {
            let weight_kg = positive(input.weight_kg, WEIGHT_DP, "weight_kg")?;
            Ok(PriceQuote {
                cargo_type,
                unit_price: round_money(weight_kg * tariff.price_per_kg),
                weight_kg: Some(weight_kg),
                length_cm: None,
                width_cm: None,
                height_cm: None,
                volume_cbm: None,
                is_manual_price: false,
                manual_price: None,
            })
        }
        CargoType::Volume => {
            let length_cm = positive(input.length_cm, DIMENSION_DP, "length_cm")?;
            let width_cm = positive(input.width_cm, DIMENSION_DP, "width_cm")?;
            let height_cm = positive(input.height_cm, DIMENSION_DP, "height_cm")?;
            let volume = volume_cbm(length_cm, width_cm, height_cm);
            Ok(PriceQuote {
                cargo_type,
                unit_price: round_money(volume * tariff.price_per_cbm),
                weight_kg: None,
                length_cm: Some(length_cm),
                width_cm: Some(width_cm),
                height_cm: Some(height_cm),
                volume_cbm: Some(volume),
                is_manual_price: false,
                manual_price: None,
            })
        }
    }
}
