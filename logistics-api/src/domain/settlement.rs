use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::{CargoStatus, CargoType};
use crate::domain::storage_fee::StorageFee;

/// One batch of a container, with its storage fee evaluated at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLine {
    pub batch_id: Uuid,
    pub batch_number: String,
    pub status: CargoStatus,
    pub cargo_type: CargoType,
    pub sender_name: String,
    pub receiver_name: String,
    pub receiver_phone: Option<String>,
    pub total_pieces: i32,
    pub base_price: Decimal,
    pub storage: StorageFee,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderTotal {
    pub sender_name: String,
    pub batch_count: usize,
    /// Base prices plus storage fees of the sender's batches.
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub batch_count: usize,
    pub piece_count: i64,
    pub total_cargo_price: Decimal,
    pub total_storage_fee: Decimal,
    pub grand_total: Decimal,
    pub currency_code: String,
    pub sender_totals: Vec<SenderTotal>,
}

impl SummaryStatistics {
    /// Each batch contributes its base price once, whatever its piece count.
    pub fn from_lines(lines: &[BatchLine], currency_code: &str) -> Self {
        let mut total_cargo_price = Decimal::ZERO;
        let mut total_storage_fee = Decimal::ZERO;
        let mut piece_count = 0i64;
        let mut sender_totals: Vec<SenderTotal> = Vec::new();

        for line in lines {
            total_cargo_price += line.base_price;
            total_storage_fee += line.storage.storage_fee_amount;
            piece_count += i64::from(line.total_pieces);

            let amount = line.base_price + line.storage.storage_fee_amount;
            match sender_totals
                .iter_mut()
                .find(|s| s.sender_name == line.sender_name)
            {
                Some(sender) => {
                    sender.batch_count += 1;
                    sender.total_amount += amount;
                }
                None => sender_totals.push(SenderTotal {
                    sender_name: line.sender_name.clone(),
                    batch_count: 1,
                    total_amount: amount,
                }),
            }
        }

        Self {
            batch_count: lines.len(),
            piece_count,
            total_cargo_price,
            total_storage_fee,
            grand_total: total_cargo_price + total_storage_fee,
            currency_code: currency_code.to_string(),
            sender_totals,
        }
    }
}
