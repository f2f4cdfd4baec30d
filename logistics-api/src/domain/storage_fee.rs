//! Storage fee accrual.
//!
//! Cargo waiting for pickup accrues a holding fee once the container has been
//! in distribution for longer than the grace period. The fee is evaluated on
//! every read while the batch is open and frozen at distribution time.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::status::{CargoStatus, StorageUnitType};

pub const DEFAULT_GRACE_PERIOD_HOURS: i64 = 168;
/// Ten years. Longer grace periods are clamped to it.
pub const MAX_GRACE_PERIOD_HOURS: i64 = 10 * 365 * 24;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Storage-fee tariff: a daily price charged per piece, per kg or per cbm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFeeTariff {
    pub price_per_day: Decimal,
    pub unit_type: StorageUnitType,
}

/// The batch attributes the accrual depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccrualInput {
    pub status: CargoStatus,
    pub distribution_available_date: Option<DateTime<Utc>>,
    pub frozen_storage_days: Option<i32>,
    pub frozen_storage_fee_amount: Option<Decimal>,
    pub total_pieces: i32,
    pub weight_kg: Option<Decimal>,
    pub volume_cbm: Option<Decimal>,
    pub base_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFee {
    pub storage_days: i32,
    pub storage_fee_amount: Decimal,
    pub total_with_storage: Decimal,
}

impl StorageFee {
    fn without_fee(storage_days: i32, base_price: Decimal) -> Self {
        Self {
            storage_days,
            storage_fee_amount: Decimal::ZERO,
            total_with_storage: round_money(base_price),
        }
    }
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualPolicy {
    pub grace_period: Duration,
}

impl Default for AccrualPolicy {
    fn default() -> Self {
        Self::with_grace_hours(DEFAULT_GRACE_PERIOD_HOURS)
    }
}

impl AccrualPolicy {
    /// Negative hours mean no grace period at all.
    pub fn with_grace_hours(hours: i64) -> Self {
        Self {
            grace_period: Duration::hours(hours.clamp(0, MAX_GRACE_PERIOD_HOURS)),
        }
    }

    /// Chargeable days between `available_since` and `now`.
    ///
    /// Nothing is charged inside the grace period. Past it, every started
    /// 24 hour slice counts as a full day.
    pub fn storage_days(&self, available_since: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
        let elapsed = now - available_since;
        if elapsed <= self.grace_period {
            return 0;
        }
        let excess_millis = (elapsed - self.grace_period).num_milliseconds();
        let days = (excess_millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
        i32::try_from(days).unwrap_or(i32::MAX)
    }

    /// Evaluates the storage fee of a batch at `now`.
    ///
    /// A distributed batch returns its frozen snapshot regardless of `now`.
    /// A missing tariff still reports the accrued days but charges nothing.
    pub fn accrue(
        &self,
        input: &StorageAccrualInput,
        tariff: Option<&StorageFeeTariff>,
        now: DateTime<Utc>,
    ) -> StorageFee {
        if input.status == CargoStatus::Distributed {
            let fee = input.frozen_storage_fee_amount.unwrap_or(Decimal::ZERO);
            return StorageFee {
                storage_days: input.frozen_storage_days.unwrap_or(0),
                storage_fee_amount: fee,
                total_with_storage: round_money(input.base_price + fee),
            };
        }

        let Some(available_since) = input.distribution_available_date else {
            return StorageFee::without_fee(0, input.base_price);
        };

        let storage_days = self.storage_days(available_since, now);
        if storage_days == 0 {
            return StorageFee::without_fee(0, input.base_price);
        }

        let Some(tariff) = tariff else {
            return StorageFee::without_fee(storage_days, input.base_price);
        };

        let quantity = match tariff.unit_type {
            StorageUnitType::PerPiece => Decimal::from(input.total_pieces),
            StorageUnitType::PerKg => input.weight_kg.unwrap_or(Decimal::ZERO),
            StorageUnitType::PerCbm => input.volume_cbm.unwrap_or(Decimal::ZERO),
        };
        let fee = Decimal::from(storage_days) * tariff.price_per_day * quantity;

        StorageFee {
            storage_days,
            storage_fee_amount: round_money(fee),
            total_with_storage: round_money(input.base_price + fee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    fn pending_since(available: DateTime<Utc>) -> StorageAccrualInput {
        StorageAccrualInput {
            status: CargoStatus::PendingDistribution,
            distribution_available_date: Some(available),
            frozen_storage_days: None,
            frozen_storage_fee_amount: None,
            total_pieces: 3,
            weight_kg: Some(Decimal::new(125, 1)),
            volume_cbm: Some(Decimal::new(5, 1)),
            base_price: Decimal::from(10000),
        }
    }

    fn per_piece(price: i64) -> StorageFeeTariff {
        StorageFeeTariff {
            price_per_day: Decimal::from(price),
            unit_type: StorageUnitType::PerPiece,
        }
    }

    #[test]
    fn test_grace_period_boundary() {
        let policy = AccrualPolicy::default();

        let exactly = now() - Duration::hours(168);
        assert_eq!(policy.storage_days(exactly, now()), 0);

        let one_second_over = now() - Duration::hours(168) - Duration::seconds(1);
        assert_eq!(policy.storage_days(one_second_over, now()), 1);
    }

    #[test]
    fn test_partial_days_round_up() {
        let policy = AccrualPolicy::default();

        let available = now() - Duration::hours(168 + 25);
        assert_eq!(policy.storage_days(available, now()), 2);

        let available = now() - Duration::hours(168 + 24);
        assert_eq!(policy.storage_days(available, now()), 1);
    }

    #[test]
    fn test_no_accrual_before_distribution() {
        let policy = AccrualPolicy::default();
        let mut input = pending_since(now());
        input.status = CargoStatus::Registered;
        input.distribution_available_date = None;

        let fee = policy.accrue(&input, Some(&per_piece(500)), now());

        assert_eq!(fee.storage_days, 0);
        assert_eq!(fee.storage_fee_amount, Decimal::ZERO);
        assert_eq!(fee.total_with_storage, Decimal::from(10000));
    }

    #[test]
    fn test_per_unit_fees() {
        let policy = AccrualPolicy::default();
        let input = pending_since(now() - Duration::hours(168 + 48));

        let fee = policy.accrue(&input, Some(&per_piece(500)), now());
        assert_eq!(fee.storage_days, 2);
        assert_eq!(fee.storage_fee_amount, Decimal::from(3000));
        assert_eq!(fee.total_with_storage, Decimal::from(13000));

        let per_kg = StorageFeeTariff {
            price_per_day: Decimal::from(100),
            unit_type: StorageUnitType::PerKg,
        };
        let fee = policy.accrue(&input, Some(&per_kg), now());
        assert_eq!(fee.storage_fee_amount, Decimal::from(2500));

        let per_cbm = StorageFeeTariff {
            price_per_day: Decimal::new(3333, 1),
            unit_type: StorageUnitType::PerCbm,
        };
        let fee = policy.accrue(&input, Some(&per_cbm), now());
        assert_eq!(fee.storage_fee_amount, Decimal::new(33330, 2));
    }

    #[test]
    fn test_missing_quantity_charges_nothing() {
        let policy = AccrualPolicy::default();
        let mut input = pending_since(now() - Duration::hours(200));
        input.weight_kg = None;
        let per_kg = StorageFeeTariff {
            price_per_day: Decimal::from(100),
            unit_type: StorageUnitType::PerKg,
        };

        let fee = policy.accrue(&input, Some(&per_kg), now());

        assert_eq!(fee.storage_days, 2);
        assert_eq!(fee.storage_fee_amount, Decimal::ZERO);
    }

    #[test]
    fn test_days_reported_without_tariff() {
        let policy = AccrualPolicy::default();
        let input = pending_since(now() - Duration::hours(168 + 72));

        let fee = policy.accrue(&input, None, now());

        assert_eq!(fee.storage_days, 3);
        assert_eq!(fee.storage_fee_amount, Decimal::ZERO);
        assert_eq!(fee.total_with_storage, Decimal::from(10000));
    }

    #[test]
    fn test_fee_is_rounded_to_cents() {
        let policy = AccrualPolicy::default();
        let mut input = pending_since(now() - Duration::hours(169));
        input.volume_cbm = Some(Decimal::new(1, 3));
        let per_cbm = StorageFeeTariff {
            price_per_day: Decimal::new(1005, 0),
            unit_type: StorageUnitType::PerCbm,
        };

        let fee = policy.accrue(&input, Some(&per_cbm), now());

        // 1 day × 1005 × 0.001 = 1.005
        assert_eq!(fee.storage_fee_amount, Decimal::new(101, 2));
    }

    #[test]
    fn test_distributed_batch_keeps_frozen_snapshot() {
        let policy = AccrualPolicy::default();
        let available = now() - Duration::hours(168 + 30);
        let tariff = per_piece(500);

        let before = policy.accrue(&pending_since(available), Some(&tariff), now());
        assert_eq!(before.storage_days, 2);

        let mut distributed = pending_since(available);
        distributed.status = CargoStatus::Distributed;
        distributed.frozen_storage_days = Some(before.storage_days);
        distributed.frozen_storage_fee_amount = Some(before.storage_fee_amount);

        let at_distribution = policy.accrue(&distributed, Some(&tariff), now());
        let much_later = policy.accrue(&distributed, Some(&tariff), now() + Duration::days(90));

        assert_eq!(at_distribution, before);
        assert_eq!(much_later, at_distribution);
    }

    #[test]
    fn test_custom_grace_period() {
        let policy = AccrualPolicy::with_grace_hours(24);
        let available = now() - Duration::hours(49);

        assert_eq!(policy.storage_days(available, now()), 2);
    }

    #[test]
    fn test_grace_period_is_clamped() {
        let policy = AccrualPolicy::with_grace_hours(9_999_999_999_999_999);

        assert_eq!(policy.grace_period, Duration::hours(MAX_GRACE_PERIOD_HOURS));
        assert_eq!(policy.storage_days(now() - Duration::days(365), now()), 0);
        assert_eq!(AccrualPolicy::with_grace_hours(-5).grace_period, Duration::zero());
    }
}
