//! Payment ledger amounts and statistics.
//!
//! Amounts stay in the currency they were recorded in. Totals across
//! currencies are plain sums; splitting by currency is what `by_currency` is for.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::storage_fee::round_money;
use crate::error::{ApiError, ApiResult};

/// Whole days, `start` and `end` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ApiResult<Self> {
        if start > end {
            return Err(ApiError::ValidationError(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Half-open timestamp bounds `[start 00:00, end + 1 day 00:00)`.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let from = self.start.and_time(NaiveTime::MIN).and_utc();
        let until = (self.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
        (from, until)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let (from, until) = self.bounds();
        at >= from && at < until
    }
}

/// Amounts of a revenue line: `total_amount = cargo_price + storage_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueAmounts {
    pub cargo_price: Decimal,
    pub storage_fee: Decimal,
    pub total_amount: Decimal,
}

impl RevenueAmounts {
    pub fn new(cargo_price: Decimal, storage_fee: Decimal) -> Self {
        Self {
            cargo_price,
            storage_fee,
            total_amount: round_money(cargo_price + storage_fee),
        }
    }
}

/// Sums over a set of ledger lines. Revenue columns only count revenue lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSums {
    pub revenue: Decimal,
    pub expense: Decimal,
    pub cargo_price_sum: Decimal,
    pub storage_fee_sum: Decimal,
    pub cash_revenue: Decimal,
    pub transfer_revenue: Decimal,
    /// Distinct batch numbers with revenue.
    pub revenue_batches: i64,
}

/// Ledger sums for the whole range and per currency, ordered by currency code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub overall: LedgerSums,
    pub by_currency: Vec<(String, LedgerSums)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyBreakdown {
    pub currency_code: String,
    pub revenue: Decimal,
    pub expense: Decimal,
    pub cargo_price_sum: Decimal,
    pub storage_fee_sum: Decimal,
}

/// Revenue split by payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBreakdown {
    pub cash: Decimal,
    pub transfer: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStats {
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub net_income: Decimal,
    /// Distinct batches with revenue.
    pub revenue_count: usize,
    pub by_currency: Vec<CurrencyBreakdown>,
    pub by_method: MethodBreakdown,
}

impl PaymentStats {
    /// Totals are plain sums over every currency; no conversion happens.
    pub fn from_totals(totals: LedgerTotals) -> Self {
        let overall = totals.overall;
        Self {
            total_revenue: overall.revenue,
            total_expense: overall.expense,
            net_income: overall.revenue - overall.expense,
            revenue_count: usize::try_from(overall.revenue_batches).unwrap_or(0),
            by_currency: totals
                .by_currency
                .into_iter()
                .map(|(currency_code, sums)| CurrencyBreakdown {
                    currency_code,
                    revenue: sums.revenue,
                    expense: sums.expense,
                    cargo_price_sum: sums.cargo_price_sum,
                    storage_fee_sum: sums.storage_fee_sum,
                })
                .collect(),
            by_method: MethodBreakdown {
                cash: overall.cash_revenue,
                transfer: overall.transfer_revenue,
            },
        }
    }
}
