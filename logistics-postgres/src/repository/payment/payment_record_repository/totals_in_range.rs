use logistics_api::domain::ledger::{DateRange, LedgerSums, LedgerTotals};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use super::repo_impl::PaymentRecordRepositoryImpl;

fn sums_from_row(row: &PgRow) -> Result<LedgerSums, Box<dyn Error + Send + Sync>> {
    Ok(LedgerSums {
        revenue: row.try_get("revenue")?,
        expense: row.try_get("expense")?,
        cargo_price_sum: row.try_get("cargo_price_sum")?,
        storage_fee_sum: row.try_get("storage_fee_sum")?,
        cash_revenue: row.try_get("cash_revenue")?,
        transfer_revenue: row.try_get("transfer_revenue")?,
        revenue_batches: row.try_get("revenue_batches")?,
    })
}

impl PaymentRecordRepositoryImpl {
    /// Sums the ledger lines whose payment date falls in `range`, or the whole
    /// ledger without one, in a single grouped query.
    ///
    /// The `()` grouping set yields the overall row, so distinct batches are
    /// counted once even when they appear under several currencies.
    pub async fn totals_in_range(
        &self,
        range: Option<&DateRange>,
    ) -> Result<LedgerTotals, Box<dyn Error + Send + Sync>> {
        let bounds = range.map(DateRange::bounds);
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT
                    GROUPING(currency_code) = 1 AS is_overall,
                    currency_code,
                    COALESCE(SUM(total_amount) FILTER (WHERE payment_type = 'revenue'), 0) AS revenue,
                    COALESCE(SUM(total_amount) FILTER (WHERE payment_type = 'expense'), 0) AS expense,
                    COALESCE(SUM(cargo_price) FILTER (WHERE payment_type = 'revenue'), 0) AS cargo_price_sum,
                    COALESCE(SUM(storage_fee) FILTER (WHERE payment_type = 'revenue'), 0) AS storage_fee_sum,
                    COALESCE(SUM(total_amount) FILTER (
                        WHERE payment_type = 'revenue' AND payment_method = 'cash'
                    ), 0) AS cash_revenue,
                    COALESCE(SUM(total_amount) FILTER (
                        WHERE payment_type = 'revenue' AND payment_method = 'transfer'
                    ), 0) AS transfer_revenue,
                    COUNT(DISTINCT batch_number) FILTER (WHERE payment_type = 'revenue') AS revenue_batches
                FROM payment_record
                WHERE ($1::timestamptz IS NULL OR payment_date >= $1)
                  AND ($2::timestamptz IS NULL OR payment_date < $2)
                GROUP BY GROUPING SETS ((currency_code), ())
                ORDER BY is_overall, currency_code
                "#,
            )
            .bind(bounds.map(|(start, _)| start))
            .bind(bounds.map(|(_, end)| end))
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut totals = LedgerTotals::default();
        for row in &rows {
            let is_overall: bool = row.try_get("is_overall")?;
            let sums = sums_from_row(row)?;
            if is_overall {
                totals.overall = sums;
            } else {
                let currency_code: String = row.try_get("currency_code")?;
                totals.by_currency.push((currency_code, sums));
            }
        }
        Ok(totals)
    }
}
