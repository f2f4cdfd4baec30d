use rust_decimal::Decimal;
use std::error::Error;

use super::repo_impl::PaymentRecordRepositoryImpl;

/// What a reversal removed from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletedRevenue {
    pub records: u64,
    pub total_amount: Decimal,
}

impl PaymentRecordRepositoryImpl {
    /// Deletes every revenue line of a batch number. Normally there is one.
    pub async fn delete_revenue_by_batch_number(
        &self,
        batch_number: &str,
    ) -> Result<DeletedRevenue, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let amounts: Vec<Decimal> = sqlx::query_scalar(
            r#"
            DELETE FROM payment_record
            WHERE payment_type = 'revenue' AND batch_number = $1
            RETURNING total_amount
            "#,
        )
        .bind(batch_number)
        .fetch_all(&mut **transaction)
        .await?;

        Ok(DeletedRevenue {
            records: amounts.len() as u64,
            total_amount: amounts.into_iter().sum(),
        })
    }
}
