use crate::utils::TryFromRow;
use logistics_db::models::PaymentRecordModel;
use std::error::Error;

use super::repo_impl::PaymentRecordRepositoryImpl;

impl PaymentRecordRepositoryImpl {
    /// Revenue lines recorded for a batch number, oldest first.
    pub async fn find_revenue_by_batch_number(
        &self,
        batch_number: &str,
    ) -> Result<Vec<PaymentRecordModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM payment_record
                WHERE payment_type = 'revenue' AND batch_number = $1
                ORDER BY payment_date
                "#,
            )
            .bind(batch_number)
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(PaymentRecordModel::try_from_row(&row)?);
        }
        Ok(items)
    }
}
