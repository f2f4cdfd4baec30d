use crate::utils::TryFromRow;
use logistics_api::domain::requests::PaymentRecordFilter;
use logistics_db::models::PaymentRecordModel;
use logistics_db::repository::pagination::{Page, PageRequest};
use std::error::Error;

use super::repo_impl::PaymentRecordRepositoryImpl;

impl PaymentRecordRepositoryImpl {
    /// Ledger lines matching every set field of `filter`, newest first.
    pub async fn find_by_filter(
        &self,
        filter: &PaymentRecordFilter,
        page: PageRequest,
    ) -> Result<Page<PaymentRecordModel>, Box<dyn Error + Send + Sync>> {
        let bounds = filter.date_range.as_ref().map(|r| r.bounds());
        let start = bounds.map(|(start, _)| start);
        let end = bounds.map(|(_, end)| end);

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM payment_record
            WHERE ($1::timestamptz IS NULL OR payment_date >= $1)
              AND ($2::timestamptz IS NULL OR payment_date < $2)
              AND ($3::payment_type IS NULL OR payment_type = $3)
              AND ($4::payment_method IS NULL OR payment_method = $4)
              AND ($5::uuid IS NULL OR container_id = $5)
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(filter.payment_type)
        .bind(filter.payment_method)
        .bind(filter.container_id)
        .fetch_one(&mut **transaction)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM payment_record
            WHERE ($1::timestamptz IS NULL OR payment_date >= $1)
              AND ($2::timestamptz IS NULL OR payment_date < $2)
              AND ($3::payment_type IS NULL OR payment_type = $3)
              AND ($4::payment_method IS NULL OR payment_method = $4)
              AND ($5::uuid IS NULL OR container_id = $5)
            ORDER BY payment_date DESC, id
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(filter.payment_type)
        .bind(filter.payment_method)
        .bind(filter.container_id)
        .bind(page.limit_i64())
        .bind(page.offset_i64())
        .fetch_all(&mut **transaction)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(PaymentRecordModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::create_test_expense;
    use crate::test_helper::setup_test_context;
    use logistics_api::domain::requests::PaymentRecordFilter;
    use logistics_api::domain::status::{PaymentMethod, PaymentType};
    use logistics_db::repository::pagination::PageRequest;
    use logistics_db::repository::CreateBatch;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_filter_by_container_and_method() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let records = &ctx.uow().payment_records;
        let container_id = Uuid::new_v4();

        let mut transfer = create_test_expense(Some(container_id), 300);
        transfer.payment_method = PaymentMethod::Transfer;
        records
            .create_batch(
                vec![
                    create_test_expense(Some(container_id), 100),
                    transfer,
                    create_test_expense(None, 200),
                ],
                None,
            )
            .await?;

        let filter = PaymentRecordFilter {
            container_id: Some(container_id),
            payment_type: Some(PaymentType::Expense),
            ..Default::default()
        };
        let page = records.find_by_filter(&filter, PageRequest::default()).await?;
        assert_eq!(page.total, 2);

        let filter = PaymentRecordFilter {
            container_id: Some(container_id),
            payment_method: Some(PaymentMethod::Transfer),
            ..Default::default()
        };
        let page = records.find_by_filter(&filter, PageRequest::default()).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].payment_method, PaymentMethod::Transfer);

        Ok(())
    }
}
