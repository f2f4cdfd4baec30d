use std::error::Error;

use super::repo_impl::CodeSequenceRepositoryImpl;

impl CodeSequenceRepositoryImpl {
    /// Atomically takes the next value of `scope`, starting at 1.
    ///
    /// The counter row stays locked until the unit of work ends, so concurrent
    /// creations in the same scope queue up instead of drawing the same value.
    pub async fn next_value(&self, scope: &str) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO code_sequence (scope, last_value)
            VALUES ($1, 1)
            ON CONFLICT (scope) DO UPDATE SET last_value = code_sequence.last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(scope)
        .fetch_one(&mut **transaction)
        .await?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_next_value_counts_per_scope() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let sequences = &ctx.uow().code_sequences;
        let scope_a = format!("test:{}", Uuid::new_v4());
        let scope_b = format!("test:{}", Uuid::new_v4());

        assert_eq!(sequences.next_value(&scope_a).await?, 1);
        assert_eq!(sequences.next_value(&scope_a).await?, 2);
        assert_eq!(sequences.next_value(&scope_b).await?, 1);
        assert_eq!(sequences.next_value(&scope_a).await?, 3);

        Ok(())
    }
}
