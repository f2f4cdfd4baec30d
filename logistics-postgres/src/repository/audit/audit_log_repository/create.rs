use logistics_db::models::AuditLogModel;

use super::repo_impl::AuditLogRepositoryImpl;

impl AuditLogRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &AuditLogRepositoryImpl,
        audit_log: &AuditLogModel,
    ) -> Result<AuditLogModel, Box<dyn std::error::Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            INSERT INTO audit_log (id, updated_at, updated_by)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(audit_log.id)
        .bind(audit_log.updated_at)
        .bind(audit_log.updated_by);

        let mut tx = repo.executor.tx.lock().await;
        if let Some(transaction) = tx.as_mut() {
            query.execute(&mut **transaction).await?;
        } else {
            return Err("Transaction has been consumed".into());
        }

        Ok(audit_log.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use logistics_db::models::AuditLogModel;
    use logistics_db::repository::LoadBatch;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_create_audit_log() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let audit_logs = &ctx.uow().audit_logs;

        let audit_log = AuditLogModel::new(Uuid::new_v4(), Utc::now());
        let created = audit_logs.create(&audit_log).await?;
        assert_eq!(created.id, audit_log.id);

        let loaded = audit_logs.load_batch(&[audit_log.id, Uuid::new_v4()]).await?;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].as_ref().map(|a| a.updated_by), Some(audit_log.updated_by));
        assert!(loaded[1].is_none());

        Ok(())
    }
}
