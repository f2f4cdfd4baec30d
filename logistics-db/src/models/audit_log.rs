use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Identifiable;

/// One audit log per database transaction.
///
/// Every history and ledger row written by the same service call references
/// the same audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuditLogModel {
    pub id: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl AuditLogModel {
    pub fn new(updated_by: Uuid, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            updated_at,
            updated_by,
        }
    }
}

impl Identifiable for AuditLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
