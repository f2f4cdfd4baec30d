use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use logistics_api::domain::status::{CargoStatus, ContainerStatus};
use logistics_api::domain::views::HistoryEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - Append-only. `old_status` is `None` on the creation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatusHistoryModel {
    pub id: Uuid,
    pub container_id: Uuid,
    pub old_status: Option<ContainerStatus>,
    pub new_status: ContainerStatus,
    pub changed_by: Uuid,
    pub changed_at: DateTime<Utc>,
    pub note: Option<String>,
    pub audit_log_id: Option<Uuid>,
}

/// # Documentation
/// - Append-only. Keyed by batch number as well, so it survives batch deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoStatusHistoryModel {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub batch_number: HeaplessString<200>,
    pub old_status: Option<CargoStatus>,
    pub new_status: CargoStatus,
    pub changed_by: Uuid,
    pub changed_at: DateTime<Utc>,
    pub note: Option<String>,
    pub audit_log_id: Option<Uuid>,
}

impl ContainerStatusHistoryModel {
    pub fn new(
        container_id: Uuid,
        old_status: Option<ContainerStatus>,
        new_status: ContainerStatus,
        changed_by: Uuid,
        changed_at: DateTime<Utc>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            container_id,
            old_status,
            new_status,
            changed_by,
            changed_at,
            note,
            audit_log_id: None,
        }
    }

    pub fn to_entry(&self) -> HistoryEntry<ContainerStatus> {
        HistoryEntry {
            id: self.id,
            old_status: self.old_status,
            new_status: self.new_status,
            changed_by: self.changed_by,
            changed_at: self.changed_at,
            note: self.note.clone(),
        }
    }
}

impl CargoStatusHistoryModel {
    pub fn new(
        batch_id: Uuid,
        batch_number: HeaplessString<200>,
        old_status: Option<CargoStatus>,
        new_status: CargoStatus,
        changed_by: Uuid,
        changed_at: DateTime<Utc>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            batch_id,
            batch_number,
            old_status,
            new_status,
            changed_by,
            changed_at,
            note,
            audit_log_id: None,
        }
    }

    pub fn to_entry(&self) -> HistoryEntry<CargoStatus> {
        HistoryEntry {
            id: self.id,
            old_status: self.old_status,
            new_status: self.new_status,
            changed_by: self.changed_by,
            changed_at: self.changed_at,
            note: self.note.clone(),
        }
    }
}

impl Identifiable for ContainerStatusHistoryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for CargoStatusHistoryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
