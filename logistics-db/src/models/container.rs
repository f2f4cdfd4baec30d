use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use logistics_api::domain::status::ContainerStatus;
use logistics_api::domain::views::ContainerView;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - Physical shipping unit moving along a direction.
/// - `current_count` is the running number of cargo pieces registered into it.
/// - `status` is only ever changed together with a container history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerModel {
    pub id: Uuid,
    pub container_code: HeaplessString<200>,
    pub name: Option<HeaplessString<400>>,
    pub direction_id: Uuid,
    pub container_type_id: Uuid,
    pub road_info_id: Option<Uuid>,
    pub registration_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub current_count: i32,
    pub status: ContainerStatus,
    pub status_changed_by: Option<Uuid>,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub distribution_start_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl ContainerModel {
    pub fn to_view(&self) -> ContainerView {
        ContainerView {
            id: self.id,
            container_code: self.container_code.to_string(),
            name: self.name.as_ref().map(|n| n.to_string()),
            direction_id: self.direction_id,
            container_type_id: self.container_type_id,
            road_info_id: self.road_info_id,
            registration_date: self.registration_date,
            departure_date: self.departure_date,
            arrival_date: self.arrival_date,
            description: self.description.clone(),
            current_count: self.current_count,
            status: self.status,
            status_changed_by: self.status_changed_by,
            status_changed_at: self.status_changed_at,
            distribution_start_date: self.distribution_start_date,
        }
    }
}

impl Identifiable for ContainerModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
