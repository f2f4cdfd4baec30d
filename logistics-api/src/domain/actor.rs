use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SystemAdmin,
    Staff,
}

/// The authenticated user on whose behalf a mutation runs.
///
/// Authentication itself happens upstream; the core only stamps the user id
/// on the rows it writes and enforces the admin-only operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn system_admin(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::SystemAdmin)
    }

    pub fn staff(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Staff)
    }

    pub fn is_system_admin(&self) -> bool {
        self.role == UserRole::SystemAdmin
    }

    pub fn require_system_admin(&self, action: &str) -> ApiResult<()> {
        if self.is_system_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "only a system administrator may {action}"
            )))
        }
    }
}
