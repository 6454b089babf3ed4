//! Execution permission models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{UserResponse, is_plausible_email};

/// Request body for granting execution permission by email.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GrantPermissionRequest {
    pub email: String,
}

impl GrantPermissionRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !is_plausible_email(&self.email) {
            return Err("email must be a valid address".to_string());
        }
        Ok(())
    }
}

/// Response after a successful grant, echoing the grantee for audit UIs.
#[derive(Debug, Serialize, ToSchema)]
pub struct GrantPermissionResponse {
    pub message: String,
    pub user: UserResponse,
}

/// One permitted user with the audit trail of who granted access.
#[derive(Debug, Serialize, ToSchema)]
pub struct PermittedUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub granted_at: DateTime<Utc>,
    pub granted_by_username: Option<String>,
}

/// Self-check response. Admins always have permission.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheckResponse {
    pub has_permission: bool,
    pub reason: &'static str,
}
