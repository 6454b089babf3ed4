//! Test suite models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request body for creating a test suite.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTestSuiteRequest {
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTestSuiteRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        Ok(())
    }
}

/// Test suite returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestSuiteResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::test_suite::Model> for TestSuiteResponse {
    fn from(m: crate::entity::test_suite::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            name: m.name,
            description: m.description,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}
