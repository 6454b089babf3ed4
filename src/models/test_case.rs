//! Test case models: priorities, types, lifecycle status, and the
//! create/update payloads that carry ordered steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Test case priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Test case type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CaseType {
    Functional,
    Integration,
    Regression,
    Smoke,
    #[serde(rename = "UI")]
    Ui,
    #[serde(rename = "API")]
    Api,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::Integration => "Integration",
            Self::Regression => "Regression",
            Self::Smoke => "Smoke",
            Self::Ui => "UI",
            Self::Api => "API",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Functional" => Some(Self::Functional),
            "Integration" => Some(Self::Integration),
            "Regression" => Some(Self::Regression),
            "Smoke" => Some(Self::Smoke),
            "UI" => Some(Self::Ui),
            "API" => Some(Self::Api),
            _ => None,
        }
    }
}

/// Test case lifecycle status.
///
/// `open` on creation; a Pass execution closes it; only an admin reopen
/// sets it back to `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    #[default]
    Open,
    Closed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// One ordered step in a create/update payload. `step_number` is
/// caller-supplied; gaps and duplicates are stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StepInput {
    pub step_number: i32,
    pub action: String,
    pub expected_result: String,
}

/// Request body for creating a test case (and, in the same transaction,
/// its steps). The update endpoint reuses this shape: update is a
/// whole-resource replacement, not a partial patch.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TestCasePayload {
    pub project_id: Uuid,
    #[serde(default)]
    pub suite_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub case_type: CaseType,
    #[serde(default)]
    pub pre_conditions: Option<String>,
    #[serde(default)]
    pub post_conditions: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
    /// When present on update, the full step set is replaced; when absent,
    /// existing steps are left untouched.
    #[serde(default)]
    pub steps: Option<Vec<StepInput>>,
}

impl TestCasePayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        if let Some(ref steps) = self.steps {
            for step in steps {
                if step.action.trim().is_empty() {
                    return Err("step action is required".to_string());
                }
            }
        }
        Ok(())
    }
}

/// Test case returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestCaseResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub suite_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    #[serde(rename = "type")]
    pub case_type: String,
    pub pre_conditions: Option<String>,
    pub post_conditions: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub status: CaseStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::test_case::Model> for TestCaseResponse {
    fn from(m: crate::entity::test_case::Model) -> Self {
        Self {
            status: CaseStatus::parse(&m.status).unwrap_or_default(),
            id: m.id,
            project_id: m.project_id,
            suite_id: m.suite_id,
            title: m.title,
            description: m.description,
            priority: m.priority,
            case_type: m.case_type,
            pre_conditions: m.pre_conditions,
            post_conditions: m.post_conditions,
            assigned_to: m.assigned_to,
            created_by: m.created_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// A stored test step.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestStepResponse {
    pub id: Uuid,
    pub test_case_id: Uuid,
    pub step_number: i32,
    pub action: String,
    pub expected_result: String,
}

impl From<crate::entity::test_step::Model> for TestStepResponse {
    fn from(m: crate::entity::test_step::Model) -> Self {
        Self {
            id: m.id,
            test_case_id: m.test_case_id,
            step_number: m.step_number,
            action: m.action,
            expected_result: m.expected_result,
        }
    }
}

/// Response for create/update/detail: the case plus its steps.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseWithSteps {
    pub test_case: TestCaseResponse,
    pub steps: Vec<TestStepResponse>,
}

/// Query parameters for listing test cases.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListTestCasesQuery {
    #[serde(rename = "projectId")]
    pub project_id: Option<Uuid>,
    #[serde(rename = "suiteId")]
    pub suite_id: Option<Uuid>,
}

/// Query parameters for the passed-cases listing.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PassedTestCasesQuery {
    #[serde(rename = "projectId")]
    pub project_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_and_type_wire_names() {
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"Critical\"");
        assert_eq!(serde_json::to_string(&CaseType::Ui).unwrap(), "\"UI\"");
        assert_eq!(serde_json::to_string(&CaseType::Api).unwrap(), "\"API\"");
        assert_eq!(serde_json::from_str::<CaseType>("\"API\"").unwrap(), CaseType::Api);
        assert!(serde_json::from_str::<Priority>("\"Urgent\"").is_err());
    }

    #[test]
    fn test_case_status_defaults_open() {
        assert_eq!(CaseStatus::default(), CaseStatus::Open);
        assert_eq!(CaseStatus::parse("closed"), Some(CaseStatus::Closed));
        assert_eq!(CaseStatus::parse("done"), None);
    }

    #[test]
    fn test_payload_validation() {
        let payload: TestCasePayload = serde_json::from_value(serde_json::json!({
            "project_id": "7f2c1c1a-9a8e-4f7e-9d55-0a2d4b3c2e10",
            "title": "Login succeeds with valid credentials",
            "priority": "High",
            "type": "Functional",
            "steps": [
                {"step_number": 1, "action": "Open login page", "expected_result": "Form shown"}
            ]
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.case_type, CaseType::Functional);

        let empty_title: TestCasePayload = serde_json::from_value(serde_json::json!({
            "project_id": "7f2c1c1a-9a8e-4f7e-9d55-0a2d4b3c2e10",
            "title": "   ",
            "priority": "Low",
            "type": "Smoke"
        }))
        .unwrap();
        assert!(empty_title.validate().is_err());
    }
}
