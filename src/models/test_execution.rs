//! Test execution models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Outcome status of a single execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ExecutionStatus {
    Pass,
    Fail,
    Blocked,
    Skipped,
    Pending,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Blocked => "Blocked",
            Self::Skipped => "Skipped",
            Self::Pending => "Pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pass" => Some(Self::Pass),
            "Fail" => Some(Self::Fail),
            "Blocked" => Some(Self::Blocked),
            "Skipped" => Some(Self::Skipped),
            "Pending" => Some(Self::Pending),
            _ => None,
        }
    }

    /// A Pass execution closes its test case.
    pub fn closes_case(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Request body for recording an execution.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordExecutionRequest {
    pub test_case_id: Uuid,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub actual_result: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Response for a recorded execution: the appended row plus whether this
/// call closed the test case.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExecutionRecordedResponse {
    pub id: Uuid,
    pub test_case_id: Uuid,
    pub executed_by: Uuid,
    pub status: ExecutionStatus,
    pub actual_result: Option<String>,
    pub comments: Option<String>,
    pub execution_date: DateTime<Utc>,
    #[serde(rename = "testCaseClosed")]
    pub test_case_closed: bool,
}

/// One row of execution history, joined with the executor's username.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExecutionHistoryItem {
    pub id: Uuid,
    pub test_case_id: Uuid,
    pub executed_by: Uuid,
    pub executed_by_name: String,
    pub status: String,
    pub actual_result: Option<String>,
    pub comments: Option<String>,
    pub execution_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pass_closes_case() {
        assert!(ExecutionStatus::Pass.closes_case());
        for status in [
            ExecutionStatus::Fail,
            ExecutionStatus::Blocked,
            ExecutionStatus::Skipped,
            ExecutionStatus::Pending,
        ] {
            assert!(!status.closes_case());
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ExecutionStatus::Pass,
            ExecutionStatus::Fail,
            ExecutionStatus::Blocked,
            ExecutionStatus::Skipped,
            ExecutionStatus::Pending,
        ] {
            assert_eq!(ExecutionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ExecutionStatus::parse("passed"), None);
    }
}
