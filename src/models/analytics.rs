//! Dashboard analytics snapshot models.
//!
//! The snapshot is cached as serialized JSON; a cache hit is returned
//! byte-identical without touching the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top-level entity counts.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub projects: i64,
    pub test_cases: i64,
    pub users: i64,
}

/// Execution count per outcome status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Test case count per priority.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriorityCount {
    pub priority: String,
    pub count: i64,
}

/// Execution count per day.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// The full dashboard snapshot.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub counts: EntityCounts,
    pub execution_stats: Vec<StatusCount>,
    pub priority_stats: Vec<PriorityCount>,
    pub executions_over_time: Vec<DayCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = DashboardAnalytics {
            counts: EntityCounts {
                projects: 2,
                test_cases: 5,
                users: 3,
            },
            execution_stats: vec![StatusCount {
                status: "Pass".to_string(),
                count: 4,
            }],
            priority_stats: vec![PriorityCount {
                priority: "High".to_string(),
                count: 2,
            }],
            executions_over_time: vec![],
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["counts"]["testCases"], 5);
        assert_eq!(value["executionStats"][0]["status"], "Pass");
        assert_eq!(value["priorityStats"][0]["priority"], "High");
        assert!(value["executionsOverTime"].as_array().unwrap().is_empty());
    }
}
