//! Database operations for test executions.
//!
//! The executions table is an append-only log: rows are inserted and read,
//! never updated or deleted through the API.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{
    test_execution::{self, Entity as TestExecution},
    user,
};
use crate::error::AppResult;
use crate::models::{ExecutionHistoryItem, ExecutionStatus};

/// Append an execution row. Generic over the connection so the insert and
/// the status flip share one transaction.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    test_case_id: Uuid,
    executed_by: Uuid,
    status: ExecutionStatus,
    actual_result: Option<String>,
    comments: Option<String>,
) -> AppResult<test_execution::Model> {
    let model = test_execution::ActiveModel {
        id: Set(Uuid::new_v4()),
        test_case_id: Set(test_case_id),
        executed_by: Set(executed_by),
        status: Set(status.as_str().to_string()),
        actual_result: Set(actual_result),
        comments: Set(comments),
        execution_date: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}

/// Execution history for a case joined with the executor username, newest
/// first.
pub async fn history_for_case(
    db: &DatabaseConnection,
    test_case_id: Uuid,
) -> AppResult<Vec<ExecutionHistoryItem>> {
    let rows = TestExecution::find()
        .filter(test_execution::Column::TestCaseId.eq(test_case_id))
        .find_also_related(user::Entity)
        .order_by_desc(test_execution::Column::ExecutionDate)
        .all(db)
        .await?;

    let history = rows
        .into_iter()
        .map(|(execution, executor)| ExecutionHistoryItem {
            id: execution.id,
            test_case_id: execution.test_case_id,
            executed_by: execution.executed_by,
            executed_by_name: executor.map(|u| u.username).unwrap_or_default(),
            status: execution.status,
            actual_result: execution.actual_result,
            comments: execution.comments,
            execution_date: execution.execution_date,
        })
        .collect();

    Ok(history)
}
