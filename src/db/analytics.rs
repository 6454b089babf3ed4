//! Aggregate queries backing the dashboard snapshot.
//!
//! Callers go through the read cache; these queries only run on a miss.

use sea_orm::*;

use crate::entity::{project, test_case, user};
use crate::error::AppResult;
use crate::models::{DashboardAnalytics, DayCount, EntityCounts, PriorityCount, StatusCount};

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    status: String,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct PriorityCountRow {
    priority: String,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct DayCountRow {
    date: chrono::NaiveDate,
    count: i64,
}

/// Compute the full dashboard snapshot: entity counts, execution-status
/// histogram, priority histogram, and the trailing 7-day execution series.
pub async fn dashboard_snapshot(db: &DatabaseConnection) -> AppResult<DashboardAnalytics> {
    let projects = project::Entity::find().count(db).await? as i64;
    let test_cases = test_case::Entity::find()
        .filter(test_case::Column::IsDeleted.eq(false))
        .count(db)
        .await? as i64;
    let users = user::Entity::find().count(db).await? as i64;

    let execution_stats = StatusCountRow::find_by_statement(Statement::from_string(
        DatabaseBackend::Postgres,
        r#"
        SELECT status, COUNT(*) AS count
        FROM test_executions
        GROUP BY status
        "#
        .to_owned(),
    ))
    .all(db)
    .await?;

    let priority_stats = PriorityCountRow::find_by_statement(Statement::from_string(
        DatabaseBackend::Postgres,
        r#"
        SELECT priority, COUNT(*) AS count
        FROM test_cases
        WHERE is_deleted = FALSE
        GROUP BY priority
        "#
        .to_owned(),
    ))
    .all(db)
    .await?;

    let executions_over_time = DayCountRow::find_by_statement(Statement::from_string(
        DatabaseBackend::Postgres,
        r#"
        SELECT DATE(execution_date) AS date, COUNT(*) AS count
        FROM test_executions
        WHERE execution_date > NOW() - INTERVAL '7 days'
        GROUP BY DATE(execution_date)
        ORDER BY date
        "#
        .to_owned(),
    ))
    .all(db)
    .await?;

    Ok(DashboardAnalytics {
        counts: EntityCounts {
            projects,
            test_cases,
            users,
        },
        execution_stats: execution_stats
            .into_iter()
            .map(|r| StatusCount {
                status: r.status,
                count: r.count,
            })
            .collect(),
        priority_stats: priority_stats
            .into_iter()
            .map(|r| PriorityCount {
                priority: r.priority,
                count: r.count,
            })
            .collect(),
        executions_over_time: executions_over_time
            .into_iter()
            .map(|r| DayCount {
                date: r.date,
                count: r.count,
            })
            .collect(),
    })
}
