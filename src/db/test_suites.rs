//! Database operations for test suites.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::test_suite::{self, Entity as TestSuite};
use crate::error::AppResult;
use crate::models::CreateTestSuiteRequest;

/// Insert a new test suite.
pub async fn insert(
    db: &DatabaseConnection,
    req: &CreateTestSuiteRequest,
    created_by: Uuid,
) -> AppResult<test_suite::Model> {
    let model = test_suite::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(req.project_id),
        name: Set(req.name.clone()),
        description: Set(req.description.clone()),
        created_by: Set(created_by),
        created_at: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}

/// List suites for a project, newest first.
pub async fn list_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> AppResult<Vec<test_suite::Model>> {
    let result = TestSuite::find()
        .filter(test_suite::Column::ProjectId.eq(project_id))
        .order_by_desc(test_suite::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(result)
}
