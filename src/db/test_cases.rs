//! Database operations for test cases and their ordered steps.
//!
//! Case + steps writes are transactional: a failure anywhere rolls back
//! the case row and every step together.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{
    test_case::{self, Entity as TestCase},
    test_step::{self, Entity as TestStep},
};
use crate::error::AppResult;
use crate::models::{CaseStatus, StepInput, TestCasePayload};

/// Insert a test case and its steps in one transaction. New cases start
/// with status 'open'.
pub async fn insert_with_steps(
    db: &DatabaseConnection,
    payload: &TestCasePayload,
    created_by: Uuid,
) -> AppResult<(test_case::Model, Vec<test_step::Model>)> {
    let txn = db.begin().await?;
    let now = Utc::now();
    let case_id = Uuid::new_v4();

    let model = test_case::ActiveModel {
        id: Set(case_id),
        project_id: Set(payload.project_id),
        suite_id: Set(payload.suite_id),
        title: Set(payload.title.clone()),
        description: Set(payload.description.clone()),
        priority: Set(payload.priority.as_str().to_string()),
        case_type: Set(payload.case_type.as_str().to_string()),
        pre_conditions: Set(payload.pre_conditions.clone()),
        post_conditions: Set(payload.post_conditions.clone()),
        assigned_to: Set(payload.assigned_to),
        status: Set(CaseStatus::Open.as_str().to_string()),
        is_deleted: Set(false),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = model.insert(&txn).await?;

    let steps = match payload.steps {
        Some(ref steps) => insert_steps(&txn, case_id, steps).await?,
        None => Vec::new(),
    };

    txn.commit().await?;
    Ok((created, steps))
}

/// Whole-resource replacement of a test case. When `steps` is supplied,
/// the existing step set is discarded and replaced; when absent, stored
/// steps are left untouched. Returns None when the case does not exist or
/// is soft-deleted.
pub async fn update_with_steps(
    db: &DatabaseConnection,
    id: Uuid,
    payload: &TestCasePayload,
) -> AppResult<Option<(test_case::Model, Vec<test_step::Model>)>> {
    let Some(existing) = find_active_by_id(db, id).await? else {
        return Ok(None);
    };

    let txn = db.begin().await?;

    let mut active: test_case::ActiveModel = existing.into();
    active.project_id = Set(payload.project_id);
    active.suite_id = Set(payload.suite_id);
    active.title = Set(payload.title.clone());
    active.description = Set(payload.description.clone());
    active.priority = Set(payload.priority.as_str().to_string());
    active.case_type = Set(payload.case_type.as_str().to_string());
    active.pre_conditions = Set(payload.pre_conditions.clone());
    active.post_conditions = Set(payload.post_conditions.clone());
    active.assigned_to = Set(payload.assigned_to);
    active.updated_at = Set(Utc::now());
    let updated = active.update(&txn).await?;

    let steps = match payload.steps {
        Some(ref steps) => {
            TestStep::delete_many()
                .filter(test_step::Column::TestCaseId.eq(id))
                .exec(&txn)
                .await?;
            insert_steps(&txn, id, steps).await?
        }
        None => {
            TestStep::find()
                .filter(test_step::Column::TestCaseId.eq(id))
                .order_by_asc(test_step::Column::StepNumber)
                .all(&txn)
                .await?
        }
    };

    txn.commit().await?;
    Ok(Some((updated, steps)))
}

/// Insert steps in the given order, keeping the caller-supplied
/// step_number as-is.
async fn insert_steps<C: ConnectionTrait>(
    db: &C,
    test_case_id: Uuid,
    steps: &[StepInput],
) -> AppResult<Vec<test_step::Model>> {
    let mut inserted = Vec::with_capacity(steps.len());

    for step in steps {
        let model = test_step::ActiveModel {
            id: Set(Uuid::new_v4()),
            test_case_id: Set(test_case_id),
            step_number: Set(step.step_number),
            action: Set(step.action.clone()),
            expected_result: Set(step.expected_result.clone()),
        };
        inserted.push(model.insert(db).await?);
    }

    Ok(inserted)
}

/// Find a non-deleted test case by ID.
pub async fn find_active_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> AppResult<Option<test_case::Model>> {
    let result = TestCase::find_by_id(id)
        .filter(test_case::Column::IsDeleted.eq(false))
        .one(db)
        .await?;

    Ok(result)
}

/// List non-deleted test cases with optional project/suite filters,
/// newest first.
pub async fn list(
    db: &DatabaseConnection,
    project_id: Option<Uuid>,
    suite_id: Option<Uuid>,
) -> AppResult<Vec<test_case::Model>> {
    let mut select = TestCase::find().filter(test_case::Column::IsDeleted.eq(false));

    if let Some(project_id) = project_id {
        select = select.filter(test_case::Column::ProjectId.eq(project_id));
    }
    if let Some(suite_id) = suite_id {
        select = select.filter(test_case::Column::SuiteId.eq(suite_id));
    }

    let result = select
        .order_by_desc(test_case::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(result)
}

/// List closed (passed) cases for a project, most recently updated first.
pub async fn list_passed(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> AppResult<Vec<test_case::Model>> {
    let result = TestCase::find()
        .filter(test_case::Column::ProjectId.eq(project_id))
        .filter(test_case::Column::Status.eq(CaseStatus::Closed.as_str()))
        .filter(test_case::Column::IsDeleted.eq(false))
        .order_by_desc(test_case::Column::UpdatedAt)
        .all(db)
        .await?;

    Ok(result)
}

/// Steps for a case ordered by step_number.
pub async fn steps_for_case(
    db: &DatabaseConnection,
    test_case_id: Uuid,
) -> AppResult<Vec<test_step::Model>> {
    let result = TestStep::find()
        .filter(test_step::Column::TestCaseId.eq(test_case_id))
        .order_by_asc(test_step::Column::StepNumber)
        .all(db)
        .await?;

    Ok(result)
}

/// Set the lifecycle status of a case. Generic over the connection so it
/// participates in the execution-recording transaction.
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    status: CaseStatus,
) -> AppResult<Option<test_case::Model>> {
    let Some(existing) = TestCase::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: test_case::ActiveModel = existing.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(Utc::now());

    Ok(Some(active.update(db).await?))
}
