//! Test case endpoints: creation and whole-resource update (with step
//! replacement), listings, and detail reads.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cache::{self, Cache};
use crate::db::{DbPool, test_cases, users};
use crate::error::{AppError, AppResult};
use crate::models::{
    ListTestCasesQuery, PassedTestCasesQuery, Role, TestCasePayload, TestCaseResponse,
    TestCaseWithSteps, TestStepResponse,
};
use crate::services::Notifier;

/// Look up the assignee and dispatch the assignment notification.
/// Fire-and-forget: a failed lookup is logged and swallowed.
async fn notify_assignment(
    pool: &DbPool,
    notifier: &Notifier,
    assignee_id: Uuid,
    test_case_title: &str,
    assigner_name: &str,
    test_case_id: Uuid,
    project_id: Uuid,
) {
    match users::find_by_id(pool.connection(), assignee_id).await {
        Ok(Some(assignee)) => {
            notifier.spawn_assignment_email(
                &assignee.email,
                test_case_title,
                assigner_name,
                test_case_id,
                project_id,
            );
        }
        Ok(None) => {
            tracing::warn!("Assignment notification skipped: user {} not found", assignee_id);
        }
        Err(e) => {
            tracing::warn!("Assignment notification skipped: {}", e);
        }
    }
}

/// Create a test case together with its ordered steps (one transaction).
#[utoipa::path(
    post,
    path = "/api/test-cases",
    tag = "Test Cases",
    request_body = TestCasePayload,
    responses(
        (status = 201, description = "Test case created", body = TestCaseWithSteps),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 403, description = "Role denied", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn create_test_case(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    cache: web::Data<Cache>,
    notifier: web::Data<Notifier>,
    body: web::Json<TestCasePayload>,
) -> AppResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::TestLead, Role::Tester])?;

    let payload = body.into_inner();
    payload.validate().map_err(AppError::Validation)?;

    let (case, steps) = test_cases::insert_with_steps(pool.connection(), &payload, auth.id).await?;

    cache.invalidate(&[cache::ANALYTICS_DASHBOARD]).await;

    if let Some(assignee_id) = case.assigned_to {
        notify_assignment(
            pool.get_ref(),
            notifier.get_ref(),
            assignee_id,
            &case.title,
            &auth.username,
            case.id,
            case.project_id,
        )
        .await;
    }

    info!("Test case created: '{}' by {}", case.title, auth.username);

    Ok(HttpResponse::Created().json(TestCaseWithSteps {
        test_case: TestCaseResponse::from(case),
        steps: steps.into_iter().map(TestStepResponse::from).collect(),
    }))
}

/// Replace a test case. Supplying `steps` discards and re-inserts the full
/// step set; omitting it leaves stored steps untouched.
#[utoipa::path(
    put,
    path = "/api/test-cases/{id}",
    tag = "Test Cases",
    params(("id" = Uuid, Path, description = "Test case UUID")),
    request_body = TestCasePayload,
    responses(
        (status = 200, description = "Test case updated", body = TestCaseWithSteps),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 403, description = "Role denied", body = crate::error::ErrorResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn update_test_case(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    cache: web::Data<Cache>,
    notifier: web::Data<Notifier>,
    path: web::Path<Uuid>,
    body: web::Json<TestCasePayload>,
) -> AppResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::TestLead, Role::Tester])?;

    let id = path.into_inner();
    let payload = body.into_inner();
    payload.validate().map_err(AppError::Validation)?;

    // Previous assignee decides whether the update triggers a notification
    let existing = test_cases::find_active_by_id(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test case".to_string()))?;
    let previous_assignee = existing.assigned_to;

    let (case, steps) = test_cases::update_with_steps(pool.connection(), id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Test case".to_string()))?;

    cache.invalidate(&[cache::ANALYTICS_DASHBOARD]).await;

    if let Some(assignee_id) = case.assigned_to
        && previous_assignee != Some(assignee_id)
    {
        notify_assignment(
            pool.get_ref(),
            notifier.get_ref(),
            assignee_id,
            &case.title,
            &auth.username,
            case.id,
            case.project_id,
        )
        .await;
    }

    Ok(HttpResponse::Ok().json(TestCaseWithSteps {
        test_case: TestCaseResponse::from(case),
        steps: steps.into_iter().map(TestStepResponse::from).collect(),
    }))
}

/// List non-deleted test cases with optional project/suite filters.
#[utoipa::path(
    get,
    path = "/api/test-cases",
    tag = "Test Cases",
    params(
        ("projectId" = Option<Uuid>, Query, description = "Filter by project"),
        ("suiteId" = Option<Uuid>, Query, description = "Filter by suite")
    ),
    responses(
        (status = 200, description = "Test cases", body = [TestCaseResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_test_cases(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListTestCasesQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let cases = test_cases::list(pool.connection(), query.project_id, query.suite_id).await?;
    let response: Vec<TestCaseResponse> = cases.into_iter().map(TestCaseResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// List closed (passed) test cases for a project.
#[utoipa::path(
    get,
    path = "/api/test-cases/passed",
    tag = "Test Cases",
    params(("projectId" = Uuid, Query, description = "Project UUID")),
    responses(
        (status = 200, description = "Closed test cases", body = [TestCaseResponse]),
        (status = 400, description = "Missing projectId", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_passed_test_cases(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    query: web::Query<PassedTestCasesQuery>,
) -> AppResult<HttpResponse> {
    let project_id = query
        .into_inner()
        .project_id
        .ok_or_else(|| AppError::Validation("Project ID is required".to_string()))?;

    let cases = test_cases::list_passed(pool.connection(), project_id).await?;
    let response: Vec<TestCaseResponse> = cases.into_iter().map(TestCaseResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Get a test case with its steps ordered by step number.
#[utoipa::path(
    get,
    path = "/api/test-cases/{id}",
    tag = "Test Cases",
    params(("id" = Uuid, Path, description = "Test case UUID")),
    responses(
        (status = 200, description = "Test case with steps", body = TestCaseWithSteps),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn get_test_case(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let case = test_cases::find_active_by_id(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test case".to_string()))?;
    let steps = test_cases::steps_for_case(pool.connection(), id).await?;

    Ok(HttpResponse::Ok().json(TestCaseWithSteps {
        test_case: TestCaseResponse::from(case),
        steps: steps.into_iter().map(TestStepResponse::from).collect(),
    }))
}

/// Configure test case routes. `/test-cases/passed` is registered before
/// the `{id}` resource so the literal segment wins.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/test-cases")
            .route(web::get().to(list_test_cases))
            .route(web::post().to(create_test_case)),
    )
    .service(web::resource("/test-cases/passed").route(web::get().to(list_passed_test_cases)))
    .service(
        web::resource("/test-cases/{id}")
            .route(web::get().to(get_test_case))
            .route(web::put().to(update_test_case)),
    );
}
