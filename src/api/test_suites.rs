//! Test suite endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::{DbPool, test_suites};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTestSuiteRequest, Role, TestSuiteResponse};

/// Create a test suite.
#[utoipa::path(
    post,
    path = "/api/test-suites",
    tag = "Test Suites",
    request_body = CreateTestSuiteRequest,
    responses(
        (status = 201, description = "Suite created", body = TestSuiteResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 403, description = "Role denied", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn create_test_suite(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    body: web::Json<CreateTestSuiteRequest>,
) -> AppResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::TestLead])?;

    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let suite = test_suites::insert(pool.connection(), &req, auth.id).await?;

    Ok(HttpResponse::Created().json(TestSuiteResponse::from(suite)))
}

/// List suites belonging to a project, newest first.
#[utoipa::path(
    get,
    path = "/api/test-suites/project/{project_id}",
    tag = "Test Suites",
    params(("project_id" = Uuid, Path, description = "Project UUID")),
    responses(
        (status = 200, description = "Suites for the project", body = [TestSuiteResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_suites_by_project(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();

    let suites = test_suites::list_by_project(pool.connection(), project_id).await?;
    let response: Vec<TestSuiteResponse> =
        suites.into_iter().map(TestSuiteResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Configure test suite routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/test-suites").route(web::post().to(create_test_suite)))
        .service(
            web::resource("/test-suites/project/{project_id}")
                .route(web::get().to(list_suites_by_project)),
        );
}
