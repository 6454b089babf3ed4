//! Test case lifecycle endpoint: the admin-only reopen.
//!
//! Reopening is the only way to un-close a case. Reopening an already-open
//! case succeeds and is a no-op on status.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::{DbPool, test_cases};
use crate::error::{AppError, AppResult};
use crate::models::{CaseStatus, Role, TestCaseResponse};

/// Reopen a closed test case (admin only).
#[utoipa::path(
    patch,
    path = "/api/test-case-status/{id}/reopen",
    tag = "Test Cases",
    params(("id" = Uuid, Path, description = "Test case UUID")),
    responses(
        (status = 200, description = "Test case reopened", body = TestCaseResponse),
        (status = 403, description = "Admin role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn reopen_test_case(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require_role(Role::Admin)?;

    let id = path.into_inner();

    let reopened = test_cases::set_status(pool.connection(), id, CaseStatus::Open)
        .await?
        .ok_or_else(|| AppError::NotFound("Test case".to_string()))?;

    info!("Test case reopened: {} by {}", id, auth.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Test case reopened successfully",
        "testCase": TestCaseResponse::from(reopened)
    })))
}

/// Configure test case status routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/test-case-status/{id}/reopen").route(web::patch().to(reopen_test_case)),
    );
}
