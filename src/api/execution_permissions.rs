//! Execution permission endpoints (grant/revoke are admin-only).

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::{DbPool, execution_permissions, users};
use crate::error::{AppError, AppResult};
use crate::models::{
    GrantPermissionRequest, GrantPermissionResponse, PermissionCheckResponse, PermittedUser, Role,
    UserResponse,
};

/// Grant execution permission to a user by email.
#[utoipa::path(
    post,
    path = "/api/execution-permissions/grant",
    tag = "Execution Permissions",
    request_body = GrantPermissionRequest,
    responses(
        (status = 201, description = "Permission granted", body = GrantPermissionResponse),
        (status = 403, description = "Admin role required", body = crate::error::ErrorResponse),
        (status = 404, description = "No user with that email", body = crate::error::ErrorResponse),
        (status = 409, description = "User already has permission", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn grant_permission(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    body: web::Json<GrantPermissionRequest>,
) -> AppResult<HttpResponse> {
    auth.require_role(Role::Admin)?;

    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let target = users::find_by_email(pool.connection(), &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User with this email".to_string()))?;

    if execution_permissions::exists_for_user(pool.connection(), target.id).await? {
        return Err(AppError::Conflict(
            "User already has execution permission".to_string(),
        ));
    }

    execution_permissions::insert(pool.connection(), target.id, auth.id).await?;

    info!(
        "Execution permission granted to {} by {}",
        target.username, auth.username
    );

    Ok(HttpResponse::Created().json(GrantPermissionResponse {
        message: "Execution permission granted successfully".to_string(),
        user: UserResponse {
            role: Role::parse(&target.role).unwrap_or_default(),
            id: target.id,
            username: target.username,
            email: target.email,
        },
    }))
}

/// Revoke execution permission from a user.
#[utoipa::path(
    delete,
    path = "/api/execution-permissions/revoke/{user_id}",
    tag = "Execution Permissions",
    params(("user_id" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Permission revoked"),
        (status = 403, description = "Admin role required", body = crate::error::ErrorResponse),
        (status = 404, description = "User holds no permission", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn revoke_permission(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require_role(Role::Admin)?;

    let user_id = path.into_inner();

    let revoked = execution_permissions::delete_for_user(pool.connection(), user_id).await?;
    if !revoked {
        return Err(AppError::NotFound(
            "Execution permission for this user".to_string(),
        ));
    }

    info!(
        "Execution permission revoked from {} by {}",
        user_id, auth.username
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Execution permission revoked successfully"
    })))
}

/// List all users holding execution permission (admin only).
#[utoipa::path(
    get,
    path = "/api/execution-permissions",
    tag = "Execution Permissions",
    responses(
        (status = 200, description = "Permitted users", body = [PermittedUser]),
        (status = 403, description = "Admin role required", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_permitted_users(
    auth: AuthUser,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.require_role(Role::Admin)?;

    let permitted = execution_permissions::list_permitted(pool.connection()).await?;

    Ok(HttpResponse::Ok().json(permitted))
}

/// Self-check: does the caller hold execution permission? Admins always do.
#[utoipa::path(
    get,
    path = "/api/execution-permissions/check",
    tag = "Execution Permissions",
    responses(
        (status = 200, description = "Permission state", body = PermissionCheckResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn check_permission(auth: AuthUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    if auth.is_admin() {
        return Ok(HttpResponse::Ok().json(PermissionCheckResponse {
            has_permission: true,
            reason: "admin",
        }));
    }

    let granted = execution_permissions::exists_for_user(pool.connection(), auth.id).await?;

    Ok(HttpResponse::Ok().json(PermissionCheckResponse {
        has_permission: granted,
        reason: if granted { "granted" } else { "none" },
    }))
}

/// Configure execution permission routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/execution-permissions").route(web::get().to(list_permitted_users)),
    )
    .service(web::resource("/execution-permissions/grant").route(web::post().to(grant_permission)))
    .service(
        web::resource("/execution-permissions/revoke/{user_id}")
            .route(web::delete().to(revoke_permission)),
    )
    .service(web::resource("/execution-permissions/check").route(web::get().to(check_permission)));
}
