//! Project endpoints.
//!
//! Listing is role-dependent: admins see every project through the
//! `projects:all` read-through cache, non-admins see only projects with a
//! test case assigned to them (per-identity, never cached).

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cache::{self, Cache};
use crate::db::{DbPool, projects};
use crate::error::{AppError, AppResult};
use crate::models::{CreateProjectRequest, ProjectResponse, Role, UpdateProjectRequest};

/// Create a project. The creator is auto-enrolled as a member.
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 403, description = "Role denied", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn create_project(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    cache: web::Data<Cache>,
    body: web::Json<CreateProjectRequest>,
) -> AppResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::TestLead])?;

    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let project = projects::create_with_creator(pool.connection(), &req, auth.id).await?;

    cache
        .invalidate(&[cache::PROJECTS_ALL, cache::ANALYTICS_DASHBOARD])
        .await;

    info!("Project created: {} by {}", project.name, auth.username);

    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// List projects visible to the caller.
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "Visible projects", body = [ProjectResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_projects(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    cache: web::Data<Cache>,
) -> AppResult<HttpResponse> {
    if auth.is_admin() {
        // Read-through cache: a hit is returned unmodified
        if let Some(cached) = cache.get_json(cache::PROJECTS_ALL).await {
            return Ok(HttpResponse::Ok().json(cached));
        }

        let all = projects::list_all(pool.connection()).await?;
        let response: Vec<ProjectResponse> = all.into_iter().map(ProjectResponse::from).collect();

        let value = serde_json::to_value(&response)?;
        cache
            .put_json(cache::PROJECTS_ALL, &value, cache::PROJECTS_TTL_SECS)
            .await;

        return Ok(HttpResponse::Ok().json(value));
    }

    // Per-identity listing; caching it would explode the key space
    let assigned = projects::list_assigned_to_user(pool.connection(), auth.id).await?;
    let response: Vec<ProjectResponse> = assigned.into_iter().map(ProjectResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Get a project by ID.
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path, description = "Project UUID")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn get_project(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let project = projects::find_by_id(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    Ok(HttpResponse::Ok().json(ProjectResponse::from(project)))
}

/// Update a project (partial; absent fields keep stored values).
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path, description = "Project UUID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponse),
        (status = 403, description = "Role denied", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn update_project(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    cache: web::Data<Cache>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProjectRequest>,
) -> AppResult<HttpResponse> {
    auth.require_any_role(&[Role::Admin, Role::TestLead])?;

    let id = path.into_inner();
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let updated = projects::update(pool.connection(), id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    cache.invalidate(&[cache::PROJECTS_ALL]).await;

    Ok(HttpResponse::Ok().json(ProjectResponse::from(updated)))
}

/// Delete a project (hard row delete).
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path, description = "Project UUID")),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 403, description = "Role denied", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_project(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    cache: web::Data<Cache>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    auth.require_role(Role::Admin)?;

    let id = path.into_inner();
    let deleted = projects::delete_by_id(pool.connection(), id).await?;
    if !deleted {
        return Err(AppError::NotFound("Project".to_string()));
    }

    cache
        .invalidate(&[cache::PROJECTS_ALL, cache::ANALYTICS_DASHBOARD])
        .await;

    info!("Project deleted: {} by {}", id, auth.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Project deleted successfully"
    })))
}

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource("/projects/{id}")
            .route(web::get().to(get_project))
            .route(web::put().to(update_project))
            .route(web::delete().to(delete_project)),
    );
}
