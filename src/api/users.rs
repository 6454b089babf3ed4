//! User listing endpoint.

use actix_web::{HttpResponse, web};

use crate::auth::AuthUser;
use crate::db::{DbPool, users};
use crate::error::AppResult;
use crate::models::{Role, UserResponse};

/// List all users, ordered by username.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_users(_auth: AuthUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let all = users::list_all(pool.connection()).await?;

    let response: Vec<UserResponse> = all
        .into_iter()
        .map(|u| UserResponse {
            role: Role::parse(&u.role).unwrap_or_default(),
            id: u.id,
            username: u.username,
            email: u.email,
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users").route(web::get().to(list_users)));
}
