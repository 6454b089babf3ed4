//! Comment endpoints, nested under test cases.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::{DbPool, comments, test_cases};
use crate::error::{AppError, AppResult};
use crate::models::{CommentResponse, CreateCommentRequest};

/// Add a comment to a test case.
#[utoipa::path(
    post,
    path = "/api/test-cases/{test_case_id}/comments",
    tag = "Comments",
    params(("test_case_id" = Uuid, Path, description = "Test case UUID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn add_comment(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let test_case_id = path.into_inner();
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    test_cases::find_active_by_id(pool.connection(), test_case_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test case".to_string()))?;

    let comment = comments::insert(pool.connection(), test_case_id, auth.id, &req.content).await?;

    Ok(HttpResponse::Created().json(CommentResponse {
        id: comment.id,
        test_case_id: comment.test_case_id,
        user_id: comment.user_id,
        content: comment.content,
        created_at: comment.created_at,
        username: Some(auth.username),
    }))
}

/// List comments for a test case, newest first.
#[utoipa::path(
    get,
    path = "/api/test-cases/{test_case_id}/comments",
    tag = "Comments",
    params(("test_case_id" = Uuid, Path, description = "Test case UUID")),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_comments(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let test_case_id = path.into_inner();
    let result = comments::list_for_case(pool.connection(), test_case_id).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Delete a comment. Only the author or an admin may delete.
#[utoipa::path(
    delete,
    path = "/api/test-cases/{test_case_id}/comments/{comment_id}",
    tag = "Comments",
    params(
        ("test_case_id" = Uuid, Path, description = "Test case UUID"),
        ("comment_id" = Uuid, Path, description = "Comment UUID")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "Not the author or an admin", body = crate::error::ErrorResponse),
        (status = 404, description = "Comment not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_comment(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (_test_case_id, comment_id) = path.into_inner();

    let comment = comments::find_by_id(pool.connection(), comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment".to_string()))?;

    if comment.user_id != auth.id && !auth.is_admin() {
        return Err(AppError::forbidden(
            "Not authorized to delete this comment",
        ));
    }

    comments::delete_by_id(pool.connection(), comment_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Comment deleted" })))
}

/// Configure comment routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/test-cases/{test_case_id}/comments")
            .route(web::get().to(list_comments))
            .route(web::post().to(add_comment)),
    )
    .service(
        web::resource("/test-cases/{test_case_id}/comments/{comment_id}")
            .route(web::delete().to(delete_comment)),
    );
}
