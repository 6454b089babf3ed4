//! Registration and login endpoints.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::create_token;
use crate::config::Config;
use crate::db::{DbPool, users};
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, Role, UserResponse};

/// bcrypt work factor for password digests.
const BCRYPT_COST: u32 = 10;

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation failed or user exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let db = pool.connection();
    if users::exists_by_username_or_email(db, &req.username, &req.email).await? {
        return Err(AppError::Validation("User already exists".to_string()));
    }

    let password_hash = bcrypt::hash(&req.password, BCRYPT_COST)
        .map_err(|e| AppError::Database(format!("Failed to hash password: {}", e)))?;

    let role = req.role.unwrap_or(Role::Tester);
    let user = users::insert(db, &req.username, &req.email, &password_hash, role).await?;

    info!("User registered: {} ({})", user.username, user.role);

    Ok(HttpResponse::Created().json(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role,
    }))
}

/// Log in and receive a signed session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = crate::error::ErrorResponse),
    )
)]
pub async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // One error for both unknown email and bad password: no account oracle
    let invalid = || AppError::Validation("Invalid credentials".to_string());

    let user = users::find_by_email(pool.connection(), &req.email)
        .await?
        .ok_or_else(invalid)?;

    let matches = bcrypt::verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Database(format!("Failed to verify password: {}", e)))?;
    if !matches {
        return Err(invalid());
    }

    let role = Role::parse(&user.role).unwrap_or_default();
    let token = create_token(
        user.id,
        &user.username,
        role,
        &config.jwt_secret,
        config.jwt_ttl_secs,
    )?;

    info!("User logged in: {}", user.username);

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
        },
    }))
}

/// Configure auth routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login)),
    );
}
