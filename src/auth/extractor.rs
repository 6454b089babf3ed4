//! Actix-web extractor for bearer-token authentication.
//!
//! Handlers take an `AuthUser` argument to require a valid session token;
//! role checks go through `require_role`/`require_any_role` so every
//! denial carries the roles that would have been accepted.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use super::verify_token;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Role;

/// The authenticated caller attached to a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    /// Check if the caller has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Permit only the given role.
    pub fn require_role(&self, role: Role) -> AppResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Access denied. {} role required.",
                role
            )))
        }
    }

    /// Permit any of the given roles.
    pub fn require_any_role(&self, roles: &[Role]) -> AppResult<()> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            Err(AppError::forbidden(format!(
                "Access denied. One of these roles required: {}",
                names.join(", ")
            )))
        }
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<Config>>() else {
            return ready(Err(AppError::Database(
                "Internal configuration error".to_string(),
            )));
        };

        let token = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            return ready(Err(AppError::Unauthorized(
                "Access token required".to_string(),
            )));
        };

        match verify_token(token, &config.jwt_secret) {
            Ok(claims) => ready(Ok(AuthUser {
                id: claims.user_id,
                username: claims.username,
                role: claims.role,
            })),
            Err(_) => ready(Err(AppError::Unauthorized(
                "Invalid or expired token".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_role() {
        assert!(caller(Role::Admin).require_role(Role::Admin).is_ok());
        assert!(caller(Role::Tester).require_role(Role::Admin).is_err());
    }

    #[test]
    fn test_require_any_role() {
        let allowed = [Role::Admin, Role::TestLead, Role::Tester];
        assert!(caller(Role::Tester).require_any_role(&allowed).is_ok());
        assert!(caller(Role::ReadOnly).require_any_role(&allowed).is_err());
    }
}
