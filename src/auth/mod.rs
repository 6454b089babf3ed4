//! Authentication module: session token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the caller's identity and role. The
//! signing secret stays wrapped in `SecretString` so it never appears in
//! logs or debug output.

mod extractor;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

pub use extractor::AuthUser;

use crate::error::{AppError, AppResult};
use crate::models::Role;

/// Session JWT issuer.
pub const SESSION_ISSUER: &str = "caseflow";

/// Session JWT claims.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Create a signed session token for the given identity.
pub fn create_token(
    user_id: Uuid,
    username: &str,
    role: Role,
    secret: &SecretString,
    ttl_secs: u64,
) -> AppResult<String> {
    let now = chrono::Utc::now();
    let exp = now + chrono::Duration::seconds(ttl_secs as i64);

    let claims = SessionClaims {
        sub: user_id.to_string(),
        iss: SESSION_ISSUER.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
        user_id,
        username: username.to_string(),
        role,
    };

    let key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| AppError::Database(format!("Failed to create session token: {}", e)))
}

/// Verify a session token and return its claims. Signature, expiry, and
/// issuer are all checked.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<SessionClaims, String> {
    let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[SESSION_ISSUER]);
    validation.validate_aud = false;

    let token_data = decode::<SessionClaims>(token, &key, &validation)
        .map_err(|e| format!("Invalid session token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("unit-test-secret")
    }

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, "alice", Role::Tester, &secret(), 3600).unwrap();

        let claims = verify_token(&token, &secret()).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Tester);
        assert_eq!(claims.iss, SESSION_ISSUER);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = create_token(Uuid::new_v4(), "alice", Role::Admin, &secret(), 3600).unwrap();
        let other = SecretString::from("another-secret");
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let user_id = Uuid::new_v4();
        // Issue a token that expired an hour ago by going through the
        // claims manually.
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iss: SESSION_ISSUER.to_string(),
            exp: (now - chrono::Duration::hours(1)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(2)).timestamp() as usize,
            user_id,
            username: "alice".to_string(),
            role: Role::Tester,
        };
        let key = EncodingKey::from_secret(secret().expose_secret().as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert!(verify_token(&token, &secret()).is_err());
    }
}
