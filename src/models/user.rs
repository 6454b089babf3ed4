//! User models and the role enum gating every protected operation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User roles. Stored as strings in the database, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    TestLead,
    #[default]
    Tester,
    ReadOnly,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::TestLead => "test-lead",
            Self::Tester => "tester",
            Self::ReadOnly => "read-only",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "test-lead" => Some(Self::TestLead),
            "tester" => Some(Self::Tester),
            "read-only" => Some(Self::ReadOnly),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `tester` when omitted.
    #[serde(default)]
    pub role: Option<Role>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().len() < 3 {
            return Err("username must be at least 3 characters".to_string());
        }
        if !is_plausible_email(&self.email) {
            return Err("email must be a valid address".to_string());
        }
        if self.password.len() < 6 {
            return Err("password must be at least 6 characters".to_string());
        }
        Ok(())
    }
}

/// Minimal shape check; deliverability is the mail provider's problem.
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User summary returned to clients. The password digest never leaves the
/// database layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Login response: signed token plus user summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::TestLead, Role::Tester, Role::ReadOnly] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_role_serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Role::TestLead).unwrap(),
            "\"test-lead\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"read-only\"").unwrap(),
            Role::ReadOnly
        );
    }

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
            role: None,
        };
        assert!(ok.validate().is_ok());

        let short_name = RegisterRequest {
            username: "al".to_string(),
            ..ok_clone(&ok)
        };
        assert!(short_name.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..ok_clone(&ok)
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "12345".to_string(),
            ..ok_clone(&ok)
        };
        assert!(short_password.validate().is_err());
    }

    fn ok_clone(r: &RegisterRequest) -> RegisterRequest {
        RegisterRequest {
            username: r.username.clone(),
            email: r.email.clone(),
            password: r.password.clone(),
            role: r.role,
        }
    }
}
