//! Database operations for users.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::user::{self, Entity as User};
use crate::error::AppResult;
use crate::models::Role;

/// Insert a new user. The caller has already hashed the password.
pub async fn insert(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> AppResult<user::Model> {
    let model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(role.as_str().to_string()),
        created_at: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}

/// Find a user by email (login and permission-grant lookup).
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> AppResult<Option<user::Model>> {
    let result = User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;

    Ok(result)
}

/// Find a user by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<user::Model>> {
    Ok(User::find_by_id(id).one(db).await?)
}

/// Check whether a username or email is already taken.
pub async fn exists_by_username_or_email(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
) -> AppResult<bool> {
    let count = User::find()
        .filter(
            Condition::any()
                .add(user::Column::Username.eq(username))
                .add(user::Column::Email.eq(email)),
        )
        .count(db)
        .await?;

    Ok(count > 0)
}

/// List all users ordered by username.
pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<user::Model>> {
    let result = User::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await?;

    Ok(result)
}
