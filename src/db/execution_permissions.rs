//! Database operations for execution permissions.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::execution_permission::{self, Entity as ExecutionPermission};
use crate::error::AppResult;
use crate::models::PermittedUser;

/// Whether the user holds an execution permission row.
pub async fn exists_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<bool> {
    let count = ExecutionPermission::find()
        .filter(execution_permission::Column::UserId.eq(user_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Grant permission, recording the granting admin for the audit trail.
pub async fn insert(
    db: &DatabaseConnection,
    user_id: Uuid,
    granted_by: Uuid,
) -> AppResult<execution_permission::Model> {
    let model = execution_permission::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        granted_by: Set(granted_by),
        granted_at: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}

/// Revoke permission. Returns false when the user held none.
pub async fn delete_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<bool> {
    let result = ExecutionPermission::delete_many()
        .filter(execution_permission::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

#[derive(Debug, FromQueryResult)]
struct PermittedUserRow {
    id: Uuid,
    username: String,
    email: String,
    role: String,
    granted_at: chrono::DateTime<chrono::Utc>,
    granted_by_username: Option<String>,
}

/// All permitted users joined with the granter's username, newest grant
/// first.
pub async fn list_permitted(db: &DatabaseConnection) -> AppResult<Vec<PermittedUser>> {
    let stmt = Statement::from_string(
        DatabaseBackend::Postgres,
        r#"
        SELECT u.id, u.username, u.email, u.role,
               p.granted_at,
               granter.username AS granted_by_username
        FROM test_execution_permissions p
        JOIN users u ON p.user_id = u.id
        LEFT JOIN users granter ON p.granted_by = granter.id
        ORDER BY p.granted_at DESC
        "#
        .to_owned(),
    );

    let rows = PermittedUserRow::find_by_statement(stmt).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|r| PermittedUser {
            id: r.id,
            username: r.username,
            email: r.email,
            role: r.role,
            granted_at: r.granted_at,
            granted_by_username: r.granted_by_username,
        })
        .collect())
}
