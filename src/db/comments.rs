//! Database operations for test case comments.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{
    comment::{self, Entity as Comment},
    user,
};
use crate::error::AppResult;
use crate::models::CommentResponse;

/// Insert a comment.
pub async fn insert(
    db: &DatabaseConnection,
    test_case_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> AppResult<comment::Model> {
    let model = comment::ActiveModel {
        id: Set(Uuid::new_v4()),
        test_case_id: Set(test_case_id),
        user_id: Set(user_id),
        content: Set(content.to_string()),
        created_at: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}

/// Comments for a case joined with author usernames, newest first.
pub async fn list_for_case(
    db: &DatabaseConnection,
    test_case_id: Uuid,
) -> AppResult<Vec<CommentResponse>> {
    let rows = Comment::find()
        .filter(comment::Column::TestCaseId.eq(test_case_id))
        .find_also_related(user::Entity)
        .order_by_desc(comment::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(c, author)| CommentResponse {
            id: c.id,
            test_case_id: c.test_case_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at,
            username: author.map(|u| u.username),
        })
        .collect())
}

/// Find a comment by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<comment::Model>> {
    Ok(Comment::find_by_id(id).one(db).await?)
}

/// Delete a comment. The author-or-admin check happens in the handler.
pub async fn delete_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
    let result = Comment::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
