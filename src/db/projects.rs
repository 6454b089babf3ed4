//! Database operations for projects and project membership.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{
    project::{self, Entity as Project},
    project_member, test_case,
};
use crate::error::AppResult;
use crate::models::{CreateProjectRequest, ProjectStatus, UpdateProjectRequest};

/// Insert a project and auto-enroll the creator as a member with role
/// 'lead', in one transaction.
pub async fn create_with_creator(
    db: &DatabaseConnection,
    req: &CreateProjectRequest,
    created_by: Uuid,
) -> AppResult<project::Model> {
    let txn = db.begin().await?;
    let now = Utc::now();
    let project_id = Uuid::new_v4();

    let model = project::ActiveModel {
        id: Set(project_id),
        name: Set(req.name.clone()),
        description: Set(req.description.clone()),
        version: Set(req.version.clone()),
        status: Set(ProjectStatus::Active.as_str().to_string()),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = model.insert(&txn).await?;

    let member = project_member::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        user_id: Set(created_by),
        role: Set("lead".to_string()),
        created_at: Set(now),
    };
    member.insert(&txn).await?;

    txn.commit().await?;
    Ok(created)
}

/// List all projects, newest first (admin listing; cached by the caller).
pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<project::Model>> {
    let result = Project::find()
        .order_by_desc(project::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(result)
}

/// List distinct projects containing at least one non-deleted test case
/// assigned to the given user. Per-identity, never cached.
pub async fn list_assigned_to_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> AppResult<Vec<project::Model>> {
    let project_ids: Vec<Uuid> = test_case::Entity::find()
        .select_only()
        .column(test_case::Column::ProjectId)
        .distinct()
        .filter(test_case::Column::AssignedTo.eq(user_id))
        .filter(test_case::Column::IsDeleted.eq(false))
        .into_tuple()
        .all(db)
        .await?;

    if project_ids.is_empty() {
        return Ok(Vec::new());
    }

    let result = Project::find()
        .filter(project::Column::Id.is_in(project_ids))
        .order_by_desc(project::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(result)
}

/// Find a project by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<project::Model>> {
    Ok(Project::find_by_id(id).one(db).await?)
}

/// Partial update: absent fields keep their stored values. Returns None
/// when the project does not exist.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    req: &UpdateProjectRequest,
) -> AppResult<Option<project::Model>> {
    let Some(existing) = Project::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: project::ActiveModel = existing.into();
    if let Some(ref name) = req.name {
        active.name = Set(name.clone());
    }
    if let Some(ref description) = req.description {
        active.description = Set(Some(description.clone()));
    }
    if let Some(ref version) = req.version {
        active.version = Set(Some(version.clone()));
    }
    if let Some(status) = req.status {
        active.status = Set(status.as_str().to_string());
    }
    active.updated_at = Set(Utc::now());

    Ok(Some(active.update(db).await?))
}

/// Hard-delete a project row. Returns false when no row existed.
pub async fn delete_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
    let result = Project::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
