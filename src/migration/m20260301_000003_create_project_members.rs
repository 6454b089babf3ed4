//! Migration: Create project_members table.
//!
//! The project creator is auto-enrolled as a member at creation time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE project_members (
                    id UUID PRIMARY KEY,
                    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                    user_id UUID NOT NULL REFERENCES users(id),
                    role VARCHAR(50) NOT NULL DEFAULT 'member',

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    UNIQUE (project_id, user_id)
                );

                CREATE INDEX idx_project_members_project_id ON project_members(project_id);
                CREATE INDEX idx_project_members_user_id ON project_members(user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS project_members CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
