//! Migration: Add lifecycle status column to test_cases.
//!
//! A Pass execution sets 'closed'; an admin reopen sets 'open'.

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
                ALTER TABLE test_cases
                    ADD COLUMN IF NOT EXISTS status VARCHAR(10) NOT NULL DEFAULT 'open'
                        CHECK (status IN ('open', 'closed'));

                CREATE INDEX IF NOT EXISTS idx_test_cases_status
                    ON test_cases(project_id, status)
                    WHERE is_deleted = FALSE;
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
                DROP INDEX IF EXISTS idx_test_cases_status;
                ALTER TABLE test_cases DROP COLUMN IF EXISTS status;
                "#,
            )
            .await?;

        Ok(())
    }
}
