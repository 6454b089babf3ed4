//! Migration: Add assigned_to column to test_cases.
//!
//! Additive deploy-script migration; IF NOT EXISTS keeps re-runs benign.

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
                    ADD COLUMN IF NOT EXISTS assigned_to UUID REFERENCES users(id);

                CREATE INDEX IF NOT EXISTS idx_test_cases_assigned_to
                    ON test_cases(assigned_to)
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
                DROP INDEX IF EXISTS idx_test_cases_assigned_to;
                ALTER TABLE test_cases DROP COLUMN IF EXISTS assigned_to;
                "#,
            )
            .await?;

        Ok(())
    }
}
