//! Migration: Create test_steps table.

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
                CREATE TABLE test_steps (
                    id UUID PRIMARY KEY,
                    test_case_id UUID NOT NULL REFERENCES test_cases(id) ON DELETE CASCADE,

                    -- Caller-supplied ordering; gaps and duplicates accepted
                    step_number INTEGER NOT NULL,
                    action TEXT NOT NULL,
                    expected_result TEXT NOT NULL
                );

                CREATE INDEX idx_test_steps_test_case_id ON test_steps(test_case_id, step_number);
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
                DROP TABLE IF EXISTS test_steps CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
