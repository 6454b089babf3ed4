//! Migration: Create test_cases table.
//!
//! `assigned_to` and `status` arrived later as additive migrations and are
//! not part of the base table.

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
                CREATE TABLE test_cases (
                    id UUID PRIMARY KEY,
                    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                    suite_id UUID REFERENCES test_suites(id) ON DELETE SET NULL,

                    title VARCHAR(500) NOT NULL,
                    description TEXT,
                    priority VARCHAR(20) NOT NULL
                        CHECK (priority IN ('Low', 'Medium', 'High', 'Critical')),
                    case_type VARCHAR(20) NOT NULL
                        CHECK (case_type IN ('Functional', 'Integration', 'Regression', 'Smoke', 'UI', 'API')),
                    pre_conditions TEXT,
                    post_conditions TEXT,

                    -- Soft-delete marker filtering all reads
                    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
                    created_by UUID NOT NULL REFERENCES users(id),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_test_cases_project_id ON test_cases(project_id)
                    WHERE is_deleted = FALSE;
                CREATE INDEX idx_test_cases_suite_id ON test_cases(suite_id)
                    WHERE is_deleted = FALSE;

                -- Trigger to update updated_at
                CREATE TRIGGER update_test_cases_updated_at
                    BEFORE UPDATE ON test_cases
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
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
                DROP TRIGGER IF EXISTS update_test_cases_updated_at ON test_cases;
                DROP TABLE IF EXISTS test_cases CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
