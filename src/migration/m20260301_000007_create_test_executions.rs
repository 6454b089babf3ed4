//! Migration: Create test_executions table.
//!
//! Append-only log; the API never updates or deletes rows.

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
                CREATE TABLE test_executions (
                    id UUID PRIMARY KEY,
                    test_case_id UUID NOT NULL REFERENCES test_cases(id) ON DELETE CASCADE,
                    executed_by UUID NOT NULL REFERENCES users(id),

                    status VARCHAR(20) NOT NULL
                        CHECK (status IN ('Pass', 'Fail', 'Blocked', 'Skipped', 'Pending')),
                    actual_result TEXT,
                    comments TEXT,

                    execution_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_test_executions_test_case_id
                    ON test_executions(test_case_id, execution_date DESC);

                -- Index for the 7-day dashboard time series
                CREATE INDEX idx_test_executions_execution_date
                    ON test_executions(execution_date);
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
                DROP TABLE IF EXISTS test_executions CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
