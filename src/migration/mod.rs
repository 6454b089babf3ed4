//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_projects;
mod m20260301_000003_create_project_members;
mod m20260301_000004_create_test_suites;
mod m20260301_000005_create_test_cases;
mod m20260301_000006_create_test_steps;
mod m20260301_000007_create_test_executions;
mod m20260315_000008_add_test_case_assignment;
mod m20260315_000009_create_execution_permissions;
mod m20260315_000010_create_comments;
mod m20260315_000011_add_test_case_status;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_projects::Migration),
            Box::new(m20260301_000003_create_project_members::Migration),
            Box::new(m20260301_000004_create_test_suites::Migration),
            Box::new(m20260301_000005_create_test_cases::Migration),
            Box::new(m20260301_000006_create_test_steps::Migration),
            Box::new(m20260301_000007_create_test_executions::Migration),
            Box::new(m20260315_000008_add_test_case_assignment::Migration),
            Box::new(m20260315_000009_create_execution_permissions::Migration),
            Box::new(m20260315_000010_create_comments::Migration),
            Box::new(m20260315_000011_add_test_case_status::Migration),
        ]
    }
}
