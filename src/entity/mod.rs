//! SeaORM entity definitions for the PostgreSQL database.

pub mod comment;
pub mod execution_permission;
pub mod project;
pub mod project_member;
pub mod test_case;
pub mod test_execution;
pub mod test_step;
pub mod test_suite;
pub mod user;
