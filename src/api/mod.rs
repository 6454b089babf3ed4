//! API endpoint modules.

pub mod analytics;
pub mod auth;
pub mod comments;
pub mod execution_permissions;
pub mod health;
pub mod openapi;
pub mod projects;
pub mod test_case_status;
pub mod test_cases;
pub mod test_executions;
pub mod test_suites;
pub mod users;

pub use analytics::configure_routes as configure_analytics_routes;
pub use auth::configure_routes as configure_auth_routes;
pub use comments::configure_routes as configure_comment_routes;
pub use execution_permissions::configure_routes as configure_execution_permission_routes;
pub use health::configure_routes as configure_health_routes;
pub use openapi::ApiDoc;
pub use projects::configure_routes as configure_project_routes;
pub use test_case_status::configure_routes as configure_test_case_status_routes;
pub use test_cases::configure_routes as configure_test_case_routes;
pub use test_executions::configure_routes as configure_test_execution_routes;
pub use test_suites::configure_routes as configure_test_suite_routes;
pub use users::configure_routes as configure_user_routes;
