//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Caseflow Server",
        version = "0.3.0",
        description = "Role-gated test case management API: projects, suites, test cases with ordered steps, permission-gated executions, comments, and cached dashboard analytics"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::auth::register,
        api::auth::login,
        // Users
        api::users::list_users,
        // Projects
        api::projects::create_project,
        api::projects::list_projects,
        api::projects::get_project,
        api::projects::update_project,
        api::projects::delete_project,
        // Test suites
        api::test_suites::create_test_suite,
        api::test_suites::list_suites_by_project,
        // Test cases
        api::test_cases::create_test_case,
        api::test_cases::update_test_case,
        api::test_cases::list_test_cases,
        api::test_cases::list_passed_test_cases,
        api::test_cases::get_test_case,
        api::test_case_status::reopen_test_case,
        // Test executions
        api::test_executions::record_execution,
        api::test_executions::execution_history,
        // Execution permissions
        api::execution_permissions::grant_permission,
        api::execution_permissions::revoke_permission,
        api::execution_permissions::list_permitted_users,
        api::execution_permissions::check_permission,
        // Comments
        api::comments::add_comment,
        api::comments::list_comments,
        api::comments::delete_comment,
        // Analytics
        api::analytics::dashboard,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Auth / users
            models::Role,
            models::RegisterRequest,
            models::LoginRequest,
            models::LoginResponse,
            models::UserResponse,
            // Projects
            models::ProjectStatus,
            models::CreateProjectRequest,
            models::UpdateProjectRequest,
            models::ProjectResponse,
            // Test suites
            models::CreateTestSuiteRequest,
            models::TestSuiteResponse,
            // Test cases
            models::Priority,
            models::CaseType,
            models::CaseStatus,
            models::StepInput,
            models::TestCasePayload,
            models::TestCaseResponse,
            models::TestStepResponse,
            models::TestCaseWithSteps,
            // Test executions
            models::ExecutionStatus,
            models::RecordExecutionRequest,
            models::ExecutionRecordedResponse,
            models::ExecutionHistoryItem,
            // Execution permissions
            models::GrantPermissionRequest,
            models::GrantPermissionResponse,
            models::PermittedUser,
            models::PermissionCheckResponse,
            // Comments
            models::CreateCommentRequest,
            models::CommentResponse,
            // Analytics
            models::DashboardAnalytics,
            models::EntityCounts,
            models::StatusCount,
            models::PriorityCount,
            models::DayCount,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User listing"),
        (name = "Projects", description = "Project management"),
        (name = "Test Suites", description = "Test suite management"),
        (name = "Test Cases", description = "Test cases, steps, and lifecycle"),
        (name = "Test Executions", description = "Permission-gated execution recording"),
        (name = "Execution Permissions", description = "Per-user execution grants"),
        (name = "Comments", description = "Test case comments"),
        (name = "Analytics", description = "Cached dashboard aggregates")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
