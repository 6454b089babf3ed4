//! Domain models for the Caseflow server.

pub mod analytics;
pub mod comment;
pub mod execution_permission;
pub mod project;
pub mod test_case;
pub mod test_execution;
pub mod test_suite;
pub mod user;

// Re-export commonly used types
pub use analytics::{DashboardAnalytics, DayCount, EntityCounts, PriorityCount, StatusCount};
pub use comment::{CommentResponse, CreateCommentRequest};
pub use execution_permission::{
    GrantPermissionRequest, GrantPermissionResponse, PermissionCheckResponse, PermittedUser,
};
pub use project::{CreateProjectRequest, ProjectResponse, ProjectStatus, UpdateProjectRequest};
pub use test_case::{
    CaseStatus, CaseType, ListTestCasesQuery, PassedTestCasesQuery, Priority, StepInput,
    TestCasePayload, TestCaseResponse, TestCaseWithSteps, TestStepResponse,
};
pub use test_execution::{
    ExecutionHistoryItem, ExecutionRecordedResponse, ExecutionStatus, RecordExecutionRequest,
};
pub use test_suite::{CreateTestSuiteRequest, TestSuiteResponse};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, Role, UserResponse};
