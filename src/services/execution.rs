//! Execution gate: decides whether an identity may record an execution
//! against a test case, and which state transition the outcome causes.
//!
//! The decision is pure so the whole lifecycle table is unit-testable
//! without a database. Check order matters: a closed case is reported as
//! `closed` even when the caller also lacks an execution permission.

use crate::error::{AppError, AppResult};
use crate::models::{CaseStatus, ExecutionStatus, Role};

/// Gate an execution attempt.
///
/// - Closed cases are frozen for everyone but admins (`reason: closed`).
/// - Non-admins additionally need an execution permission row
///   (`reason: no_permission`); admins bypass that check unconditionally.
pub fn check_execution_allowed(
    role: Role,
    case_status: CaseStatus,
    has_permission: bool,
) -> AppResult<()> {
    if case_status == CaseStatus::Closed && !role.is_admin() {
        return Err(AppError::forbidden_with_reason(
            "This test case is closed. Only admins can reopen and re-test it.",
            "closed",
        ));
    }

    if !role.is_admin() && !has_permission {
        return Err(AppError::forbidden_with_reason(
            "You do not have permission to execute tests. Please contact an admin to grant you execution permission.",
            "no_permission",
        ));
    }

    Ok(())
}

/// The status an accepted execution leaves the case in. Only a Pass
/// transitions `open -> closed`; every other outcome is a no-op.
pub fn resulting_case_status(current: CaseStatus, outcome: ExecutionStatus) -> CaseStatus {
    if outcome.closes_case() {
        CaseStatus::Closed
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(result: AppResult<()>) -> Option<&'static str> {
        match result {
            Err(AppError::Forbidden { reason, .. }) => reason,
            _ => None,
        }
    }

    #[test]
    fn test_open_case_with_permission_is_allowed() {
        for role in [Role::TestLead, Role::Tester, Role::ReadOnly] {
            assert!(check_execution_allowed(role, CaseStatus::Open, true).is_ok());
        }
    }

    #[test]
    fn test_closed_case_rejects_non_admins_regardless_of_grants() {
        for has_permission in [true, false] {
            let result = check_execution_allowed(Role::Tester, CaseStatus::Closed, has_permission);
            assert_eq!(reason_of(result), Some("closed"));
        }
    }

    #[test]
    fn test_missing_permission_is_reported_for_open_cases() {
        let result = check_execution_allowed(Role::Tester, CaseStatus::Open, false);
        assert_eq!(reason_of(result), Some("no_permission"));
    }

    #[test]
    fn test_admin_bypasses_both_checks() {
        assert!(check_execution_allowed(Role::Admin, CaseStatus::Open, false).is_ok());
        assert!(check_execution_allowed(Role::Admin, CaseStatus::Closed, false).is_ok());
    }

    #[test]
    fn test_only_pass_closes_the_case() {
        assert_eq!(
            resulting_case_status(CaseStatus::Open, ExecutionStatus::Pass),
            CaseStatus::Closed
        );
        for outcome in [
            ExecutionStatus::Fail,
            ExecutionStatus::Blocked,
            ExecutionStatus::Skipped,
            ExecutionStatus::Pending,
        ] {
            assert_eq!(
                resulting_case_status(CaseStatus::Open, outcome),
                CaseStatus::Open
            );
        }
    }

    #[test]
    fn test_admin_pass_on_closed_case_keeps_it_closed() {
        assert_eq!(
            resulting_case_status(CaseStatus::Closed, ExecutionStatus::Pass),
            CaseStatus::Closed
        );
        assert_eq!(
            resulting_case_status(CaseStatus::Closed, ExecutionStatus::Fail),
            CaseStatus::Closed
        );
    }
}
