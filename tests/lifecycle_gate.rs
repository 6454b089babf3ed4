//! Lifecycle and execution-gate properties, exercised through the public
//! library surface without a database.

use caseflow_lib::error::AppError;
use caseflow_lib::models::{CaseStatus, ExecutionStatus, Role};
use caseflow_lib::services::{check_execution_allowed, resulting_case_status};

fn forbidden_reason(result: Result<(), AppError>) -> Option<&'static str> {
    match result {
        Err(AppError::Forbidden { reason, .. }) => reason,
        _ => None,
    }
}

#[test]
fn pass_execution_closes_an_open_case_and_others_do_not() {
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
            CaseStatus::Open,
            "{:?} must not transition an open case",
            outcome
        );
    }
}

#[test]
fn closed_cases_reject_non_admins_even_with_a_grant() {
    for role in [Role::TestLead, Role::Tester, Role::ReadOnly] {
        for has_permission in [true, false] {
            let result = check_execution_allowed(role, CaseStatus::Closed, has_permission);
            assert_eq!(
                forbidden_reason(result),
                Some("closed"),
                "role {:?} with permission={} must be frozen out",
                role,
                has_permission
            );
        }
    }
}

#[test]
fn ungranted_non_admins_are_denied_then_allowed_after_a_grant() {
    // Denied first: no ExecutionPermission row
    let denied = check_execution_allowed(Role::Tester, CaseStatus::Open, false);
    assert_eq!(forbidden_reason(denied), Some("no_permission"));

    // Granting the permission makes the same attempt succeed
    assert!(check_execution_allowed(Role::Tester, CaseStatus::Open, true).is_ok());
}

#[test]
fn admins_bypass_both_gates() {
    assert!(check_execution_allowed(Role::Admin, CaseStatus::Open, false).is_ok());
    assert!(check_execution_allowed(Role::Admin, CaseStatus::Closed, false).is_ok());
}

#[test]
fn closed_gate_wins_over_missing_permission() {
    // A non-admin with no grant hitting a closed case must see `closed`,
    // not `no_permission`
    let result = check_execution_allowed(Role::Tester, CaseStatus::Closed, false);
    assert_eq!(forbidden_reason(result), Some("closed"));
}

#[test]
fn lifecycle_cycles_are_expected() {
    // open -> closed (Pass) -> open (admin reopen) -> closed (Pass) ...
    let mut status = CaseStatus::Open;

    status = resulting_case_status(status, ExecutionStatus::Fail);
    assert_eq!(status, CaseStatus::Open);

    status = resulting_case_status(status, ExecutionStatus::Pass);
    assert_eq!(status, CaseStatus::Closed);

    // Admin reopen is the only way back
    status = CaseStatus::Open;
    status = resulting_case_status(status, ExecutionStatus::Pass);
    assert_eq!(status, CaseStatus::Closed);
}
