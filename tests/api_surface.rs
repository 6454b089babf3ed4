//! HTTP-level tests that run without a database: health probe, wire
//! formats, and token verification through the service surface.

use actix_web::{App, test};
use secrecy::SecretString;
use uuid::Uuid;

use caseflow_lib::api;
use caseflow_lib::auth::{create_token, verify_token};
use caseflow_lib::models::{RecordExecutionRequest, Role, TestCasePayload};

#[actix_rt::test]
async fn health_endpoint_reports_ok() {
    let app = test::init_service(App::new().service(api::health::health)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[::core::prelude::v1::test]
fn session_token_round_trips_identity_and_role() {
    let secret = SecretString::from("surface-test-secret");
    let user_id = Uuid::new_v4();

    let token = create_token(user_id, "bob", Role::TestLead, &secret, 600).unwrap();
    let claims = verify_token(&token, &secret).unwrap();

    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.username, "bob");
    assert_eq!(claims.role, Role::TestLead);
}

#[::core::prelude::v1::test]
fn execution_request_parses_the_documented_wire_shape() {
    let req: RecordExecutionRequest = serde_json::from_value(serde_json::json!({
        "test_case_id": "7f2c1c1a-9a8e-4f7e-9d55-0a2d4b3c2e10",
        "status": "Pending",
        "actual_result": "Not run yet"
    }))
    .unwrap();

    assert_eq!(req.status.as_str(), "Pending");
    assert_eq!(req.comments, None);

    // Unknown statuses are rejected at the deserialization boundary
    assert!(
        serde_json::from_value::<RecordExecutionRequest>(serde_json::json!({
            "test_case_id": "7f2c1c1a-9a8e-4f7e-9d55-0a2d4b3c2e10",
            "status": "Passed"
        }))
        .is_err()
    );
}

#[::core::prelude::v1::test]
fn test_case_payload_accepts_gapped_step_numbers() {
    // Caller-supplied ordering: gaps and duplicates are stored as-is
    let payload: TestCasePayload = serde_json::from_value(serde_json::json!({
        "project_id": "7f2c1c1a-9a8e-4f7e-9d55-0a2d4b3c2e10",
        "title": "Search returns relevant results",
        "priority": "Medium",
        "type": "API",
        "steps": [
            {"step_number": 10, "action": "Index documents", "expected_result": "Indexed"},
            {"step_number": 10, "action": "Query", "expected_result": "Hits returned"},
            {"step_number": 40, "action": "Check ranking", "expected_result": "Ordered"}
        ]
    }))
    .unwrap();

    assert!(payload.validate().is_ok());
    let numbers: Vec<i32> = payload
        .steps
        .as_ref()
        .unwrap()
        .iter()
        .map(|s| s.step_number)
        .collect();
    assert_eq!(numbers, vec![10, 10, 40]);
}
