//! Tests for the transport-agnostic error payload.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use super::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(DomainError::conflict("taken"), ErrorCode::Conflict)]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_expected_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn serialises_camel_case_and_omits_empty_fields() {
    let error = DomainError::conflict("ticket already exists");
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({ "code": "conflict", "message": "ticket already exists" })
    );
}

#[rstest]
fn details_and_trace_id_survive_round_trip() {
    let error = DomainError::invalid_request("bad")
        .with_trace_id("abc")
        .with_details(json!({ "code": "invalid_ticket_type" }));

    let encoded = serde_json::to_string(&error).expect("serialise error");
    let decoded: DomainError = serde_json::from_str(&encoded).expect("deserialise error");

    assert_eq!(decoded, error);
    assert_eq!(decoded.trace_id(), Some("abc"));
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let error = TraceId::scope(trace_id, async { DomainError::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(Uuid::nil().to_string().as_str()));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(DomainError::conflict("taken").to_string(), "taken");
}

#[rstest]
#[case("invalid_request", Some(ErrorCode::InvalidRequest))]
#[case("conflict", Some(ErrorCode::Conflict))]
#[case("not_found", None)]
#[case("unauthorized", None)]
fn only_ticketing_codes_deserialise(#[case] raw: &str, #[case] expected: Option<ErrorCode>) {
    assert_eq!(serde_json::from_value::<ErrorCode>(json!(raw)).ok(), expected);
}
