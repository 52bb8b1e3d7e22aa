//! Tests for HTTP error mapping.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn decode(error: &DomainError) -> (StatusCode, Option<String>, DomainError) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, payload)
}

#[rstest]
#[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(DomainError::conflict("taken"), StatusCode::CONFLICT)]
#[case(DomainError::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: DomainError, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = DomainError::internal("relation \"tickets\" does not exist")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"sql": "select 1"}));

    let (status, header, payload) = decode(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn conflicts_keep_their_details(expected_trace_id: String) {
    let details = json!({"code": "duplicate_ticket", "companyId": 3});
    let error = DomainError::conflict("already open")
        .with_trace_id(expected_trace_id.clone())
        .with_details(details.clone());

    let (status, header, payload) = decode(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.message(), "already open");
    assert_eq!(payload.details(), Some(&details));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = DomainError::invalid_request("bad").with_details(json!({"field": "type"}));

    let (status, header, payload) = decode(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn actix_errors_become_internal() {
    let actix_err = actix_web::error::ErrorBadGateway("upstream");
    let err = DomainError::from(actix_err);
    assert_eq!(err.code(), ErrorCode::InternalError);
}
