//! Tests for domain error construction and trace capture.

use super::*;
use rstest::rstest;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::validation("bad"), ErrorCode::ValidationFailed)]
#[case(Error::store_unavailable("down"), ErrorCode::StoreUnavailable)]
#[case(Error::store_failure("broken"), ErrorCode::StoreFailure)]
fn constructors_set_code(#[case] err: Error, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::ValidationFailed, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn trace_id_is_none_out_of_scope() {
    assert!(Error::store_failure("boom").trace_id().is_none());
}

#[tokio::test]
async fn trace_id_is_captured_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let err = TraceId::scope(trace_id, async { Error::validation("bad") }).await;
    assert_eq!(err.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn builders_attach_details_and_trace_id() {
    let err = Error::validation("bad")
        .with_trace_id("abc")
        .with_details(json!([{ "field": "age" }]));
    assert_eq!(err.trace_id(), Some("abc"));
    assert_eq!(err.details(), Some(&json!([{ "field": "age" }])));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::store_unavailable("store offline").to_string(), "store offline");
}

#[rstest]
fn codes_serialise_as_snake_case() {
    let value = serde_json::to_value(ErrorCode::StoreUnavailable).expect("serialise code");
    assert_eq!(value, json!("store_unavailable"));
}
