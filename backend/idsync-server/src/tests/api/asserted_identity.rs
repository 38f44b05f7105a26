use crate::AssertedIdentity;

use idsync_engine::IdentityAssertion;

use axum::{body::Body, http::Request};

#[test]
fn test_headers_with_both_values_yield_assertion() {
    let request = Request::builder()
        .header("X-Identity-Id", "ext-1")
        .header("X-Identity-Email", "ada@example.com")
        .body(Body::empty())
        .unwrap();

    let assertion = AssertedIdentity::from_headers(request.headers());

    assert_eq!(
        assertion,
        Some(IdentityAssertion {
            external_id: "ext-1".to_string(),
            email: "ada@example.com".to_string(),
        })
    );
}

#[test]
fn test_header_names_are_case_insensitive() {
    let request = Request::builder()
        .header("x-identity-id", "ext-1")
        .header("x-identity-email", "ada@example.com")
        .body(Body::empty())
        .unwrap();

    assert!(AssertedIdentity::from_headers(request.headers()).is_some());
}

#[test]
fn test_missing_email_yields_nothing() {
    let request = Request::builder()
        .header("X-Identity-Id", "ext-1")
        .body(Body::empty())
        .unwrap();

    assert!(AssertedIdentity::from_headers(request.headers()).is_none());
}
