use crate::tests::support::{TEST_SECRET, create_test_state};
use crate::{ApiError, AppState, SessionAccount};

use hub_auth::SessionIssuer;

use axum::body::Body;
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::Request;
use uuid::Uuid;

async fn extract(state: &AppState, authorization: Option<&str>) -> Result<SessionAccount, ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let (mut parts, _body) = builder.body(Body::empty()).unwrap().into_parts();

    <SessionAccount as FromRequestParts<AppState>>::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn test_extractor_with_valid_session() {
    let state = create_test_state().await;
    let account_id = Uuid::new_v4();
    let session = state.session_issuer.issue(account_id).unwrap();

    let result = extract(&state, Some(&format!("Bearer {}", session.token))).await;

    assert_eq!(result.unwrap(), SessionAccount(account_id));
}

#[tokio::test]
async fn test_extractor_without_header_is_unauthorized() {
    let state = create_test_state().await;

    let result = extract(&state, None).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_extractor_with_basic_scheme_is_unauthorized() {
    let state = create_test_state().await;

    let result = extract(&state, Some("Basic dXNlcjpwYXNz")).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_extractor_with_foreign_secret_is_unauthorized() {
    let state = create_test_state().await;
    let other = SessionIssuer::with_hs256(b"another-secret-key-also-32-bytes!", 3600);
    let session = other.issue(Uuid::new_v4()).unwrap();

    let result = extract(&state, Some(&format!("Bearer {}", session.token))).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_extractor_rejects_oauth_state_token() {
    let state = create_test_state().await;
    let state_token = state.state_tokens.issue().unwrap();

    let result = extract(&state, Some(&format!("Bearer {state_token}"))).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_optional_extractor_reads_invalid_token_as_signed_out() {
    let state = create_test_state().await;
    let (mut parts, _body) = Request::builder()
        .header("Authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap()
        .into_parts();

    let result =
        <SessionAccount as OptionalFromRequestParts<AppState>>::from_request_parts(&mut parts, &state)
            .await;

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn test_optional_extractor_with_valid_session() {
    let state = create_test_state().await;
    let issuer = SessionIssuer::with_hs256(TEST_SECRET, 60);
    let account_id = Uuid::new_v4();
    let token = issuer.issue(account_id).unwrap().token;
    let (mut parts, _body) = Request::builder()
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
        .into_parts();

    let result =
        <SessionAccount as OptionalFromRequestParts<AppState>>::from_request_parts(&mut parts, &state)
            .await;

    assert_eq!(result.unwrap(), Some(SessionAccount(account_id)));
}
