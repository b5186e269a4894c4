use crate::ApiError;
use crate::api::error::{MISSING_EMAIL_NOTICE, PERSISTENCE_NOTICE, SIGN_IN_FAILED_NOTICE};

use hub_auth::{AuthError, ReconcileError};

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_sign_in_failed_returns_401_with_notice_only() {
    let error = ApiError::sign_in_failed(SIGN_IN_FAILED_NOTICE, "token endpoint said 400: secret");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "SIGN_IN_FAILED");
    assert_eq!(json["error"]["message"], SIGN_IN_FAILED_NOTICE);
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "Account not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Account not found");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Database operation failed".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_missing_header_becomes_unauthorized() {
    let error = ApiError::from(AuthError::MissingHeader {
        location: ErrorLocation::from(Location::caller()),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["error"]["message"], "Authentication required");
}

#[test]
fn test_expired_session_message() {
    let error = ApiError::from(AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    });

    assert!(matches!(
        error,
        ApiError::Unauthorized { ref message, .. } if message == "Session expired"
    ));
}

#[test]
fn test_handshake_failures_become_sign_in_failed() {
    let errors = [
        AuthError::InvalidState {
            message: "bad signature".into(),
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::ProviderDenied {
            error: "access_denied".into(),
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::MissingCode {
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::MalformedIdentity {
            message: "missing sub".into(),
            location: ErrorLocation::from(Location::caller()),
        },
    ];

    for e in errors {
        let error = ApiError::from(e);
        assert!(matches!(
            error,
            ApiError::SignInFailed { notice: SIGN_IN_FAILED_NOTICE, .. }
        ));
    }
}

#[test]
fn test_reconcile_errors_map_to_their_notices() {
    let missing_email = ApiError::from(ReconcileError::MissingEmail {
        location: ErrorLocation::from(Location::caller()),
    });
    let persistence = ApiError::from(ReconcileError::persistence(std::io::Error::other(
        "database is locked",
    )));

    assert!(matches!(
        missing_email,
        ApiError::SignInFailed { notice: MISSING_EMAIL_NOTICE, .. }
    ));
    assert!(matches!(
        persistence,
        ApiError::SignInFailed { notice: PERSISTENCE_NOTICE, .. }
    ));
    assert_eq!(persistence.status(), StatusCode::UNAUTHORIZED);
}
