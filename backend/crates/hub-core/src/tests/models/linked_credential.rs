use crate::LinkedCredential;

use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn test_credential_without_expiry_is_not_expired() {
    let credential = LinkedCredential::new(Uuid::new_v4(), "google".into(), "tok".into());

    assert!(!credential.is_expired(Utc::now()));
}

#[test]
fn test_credential_past_expiry_is_expired() {
    let mut credential = LinkedCredential::new(Uuid::new_v4(), "google".into(), "tok".into());
    credential.expires_at = Some(Utc::now() - Duration::minutes(1));

    assert!(credential.is_expired(Utc::now()));
}

#[test]
fn test_debug_output_redacts_access_token() {
    let credential =
        LinkedCredential::new(Uuid::new_v4(), "google".into(), "ya29.secret-token".into());

    let debug = format!("{:?}", credential);

    assert!(!debug.contains("ya29.secret-token"));
    assert!(debug.contains("<redacted>"));
}
