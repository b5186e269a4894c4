use chrono::{DateTime, Utc};
use serde::Serialize;

/// A freshly issued session token, handed to the client after sign-in
#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
