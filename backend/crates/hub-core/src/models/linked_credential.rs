//! Provider access credential held on behalf of an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access credential returned by an identity provider, joined to its
/// account by `account_id`. One row per `(account_id, provider)`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCredential {
    pub id: Uuid,
    pub account_id: Uuid,
    /// Provider name, e.g. "google"
    pub provider: String,
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkedCredential {
    pub fn new(account_id: Uuid, provider: String, access_token: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            provider,
            access_token,
            token_type: None,
            scope: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Credentials without an expiry never report as expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl std::fmt::Debug for LinkedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedCredential")
            .field("id", &self.id)
            .field("account_id", &self.account_id)
            .field("provider", &self.provider)
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
