use hub_core::LinkedCredential;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Token endpoint response of the authorization-code exchange
#[derive(Clone, Deserialize)]
pub struct ProviderToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl ProviderToken {
    /// Absolute expiry, or `None` when the lifetime is absent or out of range
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.expires_in
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
    }

    /// Credential row to keep alongside the reconciled account
    pub fn to_credential(&self, account_id: Uuid, provider: &str) -> LinkedCredential {
        let mut credential =
            LinkedCredential::new(account_id, provider.to_string(), self.access_token.clone());
        credential.token_type = self.token_type.clone();
        credential.scope = self.scope.clone();
        credential.expires_at = self.expires_at(credential.created_at);
        credential
    }
}

impl std::fmt::Debug for ProviderToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
