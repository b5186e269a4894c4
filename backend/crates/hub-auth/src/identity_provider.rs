use crate::{ProviderToken, Result as AuthErrorResult};

use hub_core::ExternalIdentity;

use async_trait::async_trait;

/// Third-party sign-in handshake, as seen by the web layer
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short provider name stored with linked credentials, e.g. "google"
    fn name(&self) -> &str;

    /// URL to send the browser to, carrying `state`
    fn authorize_url(&self, state: &str) -> AuthErrorResult<String>;

    /// Trade the callback's authorization code for an access token
    async fn exchange_code(&self, code: &str) -> AuthErrorResult<ProviderToken>;

    /// Fetch the user's identity with an access token
    async fn fetch_identity(&self, token: &ProviderToken) -> AuthErrorResult<ExternalIdentity>;
}
