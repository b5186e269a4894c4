use crate::error::Result as ServerErrorResult;

use hub_auth::{
    AccountReconciler, GoogleIdentityProvider, IdentityProvider, ProviderSettings, SessionIssuer,
    SessionValidator, StateTokens,
};
use hub_config::Config;
use hub_db::SqliteAccountStore;

use std::sync::Arc;

use log::info;
use sqlx::SqlitePool;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub reconciler: Arc<AccountReconciler<SqliteAccountStore>>,
    pub provider: Arc<dyn IdentityProvider>,
    pub session_issuer: Arc<SessionIssuer>,
    pub session_validator: Arc<SessionValidator>,
    pub state_tokens: Arc<StateTokens>,
}

impl AppState {
    /// Wire the sign-in components around `pool` and `provider`.
    /// Session and OAuth state tokens share `secret`; their audiences differ.
    pub fn new(
        pool: SqlitePool,
        provider: Arc<dyn IdentityProvider>,
        secret: &[u8],
        session_ttl_secs: i64,
        state_ttl_secs: i64,
    ) -> Self {
        Self {
            reconciler: Arc::new(AccountReconciler::new(SqliteAccountStore::new(pool.clone()))),
            provider,
            session_issuer: Arc::new(SessionIssuer::with_hs256(secret, session_ttl_secs)),
            session_validator: Arc::new(SessionValidator::with_hs256(secret)),
            state_tokens: Arc::new(StateTokens::with_hs256(secret, state_ttl_secs)),
            pool,
        }
    }

    /// Build state for the Google provider described by `config`
    pub fn from_config(pool: SqlitePool, config: &Config) -> ServerErrorResult<Self> {
        let provider = GoogleIdentityProvider::new(provider_settings(config))?;
        info!("Identity provider: {}", provider.name());

        Ok(Self::new(
            pool,
            Arc::new(provider),
            config.auth.session_secret().as_bytes(),
            config.auth.session_ttl_secs,
            config.auth.state_ttl_secs,
        ))
    }
}

fn provider_settings(config: &Config) -> ProviderSettings {
    let oauth = &config.oauth;
    ProviderSettings {
        client_id: oauth.client_id.clone().unwrap_or_default(),
        client_secret: oauth.client_secret.clone().unwrap_or_default(),
        redirect_url: config.redirect_url(),
        authorize_url: oauth.authorize_url.clone(),
        token_url: oauth.token_url.clone(),
        userinfo_url: oauth.userinfo_url.clone(),
        scopes: oauth.scopes.clone(),
        request_timeout_secs: oauth.request_timeout_secs,
    }
}
