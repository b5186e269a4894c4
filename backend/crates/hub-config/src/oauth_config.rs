use crate::{
    CALLBACK_PATH, ConfigError, ConfigErrorResult, DEFAULT_AUTHORIZE_URL,
    DEFAULT_OAUTH_TIMEOUT_SECS, DEFAULT_TOKEN_URL, DEFAULT_USERINFO_URL, Environment, ServerConfig,
};

use log::warn;
use serde::Deserialize;

/// Google OAuth client registration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Defaults to the callback route on `server.host:server.port`
    pub redirect_url: Option<String>,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
    /// Permit plain-http provider endpoints (local mocks only)
    pub allow_insecure_transport: bool,
    pub request_timeout_secs: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_url: None,
            authorize_url: String::from(DEFAULT_AUTHORIZE_URL),
            token_url: String::from(DEFAULT_TOKEN_URL),
            userinfo_url: String::from(DEFAULT_USERINFO_URL),
            scopes: vec![
                String::from("openid"),
                String::from("https://www.googleapis.com/auth/userinfo.email"),
                String::from("https://www.googleapis.com/auth/userinfo.profile"),
            ],
            allow_insecure_transport: false,
            request_timeout_secs: DEFAULT_OAUTH_TIMEOUT_SECS,
        }
    }
}

impl OAuthConfig {
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.client_id) && present(&self.client_secret)
    }

    pub fn redirect_url(&self, server: &ServerConfig) -> String {
        match self.redirect_url {
            Some(ref url) => url.clone(),
            None => format!("http://{}:{}{}", server.host, server.port, CALLBACK_PATH),
        }
    }

    pub fn validate(&self, environment: Environment, server: &ServerConfig) -> ConfigErrorResult<()> {
        if environment.is_production() {
            if !self.is_configured() {
                return Err(ConfigError::oauth(
                    "oauth.client_id and oauth.client_secret must be set in production",
                ));
            }
            if self.allow_insecure_transport {
                return Err(ConfigError::oauth(
                    "oauth.allow_insecure_transport is not allowed in production",
                ));
            }
            if !self
                .redirect_url
                .as_deref()
                .is_some_and(|url| url.starts_with("https://"))
            {
                return Err(ConfigError::oauth(
                    "oauth.redirect_url must be set to an https URL in production",
                ));
            }
        } else if !self.is_configured() {
            warn!("oauth.client_id/client_secret not set, Google sign-in will fail");
        }

        let redirect_url = self.redirect_url(server);
        for (name, url) in [
            ("redirect_url", redirect_url.as_str()),
            ("authorize_url", self.authorize_url.as_str()),
            ("token_url", self.token_url.as_str()),
            ("userinfo_url", self.userinfo_url.as_str()),
        ] {
            self.check_transport(name, url)?;
        }

        if self.scopes.is_empty() {
            return Err(ConfigError::oauth("oauth.scopes cannot be empty"));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::oauth("oauth.request_timeout_secs must be > 0"));
        }

        Ok(())
    }

    /// https always; plain http only on loopback or when explicitly allowed
    fn check_transport(&self, name: &str, url: &str) -> ConfigErrorResult<()> {
        if url.starts_with("https://") {
            return Ok(());
        }

        if let Some(rest) = url.strip_prefix("http://") {
            if self.allow_insecure_transport || is_loopback(rest) {
                return Ok(());
            }
            return Err(ConfigError::oauth(format!(
                "oauth.{name} must use https (set OAUTHLIB_INSECURE_TRANSPORT=1 for local testing), got '{url}'"
            )));
        }

        Err(ConfigError::oauth(format!(
            "oauth.{name} must be an http(s) URL, got '{url}'"
        )))
    }
}

fn is_loopback(authority_and_path: &str) -> bool {
    let authority = authority_and_path
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = match authority.strip_prefix('[') {
        Some(v6) => v6.split(']').next().unwrap_or_default(),
        None => authority.split(':').next().unwrap_or_default(),
    };
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}
