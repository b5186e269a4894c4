use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_SESSION_TTL_SECS, DEFAULT_STATE_TTL_SECS,
    DEVELOPMENT_SESSION_SECRET, Environment, MIN_SECRET_LENGTH,
};

use log::warn;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret for session and OAuth state tokens
    pub session_secret: Option<String>,
    pub session_ttl_secs: i64,
    pub state_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            state_ttl_secs: DEFAULT_STATE_TTL_SECS,
        }
    }
}

impl AuthConfig {
    /// The configured secret, or the development fallback
    pub fn session_secret(&self) -> &str {
        self.session_secret
            .as_deref()
            .unwrap_or(DEVELOPMENT_SESSION_SECRET)
    }

    pub fn uses_development_secret(&self) -> bool {
        self.session_secret() == DEVELOPMENT_SESSION_SECRET
    }

    pub fn validate(&self, environment: Environment) -> ConfigErrorResult<()> {
        if let Some(ref secret) = self.session_secret
            && secret.len() < MIN_SECRET_LENGTH
        {
            return Err(ConfigError::auth(format!(
                "auth.session_secret must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }

        if self.uses_development_secret() {
            if environment.is_production() {
                return Err(ConfigError::auth(
                    "auth.session_secret (or SECRET_KEY) must be set in production",
                ));
            }
            warn!("auth.session_secret not set, using the development-only secret");
        }

        if self.session_ttl_secs <= 0 {
            return Err(ConfigError::auth(format!(
                "auth.session_ttl_secs must be positive, got {}",
                self.session_ttl_secs
            )));
        }

        if self.state_ttl_secs <= 0 {
            return Err(ConfigError::auth(format!(
                "auth.state_ttl_secs must be positive, got {}",
                self.state_ttl_secs
            )));
        }

        Ok(())
    }
}
