use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, DatabaseConfig, Environment, LoggingConfig, OAuthConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub oauth: OAuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for HUB_CONFIG_DIR env var, else use ./.hub/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply environment variable overrides (conventional names such as
    ///    SECRET_KEY first, then HUB_*)
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: HUB_CONFIG_DIR env var > ./.hub/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(self.environment)?;
        self.oauth.validate(self.environment, &self.server)?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get absolute path to the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let config_dir = Self::config_dir()?;
                Ok(Some(config_dir.join(&self.logging.dir).join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// OAuth callback URL registered with the provider
    pub fn redirect_url(&self) -> String {
        self.oauth.redirect_url(&self.server)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded ({}):", self.environment);
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );

        info!(
            "  auth: session ttl={}s, state ttl={}s, secret={}",
            self.auth.session_ttl_secs,
            self.auth.state_ttl_secs,
            if self.auth.uses_development_secret() {
                "development default"
            } else {
                "configured"
            }
        );

        info!(
            "  oauth: client {}, redirect={}, insecure transport={}",
            if self.oauth.is_configured() {
                "configured"
            } else {
                "missing"
            },
            self.redirect_url(),
            self.oauth.allow_insecure_transport
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Environment
        Self::apply_env_parse("HUB_ENV", &mut self.environment);

        // Server
        Self::apply_env_string("HUB_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("HUB_SERVER_PORT", &mut self.server.port);

        // Database
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.path = DatabaseConfig::path_from_url(&url);
        }
        Self::apply_env_string("HUB_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "HUB_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("SECRET_KEY", &mut self.auth.session_secret);
        Self::apply_env_option_string("HUB_AUTH_SESSION_SECRET", &mut self.auth.session_secret);
        Self::apply_env_parse("HUB_AUTH_SESSION_TTL_SECS", &mut self.auth.session_ttl_secs);
        Self::apply_env_parse("HUB_AUTH_STATE_TTL_SECS", &mut self.auth.state_ttl_secs);

        // OAuth
        Self::apply_env_option_string("GOOGLE_OAUTH_CLIENT_ID", &mut self.oauth.client_id);
        Self::apply_env_option_string("HUB_OAUTH_CLIENT_ID", &mut self.oauth.client_id);
        Self::apply_env_option_string("GOOGLE_OAUTH_CLIENT_SECRET", &mut self.oauth.client_secret);
        Self::apply_env_option_string("HUB_OAUTH_CLIENT_SECRET", &mut self.oauth.client_secret);
        Self::apply_env_option_string("HUB_OAUTH_REDIRECT_URL", &mut self.oauth.redirect_url);
        Self::apply_env_string("HUB_OAUTH_AUTHORIZE_URL", &mut self.oauth.authorize_url);
        Self::apply_env_string("HUB_OAUTH_TOKEN_URL", &mut self.oauth.token_url);
        Self::apply_env_string("HUB_OAUTH_USERINFO_URL", &mut self.oauth.userinfo_url);
        Self::apply_env_bool(
            "OAUTHLIB_INSECURE_TRANSPORT",
            &mut self.oauth.allow_insecure_transport,
        );
        Self::apply_env_bool(
            "HUB_OAUTH_ALLOW_INSECURE_TRANSPORT",
            &mut self.oauth.allow_insecure_transport,
        );
        Self::apply_env_parse(
            "HUB_OAUTH_REQUEST_TIMEOUT_SECS",
            &mut self.oauth.request_timeout_secs,
        );

        // Logging
        Self::apply_env_parse("HUB_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("HUB_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("HUB_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
