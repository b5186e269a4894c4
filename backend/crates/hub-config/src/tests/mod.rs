
use std::env;

use tempfile::TempDir;

/// Every variable `Config::load()` reads, cleared so the host environment
/// cannot leak into a test
const OVERRIDE_VARS: &[&str] = &[
    "HUB_ENV",
    "HUB_SERVER_HOST",
    "HUB_SERVER_PORT",
    "DATABASE_URL",
    "HUB_DATABASE_PATH",
    "HUB_DATABASE_MAX_CONNECTIONS",
    "SECRET_KEY",
    "HUB_AUTH_SESSION_SECRET",
    "HUB_AUTH_SESSION_TTL_SECS",
    "HUB_AUTH_STATE_TTL_SECS",
    "GOOGLE_OAUTH_CLIENT_ID",
    "HUB_OAUTH_CLIENT_ID",
    "GOOGLE_OAUTH_CLIENT_SECRET",
    "HUB_OAUTH_CLIENT_SECRET",
    "HUB_OAUTH_REDIRECT_URL",
    "HUB_OAUTH_AUTHORIZE_URL",
    "HUB_OAUTH_TOKEN_URL",
    "HUB_OAUTH_USERINFO_URL",
    "OAUTHLIB_INSECURE_TRANSPORT",
    "HUB_OAUTH_ALLOW_INSECURE_TRANSPORT",
    "HUB_OAUTH_REQUEST_TIMEOUT_SECS",
    "HUB_LOG_LEVEL",
    "HUB_LOG_COLORED",
    "HUB_LOG_FILE",
];

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory, point HUB_CONFIG_DIR at it and clear
/// all other overrides
pub(crate) fn setup_config_dir() -> (TempDir, Vec<EnvGuard>) {
    let temp = TempDir::new().unwrap();
    let mut guards: Vec<EnvGuard> = OVERRIDE_VARS.iter().map(|&k| EnvGuard::remove(k)).collect();
    guards.push(EnvGuard::set(
        "HUB_CONFIG_DIR",
        temp.path().to_str().unwrap(),
    ));
    (temp, guards)
}

pub(crate) fn write_config(temp: &TempDir, contents: &str) {
    std::fs::write(temp.path().join("config.toml"), contents).unwrap();
}

pub(crate) const VALID_SECRET: &str = "12345678901234567890123456789012";
