use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME, DEFAULT_DATABASE_MAX_CONNECTIONS,
    MAX_DATABASE_MAX_CONNECTIONS, MIN_DATABASE_MAX_CONNECTIONS,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, relative to the config directory
    pub path: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_DATABASE_FILENAME),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Accept a `DATABASE_URL` such as `sqlite:///dev.db`.
    ///
    /// Three slashes mean a relative path; anything that is not a sqlite URL
    /// is kept verbatim so validation can reject it.
    pub fn path_from_url(url: &str) -> String {
        let url = url.trim();
        ["sqlite:///", "sqlite://", "sqlite:"]
            .iter()
            .find_map(|prefix| url.strip_prefix(prefix))
            .unwrap_or(url)
            .to_string()
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.path.contains("://") {
            return Err(ConfigError::database(format!(
                "only SQLite databases are supported, got '{}'",
                self.path
            )));
        }

        // Validate database path doesn't escape config dir
        if self.path.trim().is_empty()
            || Path::new(&self.path).is_absolute()
            || self.path.contains("..")
        {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        if self.max_connections < MIN_DATABASE_MAX_CONNECTIONS
            || self.max_connections > MAX_DATABASE_MAX_CONNECTIONS
        {
            return Err(ConfigError::database(format!(
                "database.max_connections must be {}-{}, got {}",
                MIN_DATABASE_MAX_CONNECTIONS, MAX_DATABASE_MAX_CONNECTIONS, self.max_connections
            )));
        }

        Ok(())
    }
}
