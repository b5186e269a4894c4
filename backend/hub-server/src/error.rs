use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] hub_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] hub_db::DbError),

    #[error("Identity provider setup failed: {0}")]
    Provider(#[from] hub_auth::AuthError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
