use serde::Deserialize;

/// Query string the provider redirects back with
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user or provider refused
    pub error: Option<String>,
    pub error_description: Option<String>,
}
