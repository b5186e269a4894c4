/// OAuth client registration and provider endpoints
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    /// Where the provider sends the browser back with `code` and `state`
    pub redirect_url: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
    pub request_timeout_secs: u64,
}

impl ProviderSettings {
    pub const GOOGLE_AUTHORIZE_URL: &'static str = "https://accounts.google.com/o/oauth2/v2/auth";
    pub const GOOGLE_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";
    pub const GOOGLE_USERINFO_URL: &'static str = "https://www.googleapis.com/oauth2/v3/userinfo";

    pub fn google_scopes() -> Vec<String> {
        vec![
            "openid".to_string(),
            "https://www.googleapis.com/auth/userinfo.email".to_string(),
            "https://www.googleapis.com/auth/userinfo.profile".to_string(),
        ]
    }
}
