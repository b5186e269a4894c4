use crate::{
    AuthError, IdentityProvider, ProviderSettings, ProviderToken, Result as AuthErrorResult,
};

use hub_core::ExternalIdentity;

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{debug, warn};
use reqwest::{Client, Response, Url};
use serde::Deserialize;

const PROVIDER_NAME: &str = "google";
const MAX_ERROR_BODY: usize = 200;

/// Google OAuth 2.0 / OpenID Connect client
pub struct GoogleIdentityProvider {
    client: Client,
    settings: ProviderSettings,
}

/// Fields of the userinfo document the sign-in flow cares about
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    #[serde(default)]
    sub: Option<SubjectValue>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Google sends `sub` as a string; other OpenID providers use numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubjectValue {
    Text(String),
    Number(serde_json::Number),
}

impl SubjectValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl GoogleIdentityProvider {
    #[track_caller]
    pub fn new(settings: ProviderSettings) -> AuthErrorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|source| AuthError::ProviderRequest {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    #[track_caller]
    fn request_failed(source: reqwest::Error) -> AuthError {
        AuthError::ProviderRequest {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Turn a non-success response into an error carrying a bounded body excerpt
    async fn ensure_success(response: Response, what: &str) -> AuthErrorResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(MAX_ERROR_BODY).collect();
        warn!("Google {what} request failed with {status}: {excerpt}");

        Err(AuthError::ProviderResponse {
            status: status.as_u16(),
            message: format!("{what} failed: {excerpt}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn authorize_url(&self, state: &str) -> AuthErrorResult<String> {
        let scope = self.settings.scopes.join(" ");
        let url = Url::parse_with_params(
            &self.settings.authorize_url,
            &[
                ("response_type", "code"),
                ("client_id", self.settings.client_id.as_str()),
                ("redirect_uri", self.settings.redirect_url.as_str()),
                ("scope", scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| AuthError::Configuration {
            message: format!("invalid authorize_url: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> AuthErrorResult<ProviderToken> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_url.as_str()),
        ];

        let response = self
            .client
            .post(&self.settings.token_url)
            .form(&params)
            .send()
            .await
            .map_err(Self::request_failed)?;

        let response = Self::ensure_success(response, "token exchange").await?;
        let token = response
            .json::<ProviderToken>()
            .await
            .map_err(|e| AuthError::MalformedIdentity {
                message: format!("token response: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!("Exchanged authorization code for a {PROVIDER_NAME} access token");
        Ok(token)
    }

    async fn fetch_identity(&self, token: &ProviderToken) -> AuthErrorResult<ExternalIdentity> {
        let response = self
            .client
            .get(&self.settings.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(Self::request_failed)?;

        let response = Self::ensure_success(response, "userinfo").await?;
        let info = response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AuthError::MalformedIdentity {
                message: format!("userinfo response: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let subject_id = info
            .sub
            .map(SubjectValue::into_string)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AuthError::MalformedIdentity {
                message: "userinfo has no 'sub'".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(ExternalIdentity {
            subject_id,
            email: info.email,
            display_name: info.name,
            avatar_url: info.picture,
        })
    }
}
