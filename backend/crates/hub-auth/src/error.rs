use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid OAuth state: {message} {location}")]
    InvalidState {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider returned an error: {error} {location}")]
    ProviderDenied {
        error: String,
        location: ErrorLocation,
    },

    #[error("Authorization code missing from callback {location}")]
    MissingCode { location: ErrorLocation },

    #[error("Identity provider request failed: {source} {location}")]
    ProviderRequest {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Identity provider responded with {status}: {message} {location}")]
    ProviderResponse {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed identity document: {message} {location}")]
    MalformedIdentity {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider misconfigured: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::ProviderDenied { .. } => "PROVIDER_DENIED",
            Self::MissingCode { .. } => "MISSING_CODE",
            Self::ProviderRequest { .. } => "PROVIDER_REQUEST_FAILED",
            Self::ProviderResponse { .. } => "PROVIDER_RESPONSE_ERROR",
            Self::MalformedIdentity { .. } => "MALFORMED_IDENTITY",
            Self::Configuration { .. } => "PROVIDER_CONFIGURATION",
        }
    }

    /// Failures of the provider handshake itself, as opposed to session
    /// token problems. None of these may reach the reconciler.
    pub fn is_handshake_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidState { .. }
                | Self::ProviderDenied { .. }
                | Self::MissingCode { .. }
                | Self::ProviderRequest { .. }
                | Self::ProviderResponse { .. }
                | Self::MalformedIdentity { .. }
                | Self::Configuration { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
