use crate::session_claims::SESSION_AUDIENCE;
use crate::{AuthError, Result as AuthErrorResult, SessionClaims, SessionToken};

use std::panic::Location;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

/// Signs session tokens for reconciled accounts
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    /// Seven days
    pub const DEFAULT_TTL_SECS: i64 = 7 * 24 * 60 * 60;

    /// Create issuer with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    #[track_caller]
    pub fn issue(&self, account_id: Uuid) -> AuthErrorResult<SessionToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = SessionClaims {
            sub: account_id.to_string(),
            aud: SESSION_AUDIENCE.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|source| AuthError::JwtEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(SessionToken { token, expires_at })
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
