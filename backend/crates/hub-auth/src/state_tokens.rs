//! Signed values for the OAuth `state` parameter.
//!
//! The login redirect carries a short-lived HS256 token holding a random
//! nonce; the callback only proceeds when the token it gets back verifies.
//! Nothing is kept server-side.
//!
//! A state is not bound to the browser that started the login and is not
//! consumed on use: any issued state verifies until it expires.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

const STATE_AUDIENCE: &str = "hub-oauth-state";
const NONCE_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateClaims {
    pub nonce: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

pub struct StateTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl StateTokens {
    /// Ten minutes
    pub const DEFAULT_TTL_SECS: i64 = 10 * 60;

    pub fn with_hs256(secret: &[u8], ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_audience(&[STATE_AUDIENCE]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    #[track_caller]
    pub fn issue(&self) -> AuthErrorResult<String> {
        let now = Utc::now();
        let nonce: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();

        let claims = StateClaims {
            nonce,
            aud: STATE_AUDIENCE.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|source| {
            AuthError::JwtEncode {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Reject tampered, foreign, or expired state values
    #[track_caller]
    pub fn verify(&self, state: &str) -> AuthErrorResult<StateClaims> {
        let token_data = decode::<StateClaims>(state, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidState {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if token_data.claims.nonce.len() != NONCE_LEN {
            return Err(AuthError::InvalidState {
                message: "nonce has unexpected length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(token_data.claims)
    }
}
