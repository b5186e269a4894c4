//! Axum extractors for session authentication

use crate::{ApiError, ApiResult, AppState};

use hub_auth::bearer_token;

use std::convert::Infallible;
use std::future::Future;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::{header::AUTHORIZATION, request::Parts};
use uuid::Uuid;

/// Account id of the caller, taken from an `Authorization: Bearer` session
/// token. Rejects with 401 when the token is missing or invalid.
///
/// As `Option<SessionAccount>` it never rejects; an invalid token reads as
/// signed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAccount(pub Uuid);

impl SessionAccount {
    fn resolve(parts: &Parts, state: &AppState) -> ApiResult<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = bearer_token(header)?;
        let claims = state.session_validator.validate(token)?;
        let account_id = claims.account_id()?;

        log::debug!("Session for account {}", account_id);
        Ok(SessionAccount(account_id))
    }
}

impl FromRequestParts<AppState> for SessionAccount {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move { Self::resolve(parts, state) }
    }
}

impl OptionalFromRequestParts<AppState> for SessionAccount {
    type Rejection = Infallible;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        async move { Ok(Self::resolve(parts, state).ok()) }
    }
}
