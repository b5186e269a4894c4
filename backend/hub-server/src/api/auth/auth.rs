//! Sign-in REST API handlers
//!
//! The login route sends the browser to the identity provider with a signed
//! `state`. The provider redirects back to the callback route, which runs
//! the handshake, reconciles the identity to a local account, and hands out
//! a session token. Any failure before reconciliation leaves the account
//! store untouched.

use crate::{
    AccountDto, ApiError, ApiResult, AppState, CallbackQuery, NoticeResponse, ProfileResponse,
    SessionAccount, SignInResponse,
};

use hub_auth::{AuthError, ProviderToken};
use hub_core::ExternalIdentity;
use hub_db::{AccountRepository, LinkedCredentialRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use error_location::ErrorLocation;
use log::{debug, info, warn};

pub const ALREADY_LOGGED_IN_NOTICE: &str = "You are already logged in.";
pub const LOGGED_IN_NOTICE: &str = "Successfully logged in with Google!";
pub const LOGGED_OUT_NOTICE: &str = "You have been logged out.";

// =============================================================================
// Handlers
// =============================================================================

/// GET /auth/login
///
/// Redirect (303) to the provider, unless the request already carries a
/// valid session
pub async fn login(
    State(state): State<AppState>,
    session: Option<SessionAccount>,
) -> ApiResult<Response> {
    if let Some(SessionAccount(account_id)) = session {
        debug!("Login requested by signed-in account {}", account_id);
        return Ok(Json(NoticeResponse::new(ALREADY_LOGGED_IN_NOTICE)).into_response());
    }

    let state_token = state.state_tokens.issue()?;
    let url = state.provider.authorize_url(&state_token)?;

    Ok(Redirect::to(&url).into_response())
}

/// GET /auth/login/google/authorized
///
/// OAuth callback. Responds with a session token for the reconciled account,
/// or 401 `SIGN_IN_FAILED`.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<Json<SignInResponse>> {
    let (token, identity) = handshake(&state, query).await?;

    let outcome = state.reconciler.reconcile_with_retry(&identity).await?;
    let account = outcome.account;

    // The account is already committed; storing the credential is best-effort
    let credential = token.to_credential(account.id, state.provider.name());
    if let Err(e) = LinkedCredentialRepository::new(state.pool.clone())
        .upsert(&credential)
        .await
    {
        warn!(
            "Failed to store {} credential for account {}: {}",
            credential.provider, account.id, e
        );
    }

    let session = state.session_issuer.issue(account.id)?;

    info!(
        "Account {} signed in with {} ({})",
        account.id,
        state.provider.name(),
        outcome.action
    );

    Ok(Json(SignInResponse {
        notice: LOGGED_IN_NOTICE.to_string(),
        token: session.token,
        expires_at: session.expires_at.timestamp(),
        action: outcome.action,
        account: account.into(),
    }))
}

/// GET /auth/logout
///
/// Sessions are stateless; the client drops its token
pub async fn logout(SessionAccount(account_id): SessionAccount) -> Json<NoticeResponse> {
    info!("Account {} logged out", account_id);
    Json(NoticeResponse::new(LOGGED_OUT_NOTICE))
}

/// GET /auth/profile
pub async fn profile(
    State(state): State<AppState>,
    SessionAccount(account_id): SessionAccount,
) -> ApiResult<Json<ProfileResponse>> {
    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Account {} not found", account_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(ProfileResponse {
        account: AccountDto::from(account),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

/// Everything that has to succeed before the reconciler may run
async fn handshake(
    state: &AppState,
    query: CallbackQuery,
) -> Result<(ProviderToken, ExternalIdentity), AuthError> {
    if let Some(error) = query.error {
        warn!(
            "OAuth error from {}! error={} description={}",
            state.provider.name(),
            error,
            query.error_description.as_deref().unwrap_or("none")
        );
        return Err(AuthError::ProviderDenied {
            error,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    state
        .state_tokens
        .verify(query.state.as_deref().unwrap_or_default())?;

    let code = query
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AuthError::MissingCode {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let token = state.provider.exchange_code(&code).await?;
    let identity = state.provider.fetch_identity(&token).await?;

    Ok((token, identity))
}
