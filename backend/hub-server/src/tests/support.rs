use crate::AppState;

use hub_auth::{AuthError, IdentityProvider, ProviderToken, Result as AuthErrorResult};
use hub_core::ExternalIdentity;

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use error_location::ErrorLocation;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// Provider that never completes a handshake
pub(crate) struct UnreachableProvider;

#[async_trait]
impl IdentityProvider for UnreachableProvider {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn authorize_url(&self, state: &str) -> AuthErrorResult<String> {
        Ok(format!("https://provider.test/authorize?state={state}"))
    }

    async fn exchange_code(&self, _code: &str) -> AuthErrorResult<ProviderToken> {
        Err(AuthError::ProviderResponse {
            status: 503,
            message: "unreachable".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn fetch_identity(&self, _token: &ProviderToken) -> AuthErrorResult<ExternalIdentity> {
        Err(AuthError::ProviderResponse {
            status: 503,
            message: "unreachable".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

async fn create_test_pool() -> SqlitePool {
    // One connection keeps the in-memory database alive and shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test pool");

    hub_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub(crate) async fn create_test_state() -> AppState {
    AppState::new(
        create_test_pool().await,
        Arc::new(UnreachableProvider),
        TEST_SECRET,
        3600,
        600,
    )
}
