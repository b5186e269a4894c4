use crate::{AppState, callback, health, login, logout, profile};

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Provider callback path, as registered with Google
pub const CALLBACK_PATH: &str = "/auth/login/google/authorized";

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Sign-in
        .route("/auth/login", get(login))
        .route(CALLBACK_PATH, get(callback))
        .route("/auth/logout", get(logout))
        .route("/auth/profile", get(profile))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
