use crate::api::callback::callback::auth_callback;
use crate::api::sync_user::sync_user::sync_user;
use crate::api::webhook::webhook::{receive_event, verify_endpoint};
use crate::health;
use crate::state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Session-sync endpoint (authenticated client action)
        .route("/api/auth/sync-user", post(sync_user))
        // Provider webhook: GET for verification, POST for events
        .route(
            "/api/webhooks/identity",
            get(verify_endpoint).post(receive_event),
        )
        // OAuth/email-link callback
        .route("/auth/callback", get(auth_callback))
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
