use mkt_auth::{IdentityProvider, SessionVerifier};
use mkt_core::UserSync;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sync: Arc<UserSync>,
    pub verifier: Arc<SessionVerifier>,
    pub provider: Arc<dyn IdentityProvider>,
    /// Shared secret for webhook deliveries; None leaves the endpoint open
    pub webhook_secret: Option<String>,
    /// Callback redirect target when code exchange fails
    pub error_redirect: String,
    /// Callback redirect target when no `next` is supplied
    pub post_login_redirect: String,
}
