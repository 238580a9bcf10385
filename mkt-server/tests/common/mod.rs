#![allow(dead_code)]

//! Test infrastructure for mkt-server API tests

use mkt_auth::{AuthError, Claims, IdentityProvider, SessionVerifier};
use mkt_core::{ExternalIdentity, UserSync};
use mkt_db::UserRepository;
use mkt_server::AppState;

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    // In-memory needs a single connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/mkt-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Canned identity provider: hands out a fixed identity, or fails every
/// exchange when constructed with `failing()`
pub struct StaticProvider {
    identity: Option<ExternalIdentity>,
}

impl StaticProvider {
    pub fn returning(identity: ExternalIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn failing() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticProvider {
    async fn exchange_code(&self, _code: &str) -> mkt_auth::Result<ExternalIdentity> {
        self.identity
            .clone()
            .ok_or_else(|| AuthError::exchange("invalid code"))
    }
}

/// Create AppState for testing
pub async fn create_test_state(
    provider: Arc<dyn IdentityProvider>,
    webhook_secret: Option<&str>,
) -> AppState {
    let pool = create_test_pool().await;
    let store = Arc::new(UserRepository::new(pool.clone()));

    AppState {
        pool,
        sync: Arc::new(UserSync::new(store)),
        verifier: Arc::new(SessionVerifier::with_hs256(TEST_JWT_SECRET)),
        provider,
        webhook_secret: webhook_secret.map(str::to_string),
        error_redirect: "/login?error=auth_failed".to_string(),
        post_login_redirect: "/".to_string(),
    }
}

pub fn test_identity(id: &str, email: Option<&str>) -> ExternalIdentity {
    ExternalIdentity {
        id: id.to_string(),
        email: email.map(str::to_string),
        metadata: serde_json::Map::new(),
    }
}

/// Mint a valid access token for the test verifier
pub fn mint_token(sub: &str, email: Option<&str>) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        exp: now + 3600,
        iat: now,
        user_metadata: serde_json::Map::new(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .expect("Failed to mint test token")
}

pub async fn count_users(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}
