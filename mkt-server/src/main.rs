use mkt_auth::{HttpIdentityProvider, SessionVerifier};
use mkt_core::UserSync;
use mkt_db::UserRepository;
use mkt_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = mkt_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, config.logging.colored)?;

    info!("Starting mkt-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    if config.webhook.is_open() {
        warn!("Webhook authentication DISABLED - no shared secret configured");
    }

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/mkt-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    let Some(ref jwt_secret) = config.auth.jwt_secret else {
        unreachable!("validate() ensures auth.jwt_secret is set")
    };
    let Some(ref provider_url) = config.auth.provider_url else {
        unreachable!("validate() ensures auth.provider_url is set")
    };

    // Build application state
    let store = Arc::new(UserRepository::new(pool.clone()));
    let state = AppState {
        pool,
        sync: Arc::new(UserSync::new(store)),
        verifier: Arc::new(SessionVerifier::with_hs256(jwt_secret.as_bytes())),
        provider: Arc::new(HttpIdentityProvider::new(provider_url)),
        webhook_secret: config.webhook.secret.clone(),
        error_redirect: config.auth.error_redirect.clone(),
        post_login_redirect: config.auth.post_login_redirect.clone(),
    };

    // Build router
    let app = build_router(state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Start server with graceful shutdown on Ctrl+C
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Shutdown complete");

    Ok(())
}
