//! Banking service - application entry point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the database pool and wait for PostgreSQL (bounded retries)
//! 3. Run database migrations
//! 4. Build the HTTP router
//! 5. Serve until Ctrl-C

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use banking_service::{
    AppState,
    config::Config,
    db,
    services::{AccountPolicy, AccountService},
    store::PgAccountStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(service = %config.service_name, "Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.db_max_connections)?;
    db::wait_for_db(
        &pool,
        config.db_connect_max_attempts,
        config.db_connect_retry_delay(),
    )
    .await?;

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let policy = AccountPolicy::try_from(&config)?;
    let store = Arc::new(PgAccountStore::new(pool));
    let accounts = AccountService::new(store, policy);
    let app = banking_service::router(AppState::new(accounts, config.service_name.as_str()));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
