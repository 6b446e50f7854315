//! playrush-gateway server entry point.
//!
//! Loads configuration, opens the score store, and serves the REST API.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use playrush_gateway::api;
use playrush_gateway::app_state::AppState;
use playrush_gateway::config::{GatewayConfig, LogFormat, StoreBackend};
use playrush_gateway::error::GatewayError;
use playrush_gateway::identity::{IdentityVerifier, SignedTokenVerifier};
use playrush_gateway::store::{MemoryStore, PostgresStore, StoreHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, backend = ?config.store_backend, "starting playrush-gateway");

    // Build store and identity
    let store = build_store(&config).await;
    let identity: Arc<dyn IdentityVerifier> = match &config.auth_token_secret {
        Some(secret) => Arc::new(SignedTokenVerifier::new(secret.clone())),
        None => {
            tracing::warn!("AUTH_TOKEN_SECRET not set; using a random key, tokens will not survive a restart");
            Arc::new(SignedTokenVerifier::random())
        }
    };
    if config.admin_api_key.is_none() {
        tracing::info!("ADMIN_API_KEY not set; game registration is disabled");
    }

    // Build application
    let listen_addr = config.listen_addr;
    let app = api::build_app(AppState::new(store, identity, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Opens the configured store. A PostgreSQL store that cannot be reached
/// leaves the handle empty; the server still starts and store-backed
/// endpoints answer `Database service not available`.
async fn build_store(config: &GatewayConfig) -> StoreHandle {
    match config.store_backend {
        StoreBackend::Memory => StoreHandle::new(Arc::new(MemoryStore::new())),
        StoreBackend::Postgres => match open_postgres(config).await {
            Ok(store) => StoreHandle::new(Arc::new(store)),
            Err(e) => {
                tracing::error!(error = %e, "database unavailable; continuing without a store");
                StoreHandle::unavailable()
            }
        },
    }
}

async fn open_postgres(config: &GatewayConfig) -> Result<PostgresStore, GatewayError> {
    let store = PostgresStore::connect(config).await?;
    if config.database_run_migrations {
        store.run_migrations().await?;
        tracing::info!("database migrations applied");
    }
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
