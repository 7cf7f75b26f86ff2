use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use metasearch_metadata::credential::{CredentialStore, RefreshSchedule, run_refresher};
use metasearch_metadata::gateway::Gateway;
use metasearch_metadata::tmdb::TmdbClient;
use metasearch_metadata::tvdb::TvdbClient;
use metasearch_server::config::Config;
use metasearch_server::state::AppState;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let http = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    let credentials = CredentialStore::new();
    let tvdb = Arc::new(TvdbClient::new(
        config.tvdb_api_key.clone(),
        credentials.clone(),
        http.clone(),
    ));
    let tmdb = Arc::new(TmdbClient::new(config.tmdb_api_access_token.clone(), http));

    // Keep the TVDB token fresh until shutdown
    let cancel = CancellationToken::new();
    let refresher = tokio::spawn(run_refresher(
        tvdb.clone(),
        credentials,
        RefreshSchedule::default(),
        cancel.clone(),
    ));

    let app_state = AppState::new(
        Gateway::new(tmdb, tvdb),
        config.addon_password.clone(),
        config.cache_ttl,
    );
    let app = metasearch_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");
    info!(url = %config.manifest_url(), "manifest URL");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    let _ = refresher.await;
    info!("server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}
