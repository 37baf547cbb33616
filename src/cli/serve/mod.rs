//! Serve command - runs the settings page

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::AppConfig;
use crate::domain::SchemaManager;
use crate::Storage;

/// Run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap();

    let storage = Storage::open(&config).await?;
    storage.schema_manager().create_tables().await?;

    let state = crate::create_app_state(&config, &storage)?;
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!(address = %addr, page = %config.admin.page_path, "Starting server");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
