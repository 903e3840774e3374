use anyhow::Context;

use crate::config;
use crate::handlers;

pub async fn handle() -> anyhow::Result<()> {
    run_server().await
}

/// Bind and serve the API. Shared with the server binary.
pub async fn run_server() -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting DealDesk API in {:?} mode", config.environment);

    let app = handlers::app();

    // Tests and deployments may override the configured port via env
    let port = std::env::var("DEALDESK_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🚀 DealDesk API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server stopped")?;

    Ok(())
}
