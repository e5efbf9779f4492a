// Engine main entry point
use std::sync::Arc;

use anyhow::Context;
use engine::config::EngineSettings;
use engine::services::{router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting crypto charts engine...");

    let settings = EngineSettings::from_env().context("invalid engine settings")?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = Arc::new(AppState::new(settings).context("failed to build application state")?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
