use std::sync::Arc;

use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use crate::routers::{AppState, build_router};
use crate::secrets::Secrets;
mod controllers;
mod error;
mod models;
mod routers;
mod secrets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    let secrets = Arc::new(Secrets::from_env()?);
    let addr = format!("0.0.0.0:{}", secrets.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let app = build_router(AppState {
        secrets: Arc::clone(&secrets),
    });

    info!("🎧 Audio extractor listening on {} ({:?} mode)", addr, secrets.mode);
    info!("📡 Extract endpoint: POST /extract");
    info!(
        "⏱️ yt-dlp: {} (timeout {:?})",
        secrets.yt_dlp_bin.display(),
        secrets.extract_timeout
    );

    axum::serve(listener, app).await?;
    Ok(())
}
