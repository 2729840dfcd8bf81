use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::warn;

use crate::{
    controllers::ytdlp::YtDlp,
    models::root::{ApiDescription, HealthStatus},
    secrets::Secrets,
};

pub struct RootController;

impl RootController {
    pub async fn root() -> Response {
        let endpoints = BTreeMap::from([
            ("root".to_string(), "GET /".to_string()),
            ("health".to_string(), "GET /health".to_string()),
            ("extract".to_string(), "POST /extract".to_string()),
        ]);
        let description = ApiDescription {
            name: "Audio Extractor API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            endpoints,
        };
        (StatusCode::OK, Json(description)).into_response()
    }

    /// Always answers 200. A missing or broken yt-dlp only downgrades the status.
    pub async fn health_check(secrets: &Secrets) -> Response {
        let version = match YtDlp::new(&secrets.yt_dlp_bin).version().await {
            Ok(version) => Some(version),
            Err(e) => {
                warn!("Health check: yt-dlp unavailable: {}", e);
                None
            }
        };

        let health = HealthStatus {
            status: if version.is_some() { "healthy" } else { "degraded" }.to_string(),
            timestamp: Utc::now(),
            yt_dlp_available: version.is_some(),
            yt_dlp_version: version,
        };
        (StatusCode::OK, Json(health)).into_response()
    }
}
