use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ApiDescription {
    pub name: String,
    pub version: String,
    pub status: String,
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct HealthStatus {
    pub status: String, // "healthy", "degraded"
    pub timestamp: DateTime<Utc>,
    pub yt_dlp_available: bool,
    pub yt_dlp_version: Option<String>,
}
