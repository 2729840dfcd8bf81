use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::secrets::Secrets;

pub mod extract;
pub mod root;
pub use extract::extract_route;
pub use root::{health_check_route, root_route};

#[derive(Clone)]
pub struct AppState {
    pub secrets: Arc<Secrets>,
}

pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .route("/extract", post(extract_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
