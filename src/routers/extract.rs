use axum::{Json, extract::State};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::controllers::ExtractController;
use crate::error::ExtractError;
use crate::models::extract::{ExtractRequest, ExtractionResult};
use crate::routers::AppState;

pub async fn extract_route(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionResult>, ExtractError> {
    let request_id = Uuid::new_v4();
    ExtractController::new(&state.secrets)
        .extract_audio(&request.url)
        .instrument(info_span!("extract", %request_id))
        .await
        .map(Json)
}
