use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Every way the extraction pipeline can fail. Internal detail stays in the
/// log; callers only ever see the public message.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("yt-dlp exited with code {code:?}: {stderr}")]
    ExtractionFailed { code: Option<i32>, stderr: String },

    #[error("yt-dlp did not finish within {0:?}")]
    ExtractionTimedOut(Duration),

    #[error("could not parse yt-dlp output: {0}")]
    MetadataParseFailed(#[from] serde_json::Error),

    #[error("no audio streams passed the filter")]
    NoAudioStreamsFound,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ExtractError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExtractError::ExtractionFailed { .. } => StatusCode::BAD_REQUEST,
            ExtractError::ExtractionTimedOut(_) => StatusCode::REQUEST_TIMEOUT,
            ExtractError::MetadataParseFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExtractError::NoAudioStreamsFound => StatusCode::NOT_FOUND,
            ExtractError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ExtractError::ExtractionFailed { .. } => "Extraction failed or invalid URL",
            ExtractError::ExtractionTimedOut(_) => "Extraction timed out",
            ExtractError::MetadataParseFailed(_) => "Failed to parse video metadata",
            ExtractError::NoAudioStreamsFound => "No valid audio streams found",
            ExtractError::Unexpected(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        match &self {
            ExtractError::NoAudioStreamsFound | ExtractError::ExtractionTimedOut(_) => {
                warn!("Extraction error: {:#}", self)
            }
            _ => error!("Extraction error: {:#}", self),
        }

        let body = Json(json!({
            "error": self.public_message(),
        }));

        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let cases = [
            (
                ExtractError::ExtractionFailed {
                    code: Some(1),
                    stderr: "ERROR: Unsupported URL".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ExtractError::ExtractionTimedOut(Duration::from_secs(45)),
                StatusCode::REQUEST_TIMEOUT,
            ),
            (
                ExtractError::MetadataParseFailed(parse_err),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ExtractError::NoAudioStreamsFound, StatusCode::NOT_FOUND),
            (
                ExtractError::Unexpected(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn response_body_hides_stderr() {
        let err = ExtractError::ExtractionFailed {
            code: Some(1),
            stderr: "ERROR: cookies at /secret/path rejected".to_string(),
        };
        let response = err.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(!text.contains("/secret/path"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["error"], "Extraction failed or invalid URL");
    }
}
