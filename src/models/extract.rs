use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ExtractRequest {
    pub url: String,
}

/// Subset of the `--dump-json` document we consume. Everything else yt-dlp
/// reports is ignored.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub formats: Option<Vec<FormatRecord>>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct FormatRecord {
    pub ext: Option<String>,
    /// Average audio bitrate in kbit/s
    pub abr: Option<Number>,
    /// Bytes. yt-dlp usually reports an integer, but any JSON number is accepted.
    pub filesize: Option<Number>,
    pub url: Option<String>,
    pub vcodec: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AudioStream {
    pub format: String,
    pub bitrate: Number,
    pub filesize: Option<Number>,
    pub url: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ExtractionResult {
    pub audio_streams: Vec<AudioStream>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
}
