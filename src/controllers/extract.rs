use serde_json::Number;
use tracing::{debug, info};

use crate::{
    controllers::{normalize::normalize_url, ytdlp::YtDlp},
    error::ExtractError,
    models::extract::{AudioStream, ExtractionResult, FormatRecord, RawMetadata},
    secrets::Secrets,
};

/// Containers we are willing to hand back as playable audio.
const ACCEPTED_FORMATS: &[&str] = &["webm", "m4a", "mp3", "aac", "opus", "ogg"];

pub struct ExtractController<'a> {
    secrets: &'a Secrets,
}

impl<'a> ExtractController<'a> {
    pub fn new(secrets: &'a Secrets) -> Self {
        ExtractController { secrets }
    }

    /// Sanitize `raw_url` and extract its audio streams.
    pub async fn extract_audio(&self, raw_url: &str) -> Result<ExtractionResult, ExtractError> {
        let url = normalize_url(raw_url);
        if url != raw_url {
            debug!("Normalized {} -> {}", raw_url, url);
        }
        self.extract(&url).await
    }

    pub async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        info!("Extracting audio from URL: {}", url);
        let stdout = YtDlp::new(&self.secrets.yt_dlp_bin)
            .dump_json(
                url,
                self.secrets.cookies_file.as_deref(),
                self.secrets.extract_timeout,
            )
            .await?;

        let result = build_result(parse_metadata(&stdout)?)?;
        info!(
            "Found {} audio streams for {:?}",
            result.audio_streams.len(),
            result.title
        );
        Ok(result)
    }
}

pub fn parse_metadata(stdout: &[u8]) -> Result<RawMetadata, ExtractError> {
    serde_json::from_slice(stdout).map_err(|e| {
        let snippet: String = String::from_utf8_lossy(stdout).chars().take(200).collect();
        debug!("Unparseable yt-dlp output starts with: {:?}", snippet);
        ExtractError::from(e)
    })
}

fn is_playable_audio(format: &FormatRecord) -> bool {
    format.vcodec.as_deref() == Some("none")
        && format
            .ext
            .as_deref()
            .is_some_and(|ext| ACCEPTED_FORMATS.contains(&ext))
        && format.abr.as_ref().and_then(Number::as_f64).unwrap_or(0.0) > 0.0
        && format.url.as_deref().is_some_and(|url| !url.is_empty())
}

/// Audio-only formats that pass the quality gate, in the order yt-dlp listed them.
pub fn filter_audio_streams(formats: &[FormatRecord]) -> Vec<AudioStream> {
    formats
        .iter()
        .filter(|format| is_playable_audio(format))
        .filter_map(|format| {
            Some(AudioStream {
                format: format.ext.clone()?,
                bitrate: format.abr.clone()?,
                filesize: format.filesize.clone(),
                url: format.url.clone()?,
            })
        })
        .collect()
}

pub fn build_result(metadata: RawMetadata) -> Result<ExtractionResult, ExtractError> {
    let audio_streams = filter_audio_streams(metadata.formats.as_deref().unwrap_or_default());
    if audio_streams.is_empty() {
        return Err(ExtractError::NoAudioStreamsFound);
    }

    Ok(ExtractionResult {
        audio_streams,
        title: metadata.title,
        thumbnail: metadata.thumbnail,
    })
}
