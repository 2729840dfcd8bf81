use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::ExtractError;

/// Retries yt-dlp performs itself on transient extractor errors.
const EXTRACTOR_RETRIES: u32 = 3;
/// Seconds yt-dlp sleeps between its own requests to avoid rate limiting.
const SLEEP_REQUESTS_SECS: u32 = 1;
const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle to the external yt-dlp executable.
pub struct YtDlp<'a> {
    bin: &'a Path,
}

impl<'a> YtDlp<'a> {
    pub fn new(bin: &'a Path) -> Self {
        YtDlp { bin }
    }

    /// Arguments for a metadata dump of `url`. The URL always comes last,
    /// behind `--` so it can never be read as an option.
    pub fn dump_json_args(url: &str, cookies: Option<&Path>) -> Vec<String> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--extractor-retries".to_string(),
            EXTRACTOR_RETRIES.to_string(),
            "--sleep-requests".to_string(),
            SLEEP_REQUESTS_SECS.to_string(),
        ];
        if let Some(path) = cookies {
            args.push("--cookies".to_string());
            args.push(path.display().to_string());
        }
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    /// Run `--dump-json` against `url` and return the raw stdout on success.
    pub async fn dump_json(
        &self,
        url: &str,
        cookies_file: Option<&Path>,
        budget: Duration,
    ) -> Result<Vec<u8>, ExtractError> {
        let cookies = usable_cookies(cookies_file).await;
        let args = Self::dump_json_args(url, cookies.as_deref());
        info!(
            "Running yt-dlp for {} (cookies: {})",
            url,
            if cookies.is_some() { "yes" } else { "no" }
        );

        let mut command = Command::new(self.bin);
        command.args(&args);
        let output = run_with_deadline(command, budget).await?;

        if !output.status.success() {
            return Err(ExtractError::ExtractionFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !output.stderr.is_empty() {
            debug!(
                "yt-dlp stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(output.stdout)
    }

    /// `yt-dlp --version`, used by the health check.
    pub async fn version(&self) -> anyhow::Result<String> {
        let mut command = Command::new(self.bin);
        command.arg("--version");
        let output = run_with_deadline(command, VERSION_PROBE_TIMEOUT).await?;

        if !output.status.success() {
            bail!(
                "yt-dlp --version exited with code {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// The configured cookie file, if it is actually on disk right now.
async fn usable_cookies(cookies_file: Option<&Path>) -> Option<PathBuf> {
    let path = cookies_file?;
    match tokio::fs::try_exists(path).await {
        Ok(true) => Some(path.to_path_buf()),
        Ok(false) => {
            warn!(
                "Cookie file {} not found, extracting without cookies",
                path.display()
            );
            None
        }
        Err(e) => {
            warn!(
                "Could not check cookie file {}: {}, extracting without cookies",
                path.display(),
                e
            );
            None
        }
    }
}

/// Run `command` to completion with captured output, giving up after
/// `budget`. The child is killed and its pipes closed when the future is
/// dropped, so a timeout never leaves a stray process behind.
pub async fn run_with_deadline(
    mut command: Command,
    budget: Duration,
) -> Result<Output, ExtractError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let program = command.as_std().get_program().to_string_lossy().into_owned();
    match timeout(budget, command.output()).await {
        Ok(result) => result
            .with_context(|| format!("failed to run {}", program))
            .map_err(ExtractError::from),
        Err(_) => Err(ExtractError::ExtractionTimedOut(budget)),
    }
}
