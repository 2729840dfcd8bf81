// secrets
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use tracing::info;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_YT_DLP_BIN: &str = "yt-dlp";
const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dev,
    Prod,
}

/// Process configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub mode: Mode,
    pub port: u16,
    /// Cookie file handed to yt-dlp. Existence is checked per request.
    pub cookies_file: Option<PathBuf>,
    pub yt_dlp_bin: PathBuf,
    pub extract_timeout: Duration,
}

impl Secrets {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = match get("MODE") {
            Some(mode) if mode.to_lowercase() == "prod" => Mode::Prod,
            _ => Mode::Dev,
        };

        let port = match (mode, get("PORT")) {
            (_, Some(port)) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {port}"))?,
            (Mode::Dev, None) => DEFAULT_PORT,
            (Mode::Prod, None) => bail!("PORT must be set in production mode"),
        };

        let extract_timeout = match get("EXTRACT_TIMEOUT_SECS") {
            Some(secs) => {
                let secs = secs
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("EXTRACT_TIMEOUT_SECS is not a number: {secs}"))?;
                if secs == 0 {
                    bail!("EXTRACT_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_EXTRACT_TIMEOUT_SECS),
        };

        let secrets = Secrets {
            mode,
            port,
            cookies_file: get("COOKIES_FILE").map(PathBuf::from),
            yt_dlp_bin: get("YT_DLP_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_YT_DLP_BIN)),
            extract_timeout,
        };

        // Log which settings are configured (NOT their values!)
        let configured: Vec<&str> = ["MODE", "PORT", "COOKIES_FILE", "YT_DLP_PATH", "EXTRACT_TIMEOUT_SECS"]
            .into_iter()
            .filter(|key| get(*key).is_some())
            .collect();
        info!("Settings configured: {:?}", configured);

        Ok(secrets)
    }
}

impl Default for Secrets {
    fn default() -> Self {
        Secrets {
            mode: Mode::Dev,
            port: DEFAULT_PORT,
            cookies_file: None,
            yt_dlp_bin: PathBuf::from(DEFAULT_YT_DLP_BIN),
            extract_timeout: Duration::from_secs(DEFAULT_EXTRACT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn dev_defaults() {
        let secrets = Secrets::from_lookup(lookup(&[])).unwrap();
        assert_eq!(secrets.mode, Mode::Dev);
        assert_eq!(secrets.port, 8000);
        assert_eq!(secrets.cookies_file, None);
        assert_eq!(secrets.yt_dlp_bin, PathBuf::from("yt-dlp"));
        assert_eq!(secrets.extract_timeout, Duration::from_secs(45));
    }

    #[test]
    fn reads_overrides() {
        let secrets = Secrets::from_lookup(lookup(&[
            ("MODE", "PROD"),
            ("PORT", "9090"),
            ("COOKIES_FILE", "/run/secrets/cookies.txt"),
            ("YT_DLP_PATH", "/opt/bin/yt-dlp"),
            ("EXTRACT_TIMEOUT_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(secrets.mode, Mode::Prod);
        assert_eq!(secrets.port, 9090);
        assert_eq!(
            secrets.cookies_file,
            Some(PathBuf::from("/run/secrets/cookies.txt"))
        );
        assert_eq!(secrets.yt_dlp_bin, PathBuf::from("/opt/bin/yt-dlp"));
        assert_eq!(secrets.extract_timeout, Duration::from_secs(60));
    }

    #[test]
    fn blank_cookie_path_is_unset() {
        let secrets = Secrets::from_lookup(lookup(&[("COOKIES_FILE", "  ")])).unwrap();
        assert_eq!(secrets.cookies_file, None);
    }

    #[test]
    fn prod_requires_port() {
        assert!(Secrets::from_lookup(lookup(&[("MODE", "prod")])).is_err());
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(Secrets::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Secrets::from_lookup(lookup(&[("EXTRACT_TIMEOUT_SECS", "0")])).is_err());
    }
}
