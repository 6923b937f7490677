use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use safezone_core::audio::{AudioCue, DEFAULT_TRACK_URL, DEFAULT_VOLUME};
use safezone_core::generation::{Timings, DEFAULT_RESET_DELAY_MS, DEFAULT_VIEW_SETTLE_MS};
use safezone_gemini::api::{DEFAULT_BASE_URL as GEMINI_BASE_URL, DEFAULT_MODEL};
use safezone_gemini::GeminiConfig;
use safezone_imagegen::url::{DEFAULT_BASE_URL as IMAGE_BASE_URL, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use safezone_imagegen::ImageConfig;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} has invalid value '{value}': {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Without an API
/// key the caption collaborator runs in degraded mode.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Text collaborator settings.
    pub gemini: GeminiConfig,
    /// Image collaborator settings.
    pub image: ImageConfig,
    /// Background track and volume.
    pub audio: AudioCue,
    /// Settle and reset delays.
    pub timings: Timings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                   |
    /// | `PORT`                 | `3000`                                      |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                        |
    /// | `API_KEY`              | falls back to `GEMINI_API_KEY`, else unset  |
    /// | `GEMINI_MODEL`         | `gemini-2.5-flash`                          |
    /// | `GEMINI_BASE_URL`      | `https://generativelanguage.googleapis.com` |
    /// | `IMAGE_BASE_URL`       | `https://image.pollinations.ai`             |
    /// | `IMAGE_WIDTH`          | `800`                                       |
    /// | `IMAGE_HEIGHT`         | `600`                                       |
    /// | `AUDIO_URL`            | Gymnopedie No. 1 on Wikimedia Commons       |
    /// | `AUDIO_VOLUME`         | `0.4`                                       |
    /// | `VIEW_SETTLE_MS`       | `500`                                       |
    /// | `RESET_DELAY_MS`       | `600`                                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port: u16 = parse(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let gemini = GeminiConfig {
            api_key: lookup("API_KEY")
                .or_else(|| lookup("GEMINI_API_KEY"))
                .filter(|key| !key.trim().is_empty()),
            model: var("GEMINI_MODEL", DEFAULT_MODEL),
            base_url: var("GEMINI_BASE_URL", GEMINI_BASE_URL),
        };

        let image = ImageConfig {
            base_url: var("IMAGE_BASE_URL", IMAGE_BASE_URL),
            width: parse(&lookup, "IMAGE_WIDTH", DEFAULT_WIDTH)?,
            height: parse(&lookup, "IMAGE_HEIGHT", DEFAULT_HEIGHT)?,
        };

        let audio = AudioCue::new(
            var("AUDIO_URL", DEFAULT_TRACK_URL),
            parse(&lookup, "AUDIO_VOLUME", DEFAULT_VOLUME)?,
        );

        let timings = Timings {
            view_settle: Duration::from_millis(parse(
                &lookup,
                "VIEW_SETTLE_MS",
                DEFAULT_VIEW_SETTLE_MS,
            )?),
            reset_delay: Duration::from_millis(parse(
                &lookup,
                "RESET_DELAY_MS",
                DEFAULT_RESET_DELAY_MS,
            )?),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            gemini,
            image,
            audio,
            timings,
        })
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
