//! Configuration loading and validation.
//!
//! Loads `./daily-art.toml` (or `$DAILY_ART_CONFIG`). Environment variables,
//! including those from a `.env` file in the working directory, override
//! file values; file values override defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::caption::DEFAULT_HASHTAG;

/// Env var naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "DAILY_ART_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "daily-art.toml";

/// Telegram's limit on photo captions, in UTF-16 code units.
pub const TELEGRAM_CAPTION_LIMIT: usize = 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bot credentials and target chat.
    pub telegram: TelegramConfig,
    /// Caption rendering settings.
    pub caption: CaptionConfig,
    /// Log filter and optional file output.
    pub logging: LoggingConfig,
}

/// Telegram delivery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API token.
    pub bot_token: Option<String>,
    /// Numeric chat id or `@channel` username.
    pub chat_id: Option<String>,
    /// Timeout for a single Bot API request.
    pub request_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            request_timeout_secs: 20,
        }
    }
}

/// Caption rendering settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Hashtag line closing every caption.
    pub hashtag: String,
    /// Captions longer than this many UTF-16 units are truncated before sending.
    pub max_caption_units: usize,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            hashtag: DEFAULT_HASHTAG.to_owned(),
            max_caption_units: TELEGRAM_CAPTION_LIMIT,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for JSON log files; stderr only when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            dir: None,
        }
    }
}

/// Configuration that cannot be used for the requested operation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required values are absent or blank.
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

impl Config {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!(error = %err, "ignoring unreadable .env"),
        }

        let path = config_path_with(|key| std::env::var(key).ok());
        let mut config = load_config(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML string into config.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }

    /// Apply environment overrides through `env`.
    ///
    /// Blank values are ignored. Invalid numbers are logged and ignored.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if let Some(v) = var("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = Some(v.trim().to_owned());
        }
        if let Some(v) = var("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = Some(v.trim().to_owned());
        }
        if let Some(v) = var("DAILY_ART_HASHTAG") {
            self.caption.hashtag = v.trim().to_owned();
        }
        if let Some(v) = var("DAILY_ART_MAX_CAPTION_UNITS") {
            match v.trim().parse() {
                Ok(n) => self.caption.max_caption_units = n,
                Err(_) => warn!(
                    var = "DAILY_ART_MAX_CAPTION_UNITS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = var("LOG_LEVEL") {
            self.logging.level = v.trim().to_lowercase();
        }
    }

    /// Check that everything needed for delivery is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming every absent variable.
    pub fn validate(&self, require_telegram: bool) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if require_telegram {
            if is_blank(self.telegram.bot_token.as_deref()) {
                missing.push("TELEGRAM_BOT_TOKEN");
            }
            if is_blank(self.telegram.chat_id.as_deref()) {
                missing.push("TELEGRAM_CHAT_ID");
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Resolve the config file path using a custom env resolver.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    env(CONFIG_PATH_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
}

/// Load config from `path`, falling back to defaults when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            info!(path = %path.display(), "loading config from file");
            Config::from_toml(&contents).with_context(|| format!("invalid {}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(anyhow::anyhow!(
            "failed to read config file {}: {e}",
            path.display()
        )),
    }
}
