//! Configuration management for Jarvis
//!
//! Loads `~/.jarvis/config.toml` (or an explicit path). Every section is
//! optional and falls back to defaults; secrets can also come from the
//! environment.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    voice::config::{ListenConfig, SpeechConfig},
    JarvisError, Result,
};

/// Top-level configuration for the assistant
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JarvisConfig {
    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub listen: ListenConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub wikipedia: WikipediaConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    #[serde(default)]
    pub launcher: LauncherConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_key: None,
            endpoint: default_gemini_endpoint(),
        }
    }
}

impl GeminiConfig {
    /// API key from the config file, else `GEMINI_API_KEY`.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| {
                JarvisError::MissingCredentials(
                    "Gemini API key not configured. Set GEMINI_API_KEY or gemini.api_key"
                        .to_string(),
                )
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaConfig {
    #[serde(default = "default_wikipedia_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_sentences")]
    pub sentences: u8,
}

fn default_wikipedia_endpoint() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_sentences() -> u8 {
    2
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_wikipedia_endpoint(),
            sentences: default_sentences(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_disk_mount")]
    pub disk_mount: PathBuf,

    #[serde(default = "default_cpu_sample_ms")]
    pub cpu_sample_ms: u64,
}

fn default_disk_mount() -> PathBuf {
    PathBuf::from("/")
}

fn default_cpu_sample_ms() -> u64 {
    1000
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            disk_mount: default_disk_mount(),
            cpu_sample_ms: default_cpu_sample_ms(),
        }
    }
}

/// Per-app command overrides, keyed by app id (`calculator`, `camera`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LauncherConfig {
    #[serde(default)]
    pub apps: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("jarvis.log"))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

impl JarvisConfig {
    /// Get the path to the default config file
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jarvis")
            .join("config.toml")
    }

    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| JarvisError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Parse TOML configuration text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
