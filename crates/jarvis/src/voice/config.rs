//! Speech input/output configuration

use serde::{Deserialize, Serialize};

/// Text-to-speech configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Print every reply as `Jarvis: {text}`
    #[serde(default = "default_true")]
    pub echo: bool,

    /// Optional TTS program; the reply text is appended as the last argument
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            echo: true,
            command: None,
        }
    }
}

/// Where utterances come from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListenMode {
    /// Typed commands on stdin
    #[default]
    Text,
    /// Recorder command + Whisper transcription
    Whisper,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub mode: ListenMode,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_phrase_time_limit_secs")]
    pub phrase_time_limit_secs: u64,

    /// `{seconds}` is replaced with the phrase time limit
    #[serde(default = "default_record_command")]
    pub record_command: Vec<String>,

    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    #[serde(default = "default_whisper_endpoint")]
    pub whisper_endpoint: String,

    #[serde(default = "default_language")]
    pub language: String,
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_phrase_time_limit_secs() -> u64 {
    5
}

fn default_record_command() -> Vec<String> {
    [
        "arecord", "-q", "-f", "S16_LE", "-r", "16000", "-c", "1", "-t", "wav", "-d",
        "{seconds}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

fn default_whisper_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            mode: ListenMode::default(),
            timeout_secs: default_timeout_secs(),
            phrase_time_limit_secs: default_phrase_time_limit_secs(),
            record_command: default_record_command(),
            whisper_model: default_whisper_model(),
            whisper_endpoint: default_whisper_endpoint(),
            language: default_language(),
        }
    }
}
