//! Voice input and output for Jarvis
//!
//! ```text
//!   Listener ──► normalize ──► Dispatcher ──► Speaker
//!  (stdin | recorder + Whisper)              (console | TTS command)
//! ```
//!
//! Neither side ever fails its caller: speech errors are logged and dropped,
//! capture errors become an empty utterance.

pub mod config;
pub mod stt;
pub mod tts;

pub use config::{ListenConfig, ListenMode, SpeechConfig};
pub use stt::{Heard, LineSource, Listener, TextListener, WhisperListener};
pub use tts::{ConsoleSpeaker, Speaker};

/// Voice processing errors
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("TTS error: {0}")]
    TTSError(String),

    #[error("STT error: {0}")]
    STTError(String),

    #[error("Audio capture error: {0}")]
    CaptureError(String),

    #[error("Listening timed out")]
    Timeout,

    #[error("Voice engine not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type VoiceResult<T> = Result<T, VoiceError>;

/// Lowercase and trim raw recognizer or keyboard text into an utterance.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
