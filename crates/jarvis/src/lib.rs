//! # Jarvis - Voice Assistant
//!
//! Listens for a spoken command, resolves it against an ordered keyword rule
//! table and speaks the outcome. Every side effect (speech, clipboard,
//! launchers, Gemini, Wikipedia, telemetry) sits behind a narrow trait so the
//! dispatcher can run against deterministic fakes.

pub mod brain;
pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod integrations;
pub mod launcher;
pub mod session;
pub mod telemetry;
pub mod voice;

#[cfg(test)]
mod dispatch_tests;
#[cfg(test)]
mod test_support;

pub use brain::{AiClient, GeminiClient};
pub use clipboard::{ClipboardError, ClipboardProvider, SystemClipboard};
pub use config::JarvisConfig;
pub use dispatch::{
    App, Clock, Collaborators, Command, DispatchResult, Dispatcher, Rule, Site, SystemClock,
    Trigger,
};
pub use integrations::{Encyclopedia, LookupError, WikipediaClient};
pub use launcher::{LaunchError, Launcher, SystemLauncher};
pub use session::{JarvisSession, SessionEnd};
pub use telemetry::{
    BatteryStatus, CpuUsage, DiskUsage, Reading, SystemTelemetry, TelemetrySnapshot,
    TelemetrySource,
};
pub use voice::{Heard, Listener, Speaker, VoiceError};

/// Main error types for Jarvis operations
#[derive(Debug, thiserror::Error)]
pub enum JarvisError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Voice error: {0}")]
    VoiceEngineError(#[from] crate::voice::VoiceError),
}

pub type Result<T> = std::result::Result<T, JarvisError>;

/// Build every collaborator from configuration and take the first
/// telemetry snapshot.
pub async fn initialize_jarvis(config: JarvisConfig) -> Result<JarvisSession> {
    tracing::info!("Initializing Jarvis assistant...");

    let session = JarvisSession::from_config(config).await?;

    tracing::info!("Jarvis assistant initialized successfully");
    Ok(session)
}
