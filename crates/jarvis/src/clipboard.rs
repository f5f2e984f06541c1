//! System clipboard access

use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard does not hold text")]
    NotText,

    #[error("clipboard access failed: {0}")]
    Access(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ContentNotAvailable => ClipboardError::NotText,
            arboard::Error::ClipboardNotSupported => {
                ClipboardError::Unavailable("not supported on this platform".to_string())
            }
            other => ClipboardError::Access(other.to_string()),
        }
    }
}

#[async_trait]
pub trait ClipboardProvider: Send + Sync {
    async fn read(&self) -> Result<String, ClipboardError>;
    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// OS clipboard through `arboard`. A fresh handle is opened per call so a
/// missing display server only fails that call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardProvider for SystemClipboard {
    async fn read(&self) -> Result<String, ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        let text = clipboard.get_text()?;
        debug!("Read {} chars from clipboard", text.len());
        Ok(text)
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        debug!("Wrote {} chars to clipboard", text.len());
        Ok(())
    }
}
