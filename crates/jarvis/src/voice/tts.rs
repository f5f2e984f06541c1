//! Text-to-speech output

use async_trait::async_trait;
use colored::Colorize;
use tokio::process::Command;
use tracing::{debug, error};

use super::{config::SpeechConfig, VoiceError, VoiceResult};

/// Speech output. Blocks until playback finishes and never fails the caller.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str);
}

/// Echoes replies to the console and, when configured, pipes them through a
/// system TTS program (`espeak`, `say`, `spd-say`, ...).
#[derive(Debug, Clone)]
pub struct ConsoleSpeaker {
    config: SpeechConfig,
}

impl ConsoleSpeaker {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    async fn synthesize(&self, program: &[String], text: &str) -> VoiceResult<()> {
        let (binary, args) = program
            .split_first()
            .ok_or_else(|| VoiceError::NotConfigured("empty speech command".to_string()))?;

        let status = Command::new(binary).args(args).arg(text).status().await?;

        if status.success() {
            Ok(())
        } else {
            Err(VoiceError::TTSError(format!(
                "{} exited with {}",
                binary, status
            )))
        }
    }
}

#[async_trait]
impl Speaker for ConsoleSpeaker {
    async fn speak(&self, text: &str) {
        if self.config.echo {
            println!("{} {}", "Jarvis:".bright_cyan().bold(), text);
        }

        let Some(program) = &self.config.command else {
            return;
        };

        debug!("Speaking {} chars", text.len());
        if let Err(e) = self.synthesize(program, text).await {
            error!("TTS error: {}", e);
        }
    }
}
