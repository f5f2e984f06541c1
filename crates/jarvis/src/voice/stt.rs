//! Speech-to-text input

use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use colored::Colorize;
use rustyline::{error::ReadlineError, DefaultEditor};
use serde::Deserialize;
use tokio::{
    process::Command,
    sync::{mpsc, oneshot},
};
use tracing::{debug, error, info, warn};

use super::{config::ListenConfig, normalize, VoiceError, VoiceResult};

/// Outcome of one capture attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heard {
    /// Normalized utterance; empty when nothing usable was captured
    Utterance(String),
    /// The input source is exhausted (stdin closed)
    Closed,
    /// The user pressed Ctrl-C at the prompt
    Interrupted,
}

impl Heard {
    pub fn empty() -> Self {
        Heard::Utterance(String::new())
    }
}

/// Speech input. Capture problems are absorbed here and surface as an
/// empty utterance, never as an error.
#[async_trait]
pub trait Listener: Send + Sync {
    async fn listen(&self) -> Heard;
}

/// Blocking source of typed lines
pub trait LineSource: Send + 'static {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        let line = self.readline(prompt)?;
        if !line.trim().is_empty() {
            let _ = self.add_history_entry(line.as_str());
        }
        Ok(line)
    }
}

/// Reads typed commands with a line editor on its own OS thread. A line is
/// only read while a `listen` call is waiting for it.
pub struct TextListener {
    requests: mpsc::UnboundedSender<oneshot::Sender<Heard>>,
}

impl TextListener {
    /// Interactive stdin with history and a `You:` prompt
    pub fn stdin() -> VoiceResult<Self> {
        let editor = DefaultEditor::new().map_err(|e| VoiceError::CaptureError(e.to_string()))?;
        Self::with_source(editor, format!("{} ", "You:".bright_green().bold()))
    }

    pub fn with_source<S: LineSource>(mut source: S, prompt: String) -> VoiceResult<Self> {
        let (requests, mut pending) = mpsc::unbounded_channel::<oneshot::Sender<Heard>>();

        std::thread::Builder::new()
            .name("jarvis-input".to_string())
            .spawn(move || {
                while let Some(reply) = pending.blocking_recv() {
                    let heard = match source.read_line(&prompt) {
                        Ok(line) => Heard::Utterance(normalize(&line)),
                        Err(ReadlineError::Interrupted) => Heard::Interrupted,
                        Err(ReadlineError::Eof) => Heard::Closed,
                        Err(e) => {
                            error!("Listening error: {}", e);
                            Heard::empty()
                        }
                    };

                    let closed = heard == Heard::Closed;
                    let _ = reply.send(heard);
                    if closed {
                        break;
                    }
                }
                debug!("Input thread finished");
            })?;

        Ok(Self { requests })
    }
}

#[async_trait]
impl Listener for TextListener {
    async fn listen(&self) -> Heard {
        let (reply, heard) = oneshot::channel();
        if self.requests.send(reply).is_err() {
            return Heard::Closed;
        }
        heard.await.unwrap_or(Heard::Closed)
    }
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    #[serde(default)]
    text: String,
}

/// Records one phrase with an external recorder and transcribes it with the
/// OpenAI Whisper API
#[derive(Debug)]
pub struct WhisperListener {
    config: ListenConfig,
    client: reqwest::Client,
    api_key: String,
}

impl WhisperListener {
    pub fn new(config: &ListenConfig) -> VoiceResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            VoiceError::NotConfigured("OpenAI API key not configured for Whisper".to_string())
        })?;

        if config.record_command.is_empty() {
            return Err(VoiceError::NotConfigured(
                "listen.record_command is empty".to_string(),
            ));
        }

        info!("Initializing Whisper STT with model: {}", config.whisper_model);

        Ok(Self {
            config: config.clone(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            api_key,
        })
    }

    fn recorder_args(&self) -> Vec<String> {
        let seconds = self.config.phrase_time_limit_secs.to_string();
        self.config
            .record_command
            .iter()
            .map(|arg| arg.replace("{seconds}", &seconds))
            .collect()
    }

    async fn record(&self) -> VoiceResult<Vec<u8>> {
        let args = self.recorder_args();
        let (binary, rest) = args
            .split_first()
            .ok_or_else(|| VoiceError::NotConfigured("empty record command".to_string()))?;

        println!("Listening...");
        let limit =
            Duration::from_secs(self.config.timeout_secs + self.config.phrase_time_limit_secs);

        let child = Command::new(binary)
            .args(rest)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| VoiceError::Timeout)??;

        if !output.status.success() {
            return Err(VoiceError::CaptureError(format!(
                "{} exited with {}",
                binary, output.status
            )));
        }
        if output.stdout.is_empty() {
            return Err(VoiceError::Timeout);
        }

        Ok(output.stdout)
    }

    async fn transcribe(&self, audio: Vec<u8>) -> VoiceResult<String> {
        println!("Recognizing...");

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("audio.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.config.whisper_model.clone())
            .text("language", self.config.language.clone());

        let response = self
            .client
            .post(&self.config.whisper_endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::STTError(format!("Whisper API {}: {}", status, body)));
        }

        let parsed: WhisperResponse = response.json().await?;
        Ok(parsed.text)
    }
}

#[async_trait]
impl Listener for WhisperListener {
    async fn listen(&self) -> Heard {
        let audio = match self.record().await {
            Ok(audio) => audio,
            Err(VoiceError::Timeout) => {
                println!("No speech detected");
                return Heard::empty();
            }
            Err(e) => {
                error!("Listening error: {}", e);
                return Heard::empty();
            }
        };

        match self.transcribe(audio).await {
            Ok(text) if text.trim().is_empty() => {
                println!("Could not understand audio");
                Heard::empty()
            }
            Ok(text) => {
                println!("User: {}", text);
                debug!("Transcribed: {}", text);
                Heard::Utterance(normalize(&text))
            }
            Err(e) => {
                warn!("Speech recognition service error: {}", e);
                Heard::empty()
            }
        }
    }
}
