//! Listen → dispatch → refresh loop

use std::{future::Future, sync::Arc};

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{
    brain::GeminiClient,
    clipboard::SystemClipboard,
    config::JarvisConfig,
    dispatch::{replies, Collaborators, Dispatcher, SystemClock},
    integrations::WikipediaClient,
    launcher::SystemLauncher,
    telemetry::{SystemTelemetry, TelemetrySnapshot, TelemetrySource},
    voice::{ConsoleSpeaker, Heard, ListenMode, Listener, Speaker, TextListener, WhisperListener},
    Result,
};

/// Why the session loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A terminate command was spoken
    Terminated,
    /// Ctrl-C (or the supplied shutdown future) fired
    Interrupted,
    /// The listener ran out of input
    InputClosed,
}

enum Turn {
    Continue,
    Stop(SessionEnd),
}

/// Cancels the dispatch task when an interrupt drops the turn mid-command
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct JarvisSession {
    dispatcher: Arc<Dispatcher>,
    listener: Arc<dyn Listener>,
    telemetry: Arc<dyn TelemetrySource>,
    snapshot: TelemetrySnapshot,
}

impl JarvisSession {
    /// Build the production collaborators. Fails on a missing Gemini key,
    /// an HTTP client that cannot be built, or a misconfigured listener.
    pub async fn from_config(config: JarvisConfig) -> Result<Self> {
        let speaker: Arc<dyn Speaker> = Arc::new(ConsoleSpeaker::new(&config.speech));

        let listener: Arc<dyn Listener> = match config.listen.mode {
            ListenMode::Text => Arc::new(TextListener::stdin()?),
            ListenMode::Whisper => Arc::new(WhisperListener::new(&config.listen)?),
        };
        info!("Listening in {:?} mode", config.listen.mode);

        let collaborators = Collaborators {
            speaker,
            clipboard: Arc::new(SystemClipboard::new()),
            launcher: Arc::new(SystemLauncher::new(&config.launcher)),
            ai: Arc::new(GeminiClient::new(&config.gemini)?),
            encyclopedia: Arc::new(WikipediaClient::new(&config.wikipedia)?),
            clock: Arc::new(SystemClock),
        };

        let dispatcher =
            Dispatcher::new(collaborators).with_summary_sentences(config.wikipedia.sentences);
        let telemetry = Arc::new(SystemTelemetry::new(&config.telemetry));

        Ok(Self::from_parts(dispatcher, listener, telemetry).await)
    }

    /// Assemble a session from ready collaborators and take the first
    /// telemetry snapshot.
    pub async fn from_parts(
        dispatcher: Dispatcher,
        listener: Arc<dyn Listener>,
        telemetry: Arc<dyn TelemetrySource>,
    ) -> Self {
        let mut session = Self {
            dispatcher: Arc::new(dispatcher),
            listener,
            telemetry,
            snapshot: TelemetrySnapshot::unavailable("not collected yet"),
        };
        session.refresh_telemetry().await;
        session
    }

    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.snapshot
    }

    /// Run until a terminate command, end of input, or Ctrl-C.
    pub async fn run(&mut self) -> SessionEnd {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until a terminate command, end of input, or `shutdown` resolves.
    /// Shutdown is raced against the whole iteration, capture included.
    pub async fn run_until<F>(&mut self, shutdown: F) -> SessionEnd
    where
        F: Future<Output = ()>,
    {
        self.speak(replies::ACTIVATED).await;
        tokio::pin!(shutdown);

        loop {
            let turn = tokio::select! {
                _ = &mut shutdown => Turn::Stop(SessionEnd::Interrupted),
                turn = self.turn() => turn,
            };

            match turn {
                Turn::Continue => self.refresh_telemetry().await,
                Turn::Stop(SessionEnd::Interrupted) => {
                    info!("Interrupted, shutting down");
                    self.speak(replies::GOODBYE).await;
                    return SessionEnd::Interrupted;
                }
                Turn::Stop(end) => {
                    info!("Session ended: {:?}", end);
                    return end;
                }
            }
        }
    }

    async fn turn(&self) -> Turn {
        let utterance = match self.listener.listen().await {
            Heard::Closed => {
                info!("Input closed");
                return Turn::Stop(SessionEnd::InputClosed);
            }
            Heard::Interrupted => return Turn::Stop(SessionEnd::Interrupted),
            Heard::Utterance(utterance) => utterance,
        };

        debug!("Heard: {:?}", utterance);

        let dispatcher = Arc::clone(&self.dispatcher);
        let snapshot = self.snapshot.clone();
        let mut task = AbortOnDrop(tokio::spawn(async move {
            dispatcher.dispatch(&utterance, &snapshot).await
        }));

        match (&mut task.0).await {
            Ok(result) if !result.continue_session => Turn::Stop(SessionEnd::Terminated),
            Ok(_) => Turn::Continue,
            Err(e) => {
                error!("Command failed: {}", e);
                self.speak(replies::TURN_FAILED).await;
                Turn::Continue
            }
        }
    }

    async fn speak(&self, text: &str) {
        self.dispatcher.collaborators().speaker.speak(text).await;
    }

    /// Replace the snapshot; the previous one is kept if collection panics.
    async fn refresh_telemetry(&mut self) {
        let source = Arc::clone(&self.telemetry);
        match tokio::task::spawn_blocking(move || source.capture()).await {
            Ok(snapshot) => self.snapshot = snapshot,
            Err(e) => warn!("Telemetry refresh failed: {}", e),
        }
    }
}
