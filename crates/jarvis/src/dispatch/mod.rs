//! Command dispatch
//!
//! [`Dispatcher::dispatch`] resolves one normalized utterance against the
//! rule table and runs the matching action against injected collaborators.

mod actions;
pub mod extract;
pub mod replies;
pub mod rules;

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

pub use crate::launcher::App;
pub use rules::{resolve, Command, Rule, Site, Trigger, RULES};

use crate::{
    brain::AiClient, clipboard::ClipboardProvider, integrations::Encyclopedia,
    launcher::Launcher, telemetry::TelemetrySnapshot, voice::Speaker,
};

const DEFAULT_SUMMARY_SENTENCES: u8 = 2;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local time of the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Everything an action may touch
#[derive(Clone)]
pub struct Collaborators {
    pub speaker: Arc<dyn Speaker>,
    pub clipboard: Arc<dyn ClipboardProvider>,
    pub launcher: Arc<dyn Launcher>,
    pub ai: Arc<dyn AiClient>,
    pub encyclopedia: Arc<dyn Encyclopedia>,
    pub clock: Arc<dyn Clock>,
}

/// Outcome of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A rule ran (false only for the empty utterance)
    pub handled: bool,
    pub continue_session: bool,
}

impl DispatchResult {
    pub fn ignored() -> Self {
        Self {
            handled: false,
            continue_session: true,
        }
    }

    pub fn handled(continue_session: bool) -> Self {
        Self {
            handled: true,
            continue_session,
        }
    }
}

pub struct Dispatcher {
    collaborators: Collaborators,
    summary_sentences: u8,
}

impl Dispatcher {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
        }
    }

    /// Number of sentences requested from the encyclopedia
    pub fn with_summary_sentences(mut self, sentences: u8) -> Self {
        self.summary_sentences = sentences.max(1);
        self
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Run exactly one rule for `utterance`. The empty utterance touches no
    /// collaborator and keeps the session alive.
    pub async fn dispatch(&self, utterance: &str, snapshot: &TelemetrySnapshot) -> DispatchResult {
        let Some(command) = resolve(utterance) else {
            return DispatchResult::ignored();
        };

        let continue_session = !command.ends_session();
        self.execute(command, snapshot).await;
        DispatchResult::handled(continue_session)
    }
}
