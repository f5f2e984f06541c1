//! Deterministic collaborators for dispatcher and session tests

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    brain::AiClient,
    clipboard::{ClipboardError, ClipboardProvider},
    dispatch::{Clock, Collaborators, Dispatcher},
    integrations::{Encyclopedia, LookupError},
    launcher::{App, LaunchError, Launcher},
    telemetry::{
        BatteryStatus, CpuUsage, DiskUsage, TelemetryError, TelemetryResult, TelemetrySource,
    },
    voice::{Heard, Listener, Speaker},
};

#[derive(Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl Speaker for RecordingSpeaker {
    async fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

/// Replays canned utterances, then reports closed input
pub struct ScriptedListener {
    script: Mutex<VecDeque<Heard>>,
}

impl ScriptedListener {
    pub fn new(lines: &[&str]) -> Self {
        Self::hearing(
            lines
                .iter()
                .map(|line| Heard::Utterance(line.to_string()))
                .collect(),
        )
    }

    pub fn hearing(script: Vec<Heard>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl Listener for ScriptedListener {
    async fn listen(&self) -> Heard {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Heard::Closed)
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub content: Mutex<Option<String>>,
    pub writes: Mutex<Vec<String>>,
    pub reads: AtomicUsize,
    pub broken: bool,
}

impl FakeClipboard {
    pub fn holding(text: &str) -> Self {
        Self {
            content: Mutex::new(Some(text.to_string())),
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClipboardProvider for FakeClipboard {
    async fn read(&self) -> Result<String, ClipboardError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.content.lock().unwrap().clone().ok_or(ClipboardError::NotText)
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        *self.content.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launched {
    Url(String),
    App(App),
}

#[derive(Default)]
pub struct FakeLauncher {
    launched: Mutex<Vec<Launched>>,
    pub broken: bool,
}

impl FakeLauncher {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn launched(&self) -> Vec<Launched> {
        self.launched.lock().unwrap().clone()
    }

    fn fail(&self, target: &str) -> Result<(), LaunchError> {
        Err(LaunchError::OpenFailed {
            target: target.to_string(),
            reason: "no handler".to_string(),
        })
    }
}

#[async_trait]
impl Launcher for FakeLauncher {
    async fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        if self.broken {
            return self.fail(url);
        }
        self.launched.lock().unwrap().push(Launched::Url(url.to_string()));
        Ok(())
    }

    async fn launch_app(&self, app: App) -> Result<(), LaunchError> {
        if self.broken {
            return self.fail(app.id());
        }
        self.launched.lock().unwrap().push(Launched::App(app));
        Ok(())
    }
}

pub struct FakeAi {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl FakeAi {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiClient for FakeAi {
    async fn query(&self, prompt: &str) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone()
    }
}

pub struct FakeEncyclopedia {
    outcome: Result<String, LookupError>,
    requests: Mutex<Vec<(String, u8)>>,
}

impl FakeEncyclopedia {
    pub fn returning(outcome: Result<String, LookupError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, u8)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Encyclopedia for FakeEncyclopedia {
    async fn summarize(&self, topic: &str, sentences: u8) -> Result<String, LookupError> {
        self.requests
            .lock()
            .unwrap()
            .push((topic.to_string(), sentences));
        self.outcome.clone()
    }
}

pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self(
            NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Fixed readings; counts how often a snapshot was taken
#[derive(Default)]
pub struct StaticTelemetry {
    captures: AtomicUsize,
    pub no_battery: bool,
}

impl StaticTelemetry {
    pub fn without_battery() -> Self {
        Self {
            no_battery: true,
            ..Self::default()
        }
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl TelemetrySource for StaticTelemetry {
    fn battery(&self) -> TelemetryResult<BatteryStatus> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        if self.no_battery {
            return Err(TelemetryError::NotAvailable("Battery"));
        }
        Ok(BatteryStatus {
            percent: 87.0,
            charging: true,
        })
    }

    fn disk(&self) -> TelemetryResult<DiskUsage> {
        Ok(DiskUsage {
            percent_used: 42.0,
            total_bytes: 512 * 1024 * 1024 * 1024,
        })
    }

    fn cpu(&self) -> TelemetryResult<CpuUsage> {
        Ok(CpuUsage { percent: 12.5 })
    }
}

/// A dispatcher wired to fakes, with handles kept for assertions
pub struct Harness {
    pub speaker: Arc<RecordingSpeaker>,
    pub clipboard: Arc<FakeClipboard>,
    pub launcher: Arc<FakeLauncher>,
    pub ai: Arc<FakeAi>,
    pub encyclopedia: Arc<FakeEncyclopedia>,
    pub clock: Arc<FixedClock>,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            speaker: Arc::new(RecordingSpeaker::default()),
            clipboard: Arc::new(FakeClipboard::default()),
            launcher: Arc::new(FakeLauncher::default()),
            ai: Arc::new(FakeAi::answering("Rust is a systems programming language.")),
            encyclopedia: Arc::new(FakeEncyclopedia::returning(Ok(
                "Alan Turing was an English mathematician.".to_string(),
            ))),
            clock: Arc::new(FixedClock::at(2024, 1, 5, 14, 15)),
        }
    }
}

impl Harness {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            speaker: self.speaker.clone(),
            clipboard: self.clipboard.clone(),
            launcher: self.launcher.clone(),
            ai: self.ai.clone(),
            encyclopedia: self.encyclopedia.clone(),
            clock: self.clock.clone(),
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.collaborators())
    }

    pub fn spoken(&self) -> Vec<String> {
        self.speaker.spoken()
    }
}
