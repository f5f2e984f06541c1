//! Rule actions: call a collaborator, then speak the outcome

use tracing::{info, warn};

use super::{replies, Command, Dispatcher, Site};
use crate::{integrations::LookupError, launcher::App, telemetry::TelemetrySnapshot};

const SEARCH_URL: &str = "https://www.google.com/search?q=";

impl Dispatcher {
    pub(super) async fn execute(&self, command: Command, snapshot: &TelemetrySnapshot) {
        match command {
            Command::Terminate => self.say(replies::GOODBYE).await,
            Command::SystemInfo => self.system_info(snapshot).await,
            Command::ClipboardGet => self.clipboard_get().await,
            Command::ClipboardSet { text } => self.clipboard_set(&text).await,
            Command::LaunchApp(app) => self.launch_app(app).await,
            Command::Camera => self.camera().await,
            Command::ClipboardCopy { text } => self.clipboard_copy(&text).await,
            Command::ClipboardShow => self.clipboard_show().await,
            Command::ClipboardIdle => {}
            Command::OpenWebsite(site) => self.open_website(site).await,
            Command::TellTime => self.tell_time().await,
            Command::TellDate => self.tell_date().await,
            Command::Greet => self.say(replies::GREETING).await,
            Command::AskAi { query } => self.ask_ai(&query).await,
            Command::WebSearch { query } => self.web_search(&query).await,
            Command::Encyclopedia { topic } => self.encyclopedia(&topic).await,
            Command::Acknowledge => self.say(replies::ACKNOWLEDGE).await,
            Command::Unknown => self.say(replies::UNKNOWN).await,
        }
    }

    async fn say(&self, text: &str) {
        self.collaborators.speaker.speak(text).await;
    }

    async fn system_info(&self, snapshot: &TelemetrySnapshot) {
        self.say(replies::SYSTEM_INFO_HEADER).await;
        for line in snapshot.lines() {
            self.say(&line).await;
        }
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    async fn clipboard_get(&self) {
        match self.collaborators.clipboard.read().await {
            Ok(text) => self.say(&replies::clipboard_content(&text)).await,
            Err(e) => {
                warn!("Clipboard read failed: {}", e);
                self.say(replies::CLIPBOARD_READ_FAILED).await;
            }
        }
    }

    async fn clipboard_set(&self, text: &str) {
        if text.is_empty() {
            self.say(replies::NOTHING_TO_COPY).await;
            return;
        }

        match self.collaborators.clipboard.write(text).await {
            Ok(()) => self.say(replies::TEXT_COPIED).await,
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.say(replies::CLIPBOARD_WRITE_FAILED).await;
            }
        }
    }

    async fn clipboard_copy(&self, text: &str) {
        if text.is_empty() {
            self.say(replies::NOTHING_TO_COPY).await;
            return;
        }

        match self.collaborators.clipboard.write(text).await {
            Ok(()) => self.say(replies::TEXT_COPIED).await,
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.say(&replies::clipboard_error(&e)).await;
            }
        }
    }

    async fn clipboard_show(&self) {
        match self.collaborators.clipboard.read().await {
            Ok(text) => self.say(&replies::clipboard_content(&text)).await,
            Err(e) => {
                warn!("Clipboard read failed: {}", e);
                self.say(&replies::clipboard_error(&e)).await;
            }
        }
    }

    // ------------------------------------------------------------------
    // Launchers
    // ------------------------------------------------------------------

    async fn launch_app(&self, app: App) {
        match self.collaborators.launcher.launch_app(app).await {
            Ok(()) => {
                info!("Launched {}", app);
                self.say(app.opening_message()).await;
            }
            Err(e) => {
                warn!("Failed to launch {}: {}", app, e);
                self.say(&replies::could_not_open(app.id(), &e)).await;
            }
        }
    }

    async fn camera(&self) {
        match self.collaborators.launcher.launch_app(App::Camera).await {
            Ok(()) => self.say(replies::CAMERA_OPENING).await,
            Err(e) => {
                warn!("Failed to launch camera: {}", e);
                self.say(&replies::could_not_open("camera", &e)).await;
            }
        }
    }

    async fn open_website(&self, site: Site) {
        self.say(&replies::opening_site(site.name())).await;
        self.open_in_browser(site.url()).await;
    }

    async fn open_in_browser(&self, url: &str) {
        if let Err(e) = self.collaborators.launcher.open_url(url).await {
            warn!("Failed to open {}: {}", url, e);
            self.say(&replies::could_not_open("browser", &e)).await;
        }
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    async fn tell_time(&self) {
        let now = self.collaborators.clock.now().format("%I:%M %p").to_string();
        self.say(&replies::current_time(&now)).await;
    }

    async fn tell_date(&self) {
        let today = self.collaborators.clock.now().format("%B %d, %Y").to_string();
        self.say(&replies::current_date(&today)).await;
    }

    // ------------------------------------------------------------------
    // Remote lookups
    // ------------------------------------------------------------------

    async fn ask_ai(&self, query: &str) {
        if query.is_empty() {
            self.say(replies::ASK_GEMINI_PROMPT).await;
            return;
        }

        let answer = self.collaborators.ai.query(query).await;
        self.say(&answer).await;
    }

    async fn web_search(&self, query: &str) {
        if query.is_empty() {
            self.say(replies::SEARCH_PROMPT).await;
            return;
        }

        self.say(&replies::searching_for(query)).await;
        self.open_in_browser(&format!("{}{}", SEARCH_URL, query)).await;
    }

    async fn encyclopedia(&self, topic: &str) {
        if topic.is_empty() {
            self.say(replies::WIKIPEDIA_PROMPT).await;
            return;
        }

        let reply = match self
            .collaborators
            .encyclopedia
            .summarize(topic, self.summary_sentences)
            .await
        {
            Ok(summary) => replies::according_to_wikipedia(&summary),
            Err(LookupError::Ambiguous) => replies::WIKIPEDIA_AMBIGUOUS.to_string(),
            Err(LookupError::NotFound) => replies::WIKIPEDIA_NOT_FOUND.to_string(),
            Err(LookupError::Unavailable(reason)) => {
                warn!("Wikipedia unavailable: {}", reason);
                replies::WIKIPEDIA_UNAVAILABLE.to_string()
            }
        };
        self.say(&reply).await;
    }
}
