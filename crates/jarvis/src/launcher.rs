//! Launching URLs and desktop applications

use std::{collections::HashMap, fmt, process::Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::LauncherConfig;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to open {target}: {reason}")]
    OpenFailed { target: String, reason: String },

    #[error("launcher command for {0} is empty")]
    EmptyCommand(String),

    #[error("launcher task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// How an application is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Opened in the default browser
    Url(&'static str),
    /// Handed to the OS protocol handler (`ms-settings:`, ...)
    Uri(&'static str),
}

/// Applications the assistant can open, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum App {
    Chrome,
    WhatsApp,
    Camera,
    Settings,
    Browser,
    Calculator,
}

impl App {
    pub const ALL: [App; 6] = [
        App::Chrome,
        App::WhatsApp,
        App::Camera,
        App::Settings,
        App::Browser,
        App::Calculator,
    ];

    /// Keyword that names the app in an utterance
    pub fn id(&self) -> &'static str {
        match self {
            App::Chrome => "chrome",
            App::WhatsApp => "whatsapp",
            App::Camera => "camera",
            App::Settings => "settings",
            App::Browser => "browser",
            App::Calculator => "calculator",
        }
    }

    pub fn target(&self) -> LaunchTarget {
        match self {
            App::Chrome | App::Browser => LaunchTarget::Url("https://www.google.com"),
            App::WhatsApp => LaunchTarget::Url("https://web.whatsapp.com"),
            App::Settings => LaunchTarget::Uri("ms-settings:"),
            App::Camera => LaunchTarget::Uri("microsoft.windows.camera:"),
            App::Calculator => LaunchTarget::Uri("calculator:"),
        }
    }

    pub fn opening_message(&self) -> &'static str {
        match self {
            App::Chrome | App::Browser => "Opening browser...",
            App::WhatsApp => "Opening WhatsApp Web...",
            App::Settings => "Opening Windows Settings...",
            App::Camera => "Opening Camera...",
            App::Calculator => "Opening Calculator...",
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[async_trait]
pub trait Launcher: Send + Sync {
    async fn open_url(&self, url: &str) -> Result<(), LaunchError>;
    async fn launch_app(&self, app: App) -> Result<(), LaunchError>;
}

/// Opens URLs and protocol handlers with the platform opener; apps listed
/// in `launcher.apps` run their configured command instead.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    overrides: HashMap<String, Vec<String>>,
}

impl SystemLauncher {
    pub fn new(config: &LauncherConfig) -> Self {
        Self {
            overrides: config.apps.clone(),
        }
    }

    async fn open_target(target: &str) -> Result<(), LaunchError> {
        let owned = target.to_string();
        tokio::task::spawn_blocking(move || open::that(&owned))
            .await?
            .map_err(|e| LaunchError::OpenFailed {
                target: target.to_string(),
                reason: e.to_string(),
            })
    }

    fn spawn_override(app: App, command: &[String]) -> Result<(), LaunchError> {
        let (binary, args) = command
            .split_first()
            .ok_or_else(|| LaunchError::EmptyCommand(app.id().to_string()))?;

        Command::new(binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LaunchError::OpenFailed {
                target: binary.clone(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        debug!("Opening URL {}", url);
        Self::open_target(url).await
    }

    async fn launch_app(&self, app: App) -> Result<(), LaunchError> {
        if let Some(command) = self.overrides.get(app.id()) {
            info!("Launching {} with configured command", app);
            return Self::spawn_override(app, command);
        }

        match app.target() {
            LaunchTarget::Url(url) => self.open_url(url).await,
            LaunchTarget::Uri(uri) => {
                debug!("Launching {} via {}", app, uri);
                Self::open_target(uri).await
            }
        }
    }
}
