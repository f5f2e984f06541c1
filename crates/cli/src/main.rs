//! Jarvis CLI - runs the voice assistant until told to stop
//!
//! Loads `~/.jarvis/config.toml` (or `--config`), wires up the collaborators
//! and hands control to the session loop. Exits 0 on "exit", Ctrl-C or end
//! of input; exits 1 when the assistant cannot be initialized.

mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use jarvis::JarvisConfig;
use tracing::{error, info};

/// Jarvis - keyword-driven voice assistant
#[derive(Parser, Debug)]
#[command(name = "jarvis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Listen for commands and act on them")]
#[command(long_about = r#"
Jarvis listens for a command, matches it against an ordered keyword table
and speaks the result.

Examples:
  jarvis                             # Start with ~/.jarvis/config.toml
  jarvis --config ./jarvis.toml      # Use a specific config file
  jarvis -v                          # Debug logging
"#)]
struct Cli {
    /// Configuration file (defaults to ~/.jarvis/config.toml)
    #[arg(short, long, env = "JARVIS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> jarvis::Result<JarvisConfig> {
        match &self.config {
            Some(path) => JarvisConfig::load_from(path),
            None => JarvisConfig::load(),
        }
    }

    /// Config for logging setup; defaults stand in when loading fails so
    /// the failure itself can be logged.
    fn load_config_or_default(&self) -> (JarvisConfig, Option<jarvis::JarvisError>) {
        match self.load_config() {
            Ok(config) => (config, None),
            Err(e) => (JarvisConfig::default(), Some(e)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let (config, load_error) = cli.load_config_or_default();

    logging::init(&config.logging, cli.verbose);

    if let Some(e) = load_error {
        error!("Failed to load configuration: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    let mut session = match jarvis::initialize_jarvis(config).await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to initialize Jarvis: {}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let end = session.run().await;
    info!("Jarvis stopped: {:?}", end);

    Ok(())
}
