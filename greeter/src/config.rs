//! Command line arguments and the files they point at

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use greeter_core::Keybindings;
use thiserror::Error;

use crate::action::{parse_actions, Action};
use crate::state::{GreetingState, DEFAULT_GREETING, DEFAULT_PROPOSED_GREETING};

/// Errors that can occur when loading keybindings or action scripts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid key '{key}' bound to '{command}'")]
    InvalidKey { command: String, key: String },
}

/// Greeter - stage a greeting, then commit it
#[derive(Parser, Debug)]
#[command(name = "greeter")]
#[command(about = "A stage-and-commit greeting TUI")]
pub struct Args {
    /// Initial committed greeting
    #[arg(long, default_value = DEFAULT_GREETING)]
    pub greeting: String,

    /// Initial staged greeting
    #[arg(long, default_value = DEFAULT_PROPOSED_GREETING)]
    pub proposed: String,

    /// JSON file of keybindings, e.g. {"quit": ["esc"]}
    #[arg(long, value_name = "PATH")]
    pub keybindings: Option<PathBuf>,

    /// JSON array of actions to dispatch before the UI starts
    #[arg(long, value_name = "PATH")]
    pub actions: Option<PathBuf>,

    /// Skip the terminal UI and print the final state as JSON
    #[arg(long)]
    pub headless: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Everything the app needs to start, resolved from [`Args`]
#[derive(Debug, Clone)]
pub struct Config {
    pub initial: GreetingState,
    pub keybindings: Keybindings,
    pub script: Vec<Action>,
    pub headless: bool,
}

impl Args {
    pub fn load(&self) -> Result<Config, ConfigError> {
        let keybindings = match &self.keybindings {
            Some(path) => load_keybindings(path)?,
            None => default_keybindings(),
        };

        let script = match &self.actions {
            Some(path) => load_actions(path)?,
            None => Vec::new(),
        };

        Ok(Config {
            initial: GreetingState::new(&self.greeting, &self.proposed),
            keybindings,
            script,
            headless: self.headless,
        })
    }
}

pub fn default_keybindings() -> Keybindings {
    Keybindings::new()
        .with("quit", &["esc", "ctrl+c"])
        .with("focus_next", &["tab"])
        .with("focus_prev", &["shift+tab"])
        .with("commit", &["ctrl+s"])
}

/// Load user keybindings and merge them over the defaults.
///
/// A command present in the file replaces its default keys entirely.
pub fn load_keybindings(path: &Path) -> Result<Keybindings, ConfigError> {
    let content = read(path)?;
    let user: Keybindings = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let merged = Keybindings::merge(default_keybindings(), user);
    if let Some((command, key)) = merged.find_invalid() {
        return Err(ConfigError::InvalidKey {
            command: command.to_string(),
            key: key.to_string(),
        });
    }

    Ok(merged)
}

pub fn load_actions(path: &Path) -> Result<Vec<Action>, ConfigError> {
    let content = read(path)?;
    parse_actions(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}
