//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/chatgraph/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/chatgraph/` (~/.config/chatgraph/)
//! - State/Logs: `$XDG_STATE_HOME/chatgraph/` (~/.local/state/chatgraph/)

use crate::emit::OutputFormat;
use crate::error::{Error, Result};
use crate::stats::StatsOptions;
use crate::types::TranscriptFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Graph building and output options
    #[serde(default)]
    pub graph: GraphConfig,

    /// Transcript ingestion options
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Text statistics options
    #[serde(default)]
    pub stats: StatsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Graph building configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct GraphConfig {
    /// Keep only edges touching the N most interactive participants.
    /// `None` keeps every edge.
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Output format; inferred from the output path when absent
    #[serde(default)]
    pub output_format: Option<OutputFormat>,
}

impl GraphConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.top_n == Some(0) {
            return Err(Error::Config(
                "graph.top_n must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Transcript ingestion configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct IngestConfig {
    /// Input transcript format
    #[serde(default)]
    pub format: TranscriptFormat,
}

/// Text statistics configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StatsConfig {
    /// Stopword list, one word per line
    #[serde(default)]
    pub stopwords: Option<PathBuf>,

    /// Number of most frequent words to report
    #[serde(default = "default_top_words")]
    pub top_words: usize,

    /// Number of most active participants to report
    #[serde(default = "default_top_participants")]
    pub top_participants: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            stopwords: None,
            top_words: default_top_words(),
            top_participants: default_top_participants(),
        }
    }
}

fn default_top_words() -> usize {
    50
}

fn default_top_participants() -> usize {
    10
}

impl StatsConfig {
    pub fn options(&self) -> StatsOptions {
        StatsOptions {
            top_words: self.top_words,
            top_participants: self.top_participants,
            ..Default::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.graph.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/chatgraph/config.toml` (~/.config/chatgraph/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("chatgraph").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/chatgraph/` (~/.local/state/chatgraph/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("chatgraph")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/chatgraph/chatgraph.log` (~/.local/state/chatgraph/chatgraph.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("chatgraph.log")
    }
}
