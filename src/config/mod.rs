//! Configuration for the dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/tickerdash/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod panels;
mod serialization;


pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use panels::{ControlsVariant, FilePanel, FilePanels, PanelConfig, Panels};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// UI poll period; paging timers resolve to this granularity
pub const DEFAULT_TICK_MS: u64 = 100;

pub const DEFAULT_TRANSITION_MS: u64 = 500;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL serving /tickers, /news, /github/trending, /hackernews/top
    pub backend_url: String,

    /// Serve built-in mock data instead of calling the backend
    pub demo_mode: bool,

    /// Event loop tick in milliseconds
    pub tick_ms: u64,

    /// Page transition animation length in milliseconds
    pub transition_ms: u64,

    pub logging: LoggingConfig,

    pub panels: Panels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            demo_mode: false,
            tick_ms: DEFAULT_TICK_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            logging: LoggingConfig::default(),
            panels: Panels::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub backend_url: Option<String>,
    pub demo_mode: Option<bool>,
    pub tick_ms: Option<u64>,
    pub transition_ms: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [panels.<feed>] sections
    pub panels: Option<FilePanels>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl Config {
    /// Get the config file path: ~/.config/tickerdash/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("tickerdash").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    ///
    /// Best effort: a missing config directory is not worth failing startup over.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse the config file; a missing file means defaults
    pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    ///
    /// A config file that exists but does not parse is an error; a broken
    /// config should fail fast instead of silently falling back to defaults.
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge file settings with environment overrides
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        // Backend URL: env > file > default
        let backend_url = env("TICKERDASH_BACKEND_URL")
            .or(file.backend_url)
            .unwrap_or(defaults.backend_url);

        // Demo mode: env > file > default
        let demo_mode = env("TICKERDASH_DEMO")
            .map(|v| parse_flag(&v))
            .or(file.demo_mode)
            .unwrap_or(defaults.demo_mode);

        // Tick: env > file > default (unparseable env values are ignored)
        let tick_ms = env("TICKERDASH_TICK_MS")
            .and_then(|v| v.parse().ok())
            .or(file.tick_ms)
            .unwrap_or(defaults.tick_ms);
        if tick_ms == 0 {
            bail!("tick_ms must be greater than zero");
        }

        let transition_ms = file.transition_ms.unwrap_or(defaults.transition_ms);

        let logging = LoggingConfig::from_file(file.logging);
        let panels = Panels::from_file(file.panels);

        Ok(Self {
            backend_url,
            demo_mode,
            tick_ms,
            transition_ms,
            logging,
            panels,
        })
    }
}
