//! Configuration file parsing.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! configuration that calls `sum`, reads the whole input and logs warnings
//! to stderr.
//!
//! ```toml
//! [invoke]
//! export = "sum"
//!
//! [input]
//! single_read = false
//!
//! [logging]
//! level = "wasm_invoke=debug"
//! format = "json"
//! output = "/var/log/wasm-invoke.log"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::{DEFAULT_EXPORT, Options, ReadMode};

/// Configuration loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Invocation settings.
    pub invoke: InvokeConfig,
    /// Input stream settings.
    pub input: InputConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Which export to call.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InvokeConfig {
    /// Export name.
    pub export: String,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            export: DEFAULT_EXPORT.to_string(),
        }
    }
}

/// Input stream settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Stop after a single 1024-byte read, like the legacy tool.
    pub single_read: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive, e.g. `warn` or `wasm_invoke=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// `stderr` or a file path to append to. Stdout carries the result.
    pub output: String,
    /// Include timestamps.
    pub timestamps: bool,
    /// Include the event target (module path).
    pub target: bool,
    /// Use ANSI colors when writing text to a terminal.
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            timestamps: false,
            target: false,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Pipeline options described by this configuration.
    pub fn options(&self) -> Options {
        Options {
            export: self.invoke.export.clone(),
            read_mode: if self.input.single_read {
                ReadMode::SingleRead
            } else {
                ReadMode::ToEnd
            },
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
