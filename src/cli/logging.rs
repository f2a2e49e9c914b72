//! Logging initialization for the binary.
//!
//! Stdout carries the call result, so events go to stderr or a file.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::sync::Arc;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use super::config::{LogFormat, LoggingConfig};

/// Initialize the tracing subscriber based on configuration.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;
    let (writer, ansi) = make_writer(config)?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match (config.format, config.timestamps) {
        (LogFormat::Text, true) => registry
            .with(text_layer(config, ansi).with_writer(writer))
            .try_init(),
        (LogFormat::Text, false) => registry
            .with(text_layer(config, ansi).with_writer(writer).without_time())
            .try_init(),
        (LogFormat::Json, true) => registry
            .with(json_layer(config).with_writer(writer))
            .try_init(),
        (LogFormat::Json, false) => registry
            .with(json_layer(config).with_writer(writer).without_time())
            .try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

fn text_layer<S>(config: &LoggingConfig, ansi: bool) -> fmt::Layer<S> {
    fmt::layer()
        .with_ansi(ansi)
        .with_target(config.target)
        .with_span_events(FmtSpan::NONE)
}

fn json_layer<S>(
    config: &LoggingConfig,
) -> fmt::Layer<S, fmt::format::JsonFields, fmt::format::Format<fmt::format::Json>> {
    fmt::layer()
        .json()
        .with_target(config.target)
        .with_span_events(FmtSpan::NONE)
}

/// Pick the event sink; the flag says whether ANSI colors are appropriate.
fn make_writer(config: &LoggingConfig) -> Result<(BoxMakeWriter, bool), LoggingError> {
    match config.output.as_str() {
        "stderr" => Ok((
            BoxMakeWriter::new(io::stderr),
            config.color && io::stderr().is_terminal(),
        )),
        "stdout" => Err(LoggingError::StdoutReserved),
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::FileOpen(path.to_string(), e))?;
            Ok((BoxMakeWriter::new(Arc::new(file)), false))
        }
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug)]
pub enum LoggingError {
    /// Invalid log filter string.
    InvalidFilter(String),
    /// Failed to open log file.
    FileOpen(String, io::Error),
    /// Stdout is reserved for the call result.
    StdoutReserved,
    /// A global subscriber was already installed.
    Init(String),
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => write!(f, "Invalid log filter: {}", msg),
            LoggingError::FileOpen(path, e) => {
                write!(f, "Failed to open log file '{}': {}", path, e)
            }
            LoggingError::StdoutReserved => {
                write!(f, "Logging to stdout is not supported; stdout carries the result")
            }
            LoggingError::Init(msg) => write!(f, "Failed to install log subscriber: {}", msg),
        }
    }
}

impl std::error::Error for LoggingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter() {
        let config = LoggingConfig {
            level: "wasm_invoke=notalevel".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::InvalidFilter(_))));
    }

    #[test]
    fn test_stdout_rejected() {
        let config = LoggingConfig {
            output: "stdout".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::StdoutReserved)));
    }
}
