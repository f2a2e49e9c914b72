//! Support code for the `wasm-invoke` binary.
//!
//! Loads the optional TOML configuration and installs the tracing
//! subscriber. The binary itself only parses arguments and maps errors to
//! exit statuses.

mod config;
mod logging;

pub use config::{Config, ConfigError, InputConfig, InvokeConfig, LogFormat, LoggingConfig};
pub use logging::{LoggingError, init as init_logging};
