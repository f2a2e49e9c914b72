//! Unified error type for the wasm-invoke library.
//!
//! Every pipeline stage reports failures through [`Error`], so callers can
//! classify a failure and pick an exit status without knowing which stage
//! produced it.

use thiserror::Error;

#[cfg(feature = "wasm")]
use crate::wasm::WasmError;

/// Exit status for a successful run.
pub const EXIT_OK: u8 = 0;
/// Exit status when the request could not be read or the result written.
pub const EXIT_IO: u8 = 1;
/// Exit status when the request is not valid JSON or has the wrong shape.
pub const EXIT_PARSE: u8 = 2;
/// Exit status when a parameter value cannot be coerced to its declared type.
pub const EXIT_TYPE_MISMATCH: u8 = 3;
/// Exit status when the WebAssembly engine fails.
pub const EXIT_ENGINE: u8 = 4;
/// Exit status for configuration or logging setup failures.
pub const EXIT_SETUP: u8 = 5;

/// Unified error type for all wasm-invoke operations.
///
/// # Example
///
/// ```ignore
/// use wasm_invoke::{Request, Result};
///
/// fn decode(input: &[u8]) -> Result<usize> {
///     let request = Request::from_slice(input)?;
///     Ok(request.params.len())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the request from the input stream failed.
    #[error("I/O error reading request: {0}")]
    Read(#[source] std::io::Error),

    /// Writing the result to the output stream failed.
    #[error("I/O error writing result: {0}")]
    Write(#[source] std::io::Error),

    /// The request is not well-formed JSON or does not match the request shape.
    #[error("Request parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request was rejected for a reason other than JSON decoding.
    #[error("Request parsing error: {0}")]
    Parse(String),

    /// A parameter tagged with a numeric type carries a non-numeric value.
    #[error("Type mismatch for parameter {index}: expected {expected}, got {found}")]
    TypeMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    /// Error from the WebAssembly engine.
    #[cfg(feature = "wasm")]
    #[error(transparent)]
    Wasm(#[from] WasmError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a parse error from a string message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Returns `true` if this is an input read error.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read(_))
    }

    /// Returns `true` if this is a request parsing error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Parse(_))
    }

    /// Returns `true` if writing the result failed.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }

    /// Returns `true` if this is a parameter type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns `true` if this is a WebAssembly engine error.
    #[cfg(feature = "wasm")]
    pub fn is_wasm(&self) -> bool {
        matches!(self, Self::Wasm(_))
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Read(_) | Self::Write(_) => EXIT_IO,
            Self::Json(_) | Self::Parse(_) => EXIT_PARSE,
            Self::TypeMismatch { .. } => EXIT_TYPE_MISMATCH,
            #[cfg(feature = "wasm")]
            Self::Wasm(_) => EXIT_ENGINE,
        }
    }
}
