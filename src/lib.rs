//! Invoke an exported WebAssembly function from a JSON request.
//!
//! A request carries a module binary and an ordered list of typed
//! parameters. The library decodes it, adapts each parameter to a wasm
//! value, calls the export (named `sum` unless configured otherwise) with
//! wasmtime and writes the result followed by a newline.
//!
//! # Quick Start
//!
//! ```ignore
//! use wasm_invoke::prelude::*;
//!
//! let input = br#"{"bytes":"AGFzbQ...","params":[{"value":40,"type":"I32"},{"value":2,"type":"I32"}]}"#;
//! let mut out = Vec::new();
//! execute(&input[..], &mut out, &Options::default())?;
//! assert_eq!(out, b"42\n");
//! ```
//!
//! # Modules
//!
//! - [`input`] - Reading the request body
//! - [`request`] - Request envelope decoding
//! - [`params`] - Parameter adaptation by declared type
//! - [`wasm`] - Module instantiation and export invocation (requires `wasm` feature)
//! - [`output`] - Result printing
//! - [`cli`] - Configuration and logging setup for the binary (requires `cli` feature)
//!
//! # Feature Flags
//!
//! - `wasm` - Enable WebAssembly execution (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features
//!
//! # Testing
//!
//! `cargo test` runs the unit, pipeline and property tests. The tests that
//! spawn the `wasm-invoke` binary (`tests/cli_tests.rs`) need the binary to
//! be built, so they only run with `cargo test --features cli`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod input;
mod logging;
pub mod output;
pub mod params;
pub mod prelude;
pub mod request;
#[cfg(feature = "wasm")]
pub mod wasm;

mod error;

pub use error::{
    EXIT_ENGINE, EXIT_IO, EXIT_OK, EXIT_PARSE, EXIT_SETUP, EXIT_TYPE_MISMATCH, Error, Result,
};
pub use input::{ReadMode, read_input};
pub use output::{ResultValue, ReturnValue, write_result};
pub use params::{Arg, adapt};
pub use request::{ModuleBytes, ParamType, Parameter, Request};

#[cfg(feature = "wasm")]
pub use wasm::{DEFAULT_EXPORT, Invoker, WasmError};

/// Settings for a single [`execute`] run.
#[cfg(feature = "wasm")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Name of the export to call.
    pub export: String,
    /// How much of the input stream to read.
    pub read_mode: ReadMode,
}

#[cfg(feature = "wasm")]
impl Default for Options {
    fn default() -> Self {
        Self {
            export: DEFAULT_EXPORT.to_string(),
            read_mode: ReadMode::default(),
        }
    }
}

/// Read a request from `reader`, call the export and write the result to `writer`.
///
/// Nothing is written unless the call succeeded.
#[cfg(feature = "wasm")]
pub fn execute<R, W>(reader: R, writer: W, options: &Options) -> Result<ReturnValue>
where
    R: std::io::Read,
    W: std::io::Write,
{
    let input = read_input(reader, options.read_mode)?;
    let request = Request::from_slice(&input)?;
    let args = adapt(&request.params)?;

    let invoker = Invoker::new()?;
    let result = invoker.invoke(request.bytes.as_slice(), &options.export, &args)?;

    write_result(writer, &result)?;
    Ok(result)
}
