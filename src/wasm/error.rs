//! Error types for WebAssembly module execution.

use thiserror::Error;

/// Errors that can occur while instantiating a module or calling its export.
#[derive(Error, Debug)]
pub enum WasmError {
    /// Wasmtime engine setup error.
    #[error("Wasmtime error: {0}")]
    Wasmtime(#[from] wasmtime::Error),

    /// The module bytes are not a valid WebAssembly binary.
    #[error("Failed to compile wasm module: {0}")]
    Compile(String),

    /// The module could not be instantiated (unresolved imports, start trap).
    #[error("Failed to instantiate wasm module: {0}")]
    Instantiate(String),

    /// Required function not found in the module exports.
    #[error("Function not found in module: {0}")]
    FunctionNotFound(String),

    /// Number of arguments differs from the export's parameter count.
    #[error("Function '{name}' expects {expected} parameter(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// An argument does not fit the export's declared parameter type.
    #[error("Parameter {index} does not match signature: expected {expected}, got {actual}")]
    SignatureMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// The export uses a value type that cannot be passed as a JSON scalar.
    #[error("Unsupported value type: {0}")]
    UnsupportedType(String),

    /// WebAssembly execution trapped (runtime error).
    #[error("Wasm execution trapped: {0}")]
    Trap(String),
}
