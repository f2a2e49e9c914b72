//! WebAssembly module execution.
//!
//! The [`Invoker`] wraps a wasmtime engine and calls one export of a core
//! module with arguments produced by [`crate::params::adapt`].

mod error;
mod invoker;

pub use error::WasmError;
pub use invoker::{DEFAULT_EXPORT, Invoker};
