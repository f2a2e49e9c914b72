//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use wasm_invoke::prelude::*;
//!
//! let request = Request::from_slice(input)?;
//! let args = adapt(&request.params)?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Pipeline stages
pub use crate::input::{ReadMode, read_input};
pub use crate::output::{ResultValue, ReturnValue, write_result};
pub use crate::params::{Arg, adapt};
pub use crate::request::{ParamType, Parameter, Request};

// WASM execution types (requires "wasm" feature)
#[cfg(feature = "wasm")]
pub use crate::wasm::{DEFAULT_EXPORT, Invoker, WasmError};
#[cfg(feature = "wasm")]
pub use crate::{Options, execute};
