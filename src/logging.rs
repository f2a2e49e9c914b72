//! Conditional logging macros for the pipeline stages.
//!
//! With the `logging` feature these forward to `tracing`; without it they
//! expand to nothing, so the library carries no subscriber requirements.
//! Failures are returned as [`Error`](crate::Error) values and logged at
//! debug level only.
//!
//! ```rust,ignore
//! use crate::logging::debug;
//!
//! debug!(len = bytes.len(), "read request");
//! ```

/// Very detailed internal operations (individual parameter conversions).
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// Stage boundaries of the pipeline.
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Outcome of a completed call.
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Behavior that is legal but probably not what the caller wanted.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_info as info;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;
