//! Diagnostics for caller-visible failures.
//!
//! With the `tracing` feature these forward to `tracing` events under the
//! `tessera_ml_kem` target. Without it they expand to nothing. Only public
//! facts are logged (lengths, which check failed), never key or message bytes.

/// Input rejected by a length or key check.
#[cfg(feature = "tracing")]
macro_rules! log_rejection {
    ($($arg:tt)+) => {
        ::tracing::debug!(target: "tessera_ml_kem", $($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_rejection {
    ($($arg:tt)+) => {};
}

/// An operation could not run at all, e.g. the random source failed.
#[cfg(feature = "tracing")]
macro_rules! log_failure {
    ($($arg:tt)+) => {
        ::tracing::warn!(target: "tessera_ml_kem", $($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_failure {
    ($($arg:tt)+) => {};
}

pub(crate) use log_failure;
pub(crate) use log_rejection;
