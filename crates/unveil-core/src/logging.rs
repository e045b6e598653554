#![forbid(unsafe_code)]

//! Logging shims for the core crate.
//!
//! With the `tracing` feature the macros below are plain re-exports of the
//! `tracing` crate. Without it they expand to nothing, so timer bookkeeping
//! stays free of logging cost in builds that do not want it.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
