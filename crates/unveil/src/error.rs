#![forbid(unsafe_code)]

//! Error types for the reveal engine.

use thiserror::Error;

/// Rejected configuration.
///
/// The engine itself has no runtime failure modes; everything that could go
/// wrong is caught here, when a component is built or reconfigured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A zero tick interval would never let time advance between ticks.
    #[error("tick interval must be greater than zero")]
    ZeroSpeed,

    /// The fixed substitution alphabet has no characters to sample from.
    #[error("substitution alphabet is empty")]
    EmptyAlphabet,

    /// Visibility threshold outside `(0, 1]`.
    #[error("visibility threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f32),
}

/// Unrecognized trigger mode name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown trigger mode {0:?} (expected hover, view, or loop)")]
pub struct TriggerParseError(pub String);

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
