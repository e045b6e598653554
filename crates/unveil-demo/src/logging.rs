#![forbid(unsafe_code)]

//! Log file setup.
//!
//! The terminal belongs to the renderer, so logs only go to a file, and only
//! when one is given.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `UNVEIL_LOG=unveil=trace`.
pub const LOG_ENV: &str = "UNVEIL_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Install a global fmt subscriber appending to `path`. Does nothing for
/// `None`.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}
