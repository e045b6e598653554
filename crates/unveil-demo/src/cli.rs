#![forbid(unsafe_code)]

//! Command-line options for the demo.
//!
//! Every flag can also be set through an `UNVEIL_DEMO_*` environment
//! variable; explicit flags win.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::AppOptions;

#[derive(Debug, Parser)]
#[command(name = "unveil-demo", version)]
#[command(about = "Terminal landing page for the Unveil decrypted-text engine", long_about = None)]
pub struct Opts {
    /// Page description in TOML (default: the built-in landing page)
    #[arg(long, env = "UNVEIL_DEMO_PAGE")]
    pub page: Option<PathBuf>,

    /// Append logs to this file; filter with UNVEIL_LOG
    #[arg(long, env = "UNVEIL_DEMO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Auto-quit after N milliseconds (0 = disabled)
    #[arg(long, env = "UNVEIL_DEMO_EXIT_AFTER_MS", default_value_t = 0)]
    pub exit_after_ms: u64,

    /// Switch promotable blocks to loop mode after N milliseconds (0 = never)
    #[arg(long, env = "UNVEIL_DEMO_SWITCH_TO_LOOP_AFTER_MS", default_value_t = 5_000)]
    pub switch_to_loop_after_ms: u64,

    /// Seed the scramblers for a reproducible run
    #[arg(long, env = "UNVEIL_DEMO_SEED")]
    pub seed: Option<u64>,

    /// Disable mouse event capture (use Tab to hover blocks)
    #[arg(long, env = "UNVEIL_DEMO_NO_MOUSE")]
    pub no_mouse: bool,
}

impl Opts {
    pub fn app_options(&self) -> AppOptions {
        let nonzero = |ms: u64| (ms > 0).then(|| Duration::from_millis(ms));
        AppOptions {
            seed: self.seed,
            switch_to_loop_after: nonzero(self.switch_to_loop_after_ms),
            exit_after: nonzero(self.exit_after_ms),
        }
    }
}
