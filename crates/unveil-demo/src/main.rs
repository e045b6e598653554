#![forbid(unsafe_code)]

//! Unveil demo binary entry point.

use anyhow::Result;
use clap::Parser;
use unveil_demo::cli::Opts;

fn main() -> Result<()> {
    let opts = Opts::parse();
    unveil_demo::run(&opts)
}
