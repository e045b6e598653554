#![forbid(unsafe_code)]

//! Terminal landing page for the Unveil decrypted-text engine.
//!
//! The page is a list of text blocks, each backed by a
//! [`DecryptedText`](unveil::DecryptedText). Mouse motion hovers blocks,
//! scrolling brings view-mode blocks into sight, and after a delay the
//! headline blocks switch to looping.

pub mod app;
pub mod cli;
pub mod logging;
pub mod page;
pub mod render;
pub mod session;
pub mod theme;

use std::io;

use anyhow::Result;

use crate::app::App;
use crate::cli::Opts;
use crate::page::Page;
use crate::session::{SessionOptions, TerminalSession};

/// Load the page, take over the terminal, and run until quit.
pub fn run(opts: &Opts) -> Result<()> {
    logging::init(opts.log_file.as_deref())?;

    let page = match &opts.page {
        Some(path) => Page::load(path)?,
        None => Page::landing()?,
    };
    let mut app = App::new(page, opts.app_options())?;

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: !opts.no_mouse,
    })?;
    let mut stdout = io::stdout().lock();
    let result = app::run(&mut app, &session, &mut stdout);
    drop(stdout);
    drop(session);
    result
}
