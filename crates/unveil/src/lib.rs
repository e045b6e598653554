#![forbid(unsafe_code)]

//! Unveil: text that decrypts itself.
//!
//! A [`DecryptedText`] shows a target string, scrambles it with placeholder
//! glyphs when triggered, and resolves back to the target either after a
//! fixed number of ticks or one locked position per tick.
//!
//! # Pieces
//!
//! - [`ScrambleDriver`](scramble::ScrambleDriver) - per-tick mutation of the displayed text
//! - [`RevealDirection`] - which position locks next in sequential mode
//! - [`ModeController`](mode::ModeController) - hover, view, and loop triggers
//! - [`DecryptedText`] - the component that owns the timers and wires the rest
//!
//! Hosts drive time explicitly with [`DecryptedText::advance`]; nothing in
//! this crate sleeps or spawns threads.

pub mod alphabet;
pub mod config;
pub mod error;
pub mod mode;
pub mod policy;
pub mod scramble;
pub mod span;
pub mod text;

pub use alphabet::{Alphabet, DEFAULT_CHARACTERS};
pub use config::{AnimateOn, CharacterSource, DecryptConfig, LoopTiming};
pub use error::{ConfigError, TriggerParseError};
pub use mode::{Activation, LoopPhase};
pub use policy::{RevealDirection, RevealedSet};
pub use scramble::CycleState;
pub use span::{Span, SpanState};
pub use text::DecryptedText;

// Re-exported so hosts can build visibility rectangles without a direct
// dependency on the core crate.
pub use unveil_core::geometry::Rect;
