#![forbid(unsafe_code)]

//! Core: virtual timers, visibility geometry, and grapheme helpers shared by
//! the Unveil reveal engine and its hosts.

pub mod geometry;
pub mod glyph;
pub mod logging;
pub mod timer;

pub use geometry::Rect;
pub use timer::{TimerId, TimerQueue};

// Re-export tracing macros at crate root so `crate::debug!` resolves the same
// way with and without the `tracing` feature.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
