#![forbid(unsafe_code)]

//! Per-character render output.

/// How a character should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanState {
    /// Locked to the target, or no cycle is scrambling.
    Revealed,
    /// A placeholder glyph mid-cycle.
    Encrypted,
}

/// One displayed character and its styling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Position in the text, in grapheme clusters.
    pub index: usize,
    /// Glyph currently displayed at `index`.
    pub glyph: &'a str,
    pub state: SpanState,
}

impl Span<'_> {
    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.state == SpanState::Revealed
    }
}
