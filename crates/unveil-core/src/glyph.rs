#![forbid(unsafe_code)]

//! Grapheme-level text helpers.
//!
//! The reveal engine treats one extended grapheme cluster as one character:
//! scrambling never splits a combining sequence or an emoji ZWJ sequence, and
//! the displayed string always has as many clusters as the target.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The only glyph that is never substituted.
pub const SPACE: &str = " ";

/// Split `text` into owned grapheme clusters.
pub fn graphemes(text: &str) -> Vec<String> {
    text.graphemes(true).map(str::to_owned).collect()
}

/// Number of grapheme clusters in `text`.
#[inline]
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Whether `glyph` is the literal space that scrambling leaves untouched.
#[inline]
pub fn is_space(glyph: &str) -> bool {
    glyph == SPACE
}

/// Terminal display width of a single glyph, never less than one cell for a
/// non-empty glyph.
#[inline]
pub fn glyph_width(glyph: &str) -> u16 {
    if glyph.is_empty() {
        return 0;
    }
    UnicodeWidthStr::width(glyph).clamp(1, u16::MAX as usize) as u16
}

/// Terminal display width of a whole string, summed per grapheme.
pub fn display_width(text: &str) -> u16 {
    text.graphemes(true)
        .fold(0u16, |acc, g| acc.saturating_add(glyph_width(g)))
}
