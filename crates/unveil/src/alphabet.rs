#![forbid(unsafe_code)]

//! Candidate substitution characters.

use rand::Rng;
use unveil_core::glyph;

/// Alphabet used when none is configured.
pub const DEFAULT_CHARACTERS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

/// Ordered set of glyphs that unrevealed positions are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    glyphs: Vec<String>,
}

impl Alphabet {
    /// Every grapheme of `characters`, in order, duplicates included (a
    /// repeated glyph is simply sampled more often).
    pub fn from_characters(characters: &str) -> Self {
        Self {
            glyphs: glyph::graphemes(characters),
        }
    }

    /// Distinct non-space graphemes of `text`, in order of first appearance.
    pub fn from_text(text: &str) -> Self {
        let mut glyphs: Vec<String> = Vec::new();
        for g in glyph::graphemes(text) {
            if !glyph::is_space(&g) && !glyphs.contains(&g) {
                glyphs.push(g);
            }
        }
        Self { glyphs }
    }

    /// Number of candidate glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether there is nothing to sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Candidate glyphs in order.
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Uniformly sample one glyph, or `None` for an empty alphabet.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.glyphs.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.glyphs.len());
        Some(self.glyphs[i].as_str())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::from_characters(DEFAULT_CHARACTERS)
    }
}
