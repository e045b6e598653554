#![forbid(unsafe_code)]

//! Reveal ordering for sequential mode.
//!
//! [`RevealDirection::next_index`] is a pure function of the revealed set and
//! the text length. The driver calls it once per tick while the set is not
//! full.

use std::fmt;

/// Spatial order in which positions lock to their final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealDirection {
    /// Ascending from index 0.
    #[default]
    Start,
    /// Descending from the last index.
    End,
    /// Alternating outward from the middle index.
    Center,
}

impl RevealDirection {
    /// Parse a direction name. Unrecognized names fall back to
    /// [`RevealDirection::Start`].
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "end" => Self::End,
            "center" | "centre" => Self::Center,
            _ => Self::Start,
        }
    }

    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Center => "center",
        }
    }

    /// Index to reveal next, given the current revealed set and text length.
    ///
    /// `Center` alternates `middle + k/2` (even `k`) and `middle - k/2 - 1`
    /// (odd `k`), where `k` is the revealed count. A candidate that is out of
    /// bounds or already revealed falls back to the lowest unrevealed index;
    /// with nothing left it returns 0.
    pub fn next_index(self, revealed: &RevealedSet, len: usize) -> usize {
        let k = revealed.len();
        match self {
            Self::Start => k,
            Self::End => len.saturating_sub(1).saturating_sub(k),
            Self::Center => {
                let middle = len / 2;
                let offset = k / 2;
                let candidate = if k % 2 == 0 {
                    middle.checked_add(offset)
                } else {
                    middle.checked_sub(offset + 1)
                };
                match candidate {
                    Some(i) if i < len && !revealed.contains(i) => i,
                    _ => (0..len).find(|&i| !revealed.contains(i)).unwrap_or(0),
                }
            }
        }
    }
}

impl From<&str> for RevealDirection {
    fn from(name: &str) -> Self {
        Self::parse_lenient(name)
    }
}

impl fmt::Display for RevealDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indices permanently locked to the target during one cycle.
///
/// Keeps both a membership mask and the insertion order, so callers can ask
/// "is `i` revealed" in O(1) and replay the order in which positions locked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealedSet {
    mask: Vec<bool>,
    order: Vec<usize>,
}

impl RevealedSet {
    /// Empty set sized for a text of `len` characters.
    pub fn with_len(len: usize) -> Self {
        Self {
            mask: vec![false; len],
            order: Vec::with_capacity(len),
        }
    }

    /// Number of revealed indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is revealed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `index` is revealed. Out-of-range indices never are.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Whether every index of the text is revealed.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.order.len() >= self.mask.len()
    }

    /// Reveal `index`. Returns `false` if it was already revealed or out of
    /// range.
    pub fn insert(&mut self, index: usize) -> bool {
        match self.mask.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                self.order.push(index);
                true
            }
            _ => false,
        }
    }

    /// Forget every revealed index, keeping the text length.
    pub fn clear(&mut self) {
        self.mask.iter_mut().for_each(|m| *m = false);
        self.order.clear();
    }

    /// Indices in the order they were revealed.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}
