#![forbid(unsafe_code)]

//! Colors for revealed and encrypted glyphs.

use crossterm::style::{Color, ContentStyle, Stylize};
use unveil::SpanState;

use crate::page::BlockStyle;

/// Styles for the two span states of one block style.
#[derive(Debug, Clone, Copy)]
pub struct StylePair {
    pub revealed: ContentStyle,
    pub encrypted: ContentStyle,
}

impl StylePair {
    pub fn for_state(&self, state: SpanState) -> ContentStyle {
        match state {
            SpanState::Revealed => self.revealed,
            SpanState::Encrypted => self.encrypted,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title: StylePair,
    pub heading: StylePair,
    pub body: StylePair,
    pub dock: StylePair,
    pub status: ContentStyle,
}

impl Theme {
    /// Pale metal on black, with dimmed zinc placeholders.
    pub fn metallic() -> Self {
        let zinc = Color::Rgb {
            r: 228,
            g: 228,
            b: 231,
        };
        let silver = Color::Rgb {
            r: 200,
            g: 200,
            b: 220,
        };
        let lavender = Color::Rgb {
            r: 243,
            g: 232,
            b: 255,
        };
        Self {
            title: StylePair {
                revealed: ContentStyle::new().with(silver).bold(),
                encrypted: ContentStyle::new().with(Color::Magenta).bold().dim(),
            },
            heading: StylePair {
                revealed: ContentStyle::new().with(Color::White).bold(),
                encrypted: ContentStyle::new().with(zinc).bold().dim(),
            },
            body: StylePair {
                revealed: ContentStyle::new().with(Color::Grey),
                encrypted: ContentStyle::new().with(Color::DarkGrey),
            },
            dock: StylePair {
                revealed: ContentStyle::new().with(lavender).bold(),
                encrypted: ContentStyle::new().with(Color::DarkMagenta),
            },
            status: ContentStyle::new().with(Color::DarkGrey),
        }
    }

    pub fn pair(&self, style: BlockStyle) -> &StylePair {
        match style {
            BlockStyle::Title => &self.title,
            BlockStyle::Heading => &self.heading,
            BlockStyle::Body => &self.body,
            BlockStyle::Dock => &self.dock,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::metallic()
    }
}
