#![forbid(unsafe_code)]

//! Page description: blocks of decrypting text and where they sit.
//!
//! Pages are TOML files with a list of `[[block]]` tables. Each block
//! carries its text, a position, a style, and the engine options for its
//! [`DecryptConfig`]. Durations are given in milliseconds.
//!
//! ```toml
//! height = 40
//!
//! [[block]]
//! text = "Welcome"
//! row = 3
//! col = 4
//! style = "heading"
//! animate_on = "view"
//! sequential = true
//! speed_ms = 150
//! promote_to_loop = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use unveil::{AnimateOn, DecryptConfig, LoopTiming, Rect, RevealDirection};
use unveil_core::glyph::display_width;

const LANDING: &str = include_str!("../pages/landing.toml");

/// Horizontal gap between centered blocks that share a row.
pub const GROUP_GAP: u16 = 4;

/// Visual treatment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    Title,
    Heading,
    #[default]
    Body,
    Dock,
}

/// What a block's `row` is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Top of the page; scrolls with the content.
    #[default]
    Page,
    /// Bottom of the viewport; never scrolls.
    Bottom,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PageFile {
    height: Option<u16>,
    #[serde(default, rename = "block")]
    blocks: Vec<BlockFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockFile {
    text: String,
    row: u16,
    col: Option<u16>,
    #[serde(default)]
    anchor: Anchor,
    #[serde(default)]
    style: BlockStyle,
    animate_on: Option<String>,
    #[serde(default)]
    sequential: bool,
    reveal_direction: Option<String>,
    speed_ms: Option<u64>,
    max_iterations: Option<u32>,
    #[serde(default)]
    use_original_chars_only: bool,
    characters: Option<String>,
    visibility_threshold: Option<f32>,
    loop_initial_delay_ms: Option<u64>,
    loop_hold_ms: Option<u64>,
    loop_pause_ms: Option<u64>,
    #[serde(default)]
    promote_to_loop: bool,
}

impl BlockFile {
    fn into_block(self) -> Result<Block> {
        let mut config = DecryptConfig::new(self.text).sequential(self.sequential);
        if let Some(ms) = self.speed_ms {
            config = config.speed(Duration::from_millis(ms));
        }
        if let Some(n) = self.max_iterations {
            config = config.max_iterations(n);
        }
        if let Some(name) = &self.reveal_direction {
            config = config.reveal_direction(RevealDirection::parse_lenient(name));
        }
        if let Some(chars) = self.characters {
            config = config.characters(chars);
        }
        config = config.use_original_chars_only(self.use_original_chars_only);
        if let Some(name) = &self.animate_on {
            config = config.animate_on(name.parse::<AnimateOn>()?);
        }
        if let Some(threshold) = self.visibility_threshold {
            config = config.visibility_threshold(threshold);
        }

        let defaults = LoopTiming::default();
        let ms_or = |ms: Option<u64>, default: Duration| ms.map_or(default, Duration::from_millis);
        config = config.loop_timing(LoopTiming {
            initial_delay: ms_or(self.loop_initial_delay_ms, defaults.initial_delay),
            hold: ms_or(self.loop_hold_ms, defaults.hold),
            pause: ms_or(self.loop_pause_ms, defaults.pause),
        });
        config.validate()?;

        Ok(Block {
            config,
            row: self.row,
            col: self.col,
            anchor: self.anchor,
            style: self.style,
            promote_to_loop: self.promote_to_loop,
        })
    }
}

/// One decrypting text on the page.
#[derive(Debug, Clone)]
pub struct Block {
    pub config: DecryptConfig,
    pub row: u16,
    /// Left column; `None` centers the block.
    pub col: Option<u16>,
    pub anchor: Anchor,
    pub style: BlockStyle,
    /// Switch to loop mode when the page enables looping.
    pub promote_to_loop: bool,
}

impl Block {
    /// Width of the target text in terminal cells.
    pub fn width(&self) -> u16 {
        display_width(&self.config.text)
    }

    fn page_y(&self, viewport_height: u16, scroll: u16) -> u16 {
        match self.anchor {
            Anchor::Page => self.row,
            Anchor::Bottom => {
                scroll.saturating_add(viewport_height.saturating_sub(1).saturating_sub(self.row))
            }
        }
    }
}

/// An ordered set of blocks on a page taller than the viewport.
#[derive(Debug, Clone)]
pub struct Page {
    height: u16,
    blocks: Vec<Block>,
}

impl Page {
    /// The built-in landing page.
    pub fn landing() -> Result<Self> {
        Self::from_toml_str(LANDING).context("built-in landing page")
    }

    /// Read a page file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading page {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("loading page {}", path.display()))
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: PageFile = toml::from_str(source)?;
        if file.blocks.is_empty() {
            bail!("page has no blocks");
        }
        let blocks = file
            .blocks
            .into_iter()
            .enumerate()
            .map(|(i, block)| {
                let text = block.text.clone();
                block
                    .into_block()
                    .with_context(|| format!("block {} ({text:?})", i + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        let content = blocks
            .iter()
            .filter(|b| b.anchor == Anchor::Page)
            .map(|b| b.row.saturating_add(1))
            .max()
            .unwrap_or(0);
        let height = file.height.unwrap_or(content).max(content);
        Ok(Self { height, blocks })
    }

    /// Page height in rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Largest scroll offset that still fills a viewport of this height.
    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.height.saturating_sub(viewport_height)
    }

    /// Page-space rectangle of every block, in block order.
    ///
    /// Bottom-anchored blocks are placed relative to the scrolled viewport
    /// so they stay on screen.
    pub fn layout(&self, width: u16, height: u16, scroll: u16) -> Vec<Rect> {
        let mut rects = vec![Rect::default(); self.blocks.len()];
        let mut groups: BTreeMap<(Anchor, u16), Vec<usize>> = BTreeMap::new();

        for (i, block) in self.blocks.iter().enumerate() {
            match block.col {
                Some(x) => {
                    let y = block.page_y(height, scroll);
                    rects[i] = Rect::new(x, y, block.width(), 1);
                }
                None => groups.entry((block.anchor, block.row)).or_default().push(i),
            }
        }

        for members in groups.values() {
            let between = u16::try_from(members.len().saturating_sub(1)).unwrap_or(u16::MAX);
            let gaps = GROUP_GAP.saturating_mul(between);
            let total = members
                .iter()
                .map(|&i| self.blocks[i].width())
                .fold(gaps, u16::saturating_add);
            let mut x = width.saturating_sub(total) / 2;
            for &i in members {
                let block = &self.blocks[i];
                rects[i] = Rect::new(x, block.page_y(height, scroll), block.width(), 1);
                x = x.saturating_add(block.width()).saturating_add(GROUP_GAP);
            }
        }
        rects
    }
}
