#![forbid(unsafe_code)]

//! Frame drawing.
//!
//! Each block is drawn as runs of spans sharing a [`SpanState`], so an idle
//! block is a single styled print. Placeholder glyphs are padded to the
//! width of the target glyph they stand in for, which keeps every block's
//! footprint fixed while it scrambles. A placeholder wider than its target
//! is drawn as [`NARROW_PLACEHOLDER`] cells instead.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{ContentStyle, PrintStyledContent};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use unveil::{DecryptedText, SpanState};
use unveil_core::glyph::{glyph_width, graphemes};

use crate::app::App;
use crate::theme::{StylePair, Theme};

/// Stands in for placeholder glyphs that would overflow their target's cells.
const NARROW_PLACEHOLDER: char = '#';

const STATUS_HINT: &str = " q quit  \u{2191}/\u{2193} scroll  tab hover";

/// Draw one full frame.
pub fn draw(out: &mut impl Write, app: &App, theme: &Theme) -> io::Result<()> {
    let (width, height) = app.size();
    queue!(out, BeginSynchronizedUpdate, Clear(ClearType::All))?;

    for (block, item) in app.items() {
        let Some(screen) = app.on_screen(item.rect()) else {
            continue;
        };
        draw_text(
            out,
            screen.x,
            screen.y,
            width,
            item.text(),
            theme.pair(block.style),
        )?;
    }

    if height > 0 {
        draw_status(out, app, width, height - 1, theme.status)?;
    }

    queue!(out, EndSynchronizedUpdate)?;
    out.flush()
}

fn draw_text(
    out: &mut impl Write,
    x: u16,
    y: u16,
    width: u16,
    text: &DecryptedText,
    styles: &StylePair,
) -> io::Result<()> {
    let targets = graphemes(text.accessible_text());
    let mut col = x;
    let mut run = String::new();
    let mut run_state: Option<SpanState> = None;

    queue!(out, MoveTo(x, y))?;
    for (span, target) in text.spans().zip(&targets) {
        let cells = glyph_width(target);
        if col.saturating_add(cells) > width {
            break;
        }
        if run_state != Some(span.state) {
            if let Some(state) = run_state {
                print_run(out, &run, styles.for_state(state))?;
                run.clear();
            }
            run_state = Some(span.state);
        }
        push_glyph(&mut run, span.glyph, cells);
        col += cells;
    }
    if let Some(state) = run_state {
        print_run(out, &run, styles.for_state(state))?;
    }
    Ok(())
}

/// Append `glyph` to `run` occupying exactly `cells` columns.
fn push_glyph(run: &mut String, glyph: &str, cells: u16) {
    let drawn = glyph_width(glyph);
    if drawn > cells {
        run.extend(std::iter::repeat_n(NARROW_PLACEHOLDER, usize::from(cells)));
        return;
    }
    run.push_str(glyph);
    run.extend(std::iter::repeat_n(' ', usize::from(cells - drawn)));
}

fn print_run(out: &mut impl Write, run: &str, style: ContentStyle) -> io::Result<()> {
    queue!(out, PrintStyledContent(style.apply(run)))
}

fn draw_status(
    out: &mut impl Write,
    app: &App,
    width: u16,
    row: u16,
    style: ContentStyle,
) -> io::Result<()> {
    let mut line = format!(
        "{STATUS_HINT}  row {}/{}",
        app.scroll(),
        app.max_scroll()
    );
    if app.is_promoted() {
        line.push_str("  looping");
    }
    let line: String = line.chars().take(usize::from(width)).collect();
    queue!(out, MoveTo(0, row), PrintStyledContent(style.apply(line)))
}
