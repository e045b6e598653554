#![forbid(unsafe_code)]

//! Page state and the event loop.
//!
//! [`App`] owns one [`DecryptedText`] per page block and turns terminal
//! input into engine signals:
//!
//! - mouse motion becomes hover enter/leave edges via hit testing;
//! - scrolling re-observes every block against the new viewport;
//! - wall-clock time is fed to each component's clock.
//!
//! It never touches the terminal itself, so the whole page can be driven
//! headless in tests.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use tracing::{debug, info};
use unveil::{AnimateOn, DecryptedText, Rect};

use crate::page::{Block, Page};
use crate::render;
use crate::session::TerminalSession;
use crate::theme::Theme;

/// Longest the loop sleeps with nothing scheduled.
const MAX_POLL: Duration = Duration::from_millis(250);

/// Rows per arrow key or wheel notch.
const SCROLL_STEP: i32 = 1;

#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Seed for every block's scrambler; OS randomness when `None`.
    pub seed: Option<u64>,
    /// When blocks marked `promote_to_loop` switch to loop mode.
    pub switch_to_loop_after: Option<Duration>,
    /// Quit after this much time.
    pub exit_after: Option<Duration>,
}

/// A block's live component and where it currently sits.
#[derive(Debug)]
pub struct Item {
    text: DecryptedText,
    rect: Rect,
    hovered: bool,
}

impl Item {
    pub fn text(&self) -> &DecryptedText {
        &self.text
    }

    /// Page-space rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

#[derive(Debug)]
pub struct App {
    page: Page,
    items: Vec<Item>,
    options: AppOptions,
    size: (u16, u16),
    scroll: u16,
    pointer: Option<(u16, u16)>,
    focus: Option<usize>,
    elapsed: Duration,
    promoted: bool,
    quit: bool,
}

impl App {
    pub fn new(page: Page, options: AppOptions) -> Result<Self> {
        let mut items = Vec::with_capacity(page.blocks().len());
        for (i, block) in page.blocks().iter().enumerate() {
            let config = block.config.clone();
            let text = match options.seed {
                Some(seed) => DecryptedText::with_seed(config, seed.wrapping_add(i as u64))?,
                None => DecryptedText::new(config)?,
            };
            items.push(Item {
                text,
                rect: Rect::default(),
                hovered: false,
            });
        }
        info!(blocks = items.len(), height = page.height(), "page loaded");
        Ok(Self {
            page,
            items,
            options,
            size: (0, 0),
            scroll: 0,
            pointer: None,
            focus: None,
            elapsed: Duration::ZERO,
            promoted: false,
            quit: false,
        })
    }

    // --- accessors --------------------------------------------------------

    pub fn items(&self) -> impl Iterator<Item = (&Block, &Item)> + '_ {
        self.page.blocks().iter().zip(&self.items)
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn max_scroll(&self) -> u16 {
        self.page.max_scroll(self.size.1)
    }

    /// Viewport in page space.
    pub fn viewport(&self) -> Rect {
        Rect::new(0, self.scroll, self.size.0, self.size.1)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_promoted(&self) -> bool {
        self.promoted
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    // --- input ------------------------------------------------------------

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                    self.focus = None;
                    self.pointer_moved(mouse.column, mouse.row);
                }
                MouseEventKind::ScrollUp => self.scroll_by(-SCROLL_STEP),
                MouseEventKind::ScrollDown => self.scroll_by(SCROLL_STEP),
                _ => {}
            },
            Event::Resize(width, height) => self.resize(*width, *height),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let page_step = i32::from(self.size.1.saturating_sub(1).max(1));
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-SCROLL_STEP),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(SCROLL_STEP),
            KeyCode::PageUp => self.scroll_by(-page_step),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page_step),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(self.max_scroll()),
            KeyCode::Tab => self.focus_next(),
            _ => {}
        }
    }

    /// The terminal changed size (or the first size is known).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.scroll = self.scroll.min(self.max_scroll());
        debug!(width, height, scroll = self.scroll, "viewport resized");
        self.relayout();
    }

    /// Pointer at screen cell `(col, row)`.
    pub fn pointer_moved(&mut self, col: u16, row: u16) {
        self.pointer = Some((col, row));
        self.hit_test();
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        // `target` is within `0..=u16::MAX` after the clamp.
        self.scroll_to(target as u16);
    }

    pub fn scroll_to(&mut self, scroll: u16) {
        let scroll = scroll.min(self.max_scroll());
        if scroll == self.scroll {
            return;
        }
        self.scroll = scroll;
        debug!(scroll, "page scrolled");
        self.relayout();
    }

    /// Move keyboard hover to the next on-screen hover block.
    pub fn focus_next(&mut self) {
        let n = self.items.len();
        let start = self.focus.map_or(0, |i| i + 1);
        for offset in 0..n {
            let i = (start + offset) % n;
            let item = &self.items[i];
            if item.text.mode() != AnimateOn::Hover {
                continue;
            }
            if let Some(screen) = self.on_screen(item.rect) {
                self.focus = Some(i);
                self.pointer_moved(screen.x, screen.y);
                return;
            }
        }
    }

    // --- time -------------------------------------------------------------

    /// Advance every component by `dt` of wall time.
    pub fn tick(&mut self, dt: Duration) {
        let mut remaining = dt;
        if let Some(until) = self.until_promotion()
            && until <= remaining
        {
            self.advance_items(until);
            remaining -= until;
            self.promote();
        }
        self.advance_items(remaining);

        if let Some(limit) = self.options.exit_after
            && self.elapsed >= limit
        {
            info!(elapsed = ?self.elapsed, "exit timer reached");
            self.quit = true;
        }
    }

    /// How long the host may sleep before something changes.
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.items
            .iter()
            .filter_map(|item| item.text.next_wakeup())
            .chain(self.until_promotion())
            .chain(self.until_exit())
            .min()
    }

    fn advance_items(&mut self, dt: Duration) {
        self.elapsed += dt;
        for item in &mut self.items {
            item.text.advance(dt);
        }
    }

    fn until_promotion(&self) -> Option<Duration> {
        if self.promoted {
            return None;
        }
        self.options
            .switch_to_loop_after
            .map(|after| after.saturating_sub(self.elapsed))
    }

    fn until_exit(&self) -> Option<Duration> {
        self.options
            .exit_after
            .map(|after| after.saturating_sub(self.elapsed))
    }

    fn promote(&mut self) {
        self.promoted = true;
        let mut switched = 0;
        for (block, item) in self.page.blocks().iter().zip(&mut self.items) {
            if block.promote_to_loop {
                item.text.set_mode(AnimateOn::Loop);
                switched += 1;
            }
        }
        info!(switched, at = ?self.elapsed, "looping enabled");
    }

    // --- layout -----------------------------------------------------------

    fn relayout(&mut self) {
        let (width, height) = self.size;
        let rects = self.page.layout(width, height, self.scroll);
        let viewport = self.viewport();
        for (item, rect) in self.items.iter_mut().zip(rects) {
            item.rect = rect;
            item.text.observe_rect(&rect, &viewport);
        }
        self.hit_test();
    }

    fn hit_test(&mut self) {
        // The status line takes the last row.
        let drawable = self.size.1.saturating_sub(1);
        let point = self
            .pointer
            .and_then(|(col, row)| (row < drawable).then(|| (col, row.saturating_add(self.scroll))));
        for item in &mut self.items {
            let inside = point.is_some_and(|(x, y)| item.rect.contains(x, y));
            if inside == item.hovered {
                continue;
            }
            item.hovered = inside;
            if inside {
                debug!(text = item.text.accessible_text(), "pointer enter");
                item.text.pointer_enter();
            } else {
                debug!(text = item.text.accessible_text(), "pointer leave");
                item.text.pointer_leave();
            }
        }
    }

    /// Screen-space rectangle of a page-space one, if any of it is drawn.
    ///
    /// The last row is the status line.
    pub fn on_screen(&self, rect: Rect) -> Option<Rect> {
        let screen = rect.scrolled_up(self.scroll)?;
        (screen.y < self.size.1.saturating_sub(1)).then_some(screen)
    }
}

/// Drive `app` against a live terminal until it asks to quit.
pub fn run(app: &mut App, session: &TerminalSession, out: &mut impl Write) -> Result<()> {
    let (width, height) = session.size()?;
    app.resize(width, height);
    let theme = Theme::default();
    render::draw(out, app, &theme)?;

    let mut last = Instant::now();
    while !app.should_quit() {
        let timeout = app.next_wakeup().map_or(MAX_POLL, |d| d.min(MAX_POLL));
        if session.poll_event(timeout)? {
            let event = session.read_event()?;
            app.handle_event(&event);
        }
        let now = Instant::now();
        app.tick(now.duration_since(last));
        last = now;
        render::draw(out, app, &theme)?;
    }
    info!(elapsed = ?app.elapsed(), "quit");
    Ok(())
}
