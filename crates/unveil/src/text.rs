#![forbid(unsafe_code)]

//! The decrypted-text component.
//!
//! [`DecryptedText`] ties the scramble driver, the trigger mode, and a
//! component-local [`TimerQueue`] together. Hosts feed it pointer and
//! visibility signals plus elapsed time, and read back the displayed text.
//!
//! # Timer discipline
//!
//! Every timer the component schedules is tracked by id and cancelled when
//! its owning condition ends:
//!
//! - the tick interval when a cycle completes, halts, or restarts;
//! - the delayed loop transition when it is replaced or the mode changes;
//! - everything on [`unmount`](DecryptedText::unmount), mode switch, and
//!   reconfiguration.
//!
//! After `unmount` the component ignores all input and advancing time fires
//! nothing.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};
use unveil_core::geometry::Rect;
use unveil_core::timer::{TimerId, TimerQueue};

use crate::config::{AnimateOn, DecryptConfig};
use crate::error::Result;
use crate::mode::{Activation, Directive, LoopPhase, LoopStep, ModeController};
use crate::policy::RevealedSet;
use crate::scramble::{CycleState, RevealStrategy, ScrambleDriver, TickOutcome};
use crate::span::{Span, SpanState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    Tick,
    Loop(LoopStep),
}

/// A text that scrambles and reveals itself on hover, on first view, or in
/// a loop.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use unveil::{DecryptConfig, DecryptedText};
///
/// let mut text = DecryptedText::with_seed(DecryptConfig::new("Hello"), 1).unwrap();
/// text.pointer_enter();
/// text.advance(Duration::from_millis(500));
/// assert_eq!(text.displayed(), "Hello");
/// assert!(!text.is_scrambling());
/// ```
#[derive(Debug)]
pub struct DecryptedText {
    config: DecryptConfig,
    driver: ScrambleDriver,
    mode: ModeController,
    activation: Activation,
    timers: TimerQueue<TimerEvent>,
    tick_timer: Option<TimerId>,
    delayed: Option<TimerId>,
    rng_source: StdRng,
    mounted: bool,
    cycles_started: u64,
}

impl DecryptedText {
    /// Mount a component with OS-seeded randomness.
    pub fn new(config: DecryptConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Mount a component whose placeholder glyphs are reproducible.
    pub fn with_seed(config: DecryptConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: DecryptConfig, mut rng_source: StdRng) -> Result<Self> {
        config.validate()?;
        let driver = build_driver(&config, &mut rng_source);
        let mode = ModeController::new(
            config.animate_on,
            config.visibility_threshold,
            config.loop_timing,
        );
        let mut this = Self {
            config,
            driver,
            mode,
            activation: Activation::Idle,
            timers: TimerQueue::new(),
            tick_timer: None,
            delayed: None,
            rng_source,
            mounted: true,
            cycles_started: 0,
        };
        debug!(
            text = %this.config.text,
            mode = %this.config.animate_on,
            sequential = this.config.sequential,
            "decrypted text mounted"
        );
        this.enter_mode();
        Ok(this)
    }

    // --- host signals -----------------------------------------------------

    /// The pointer moved onto the element.
    pub fn pointer_enter(&mut self) {
        if !self.mounted {
            return;
        }
        let directives = self.mode.pointer_enter(self.activation);
        self.apply(directives);
    }

    /// The pointer left the element.
    pub fn pointer_leave(&mut self) {
        if !self.mounted {
            return;
        }
        let directives = self.mode.pointer_leave(self.activation);
        self.apply(directives);
    }

    /// Report the visible share of the element, in `[0.0, 1.0]`.
    pub fn observe_visibility(&mut self, ratio: f32) {
        if !self.mounted {
            return;
        }
        let directives = self.mode.visibility(ratio);
        self.apply(directives);
    }

    /// Report the element's rectangle and the viewport, both in page space.
    pub fn observe_rect(&mut self, element: &Rect, viewport: &Rect) {
        self.observe_visibility(element.visible_fraction(viewport));
    }

    /// Advance the component clock by `dt`, firing every timer that comes
    /// due. Returns the number of timers fired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        if !self.mounted {
            return 0;
        }
        let horizon = self.timers.now().saturating_add(dt);
        let mut fired = 0;
        while let Some((id, event)) = self.timers.pop_due(horizon) {
            fired += 1;
            self.on_timer(id, event);
        }
        self.timers.advance_to(horizon);
        fired
    }

    /// Time until the next timer fires, or `None` when nothing is pending.
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Switch trigger mode. Pending timers are cancelled, the target is put
    /// back, and the new mode is entered from idle. Switching to the current
    /// mode does nothing.
    pub fn set_mode(&mut self, mode: AnimateOn) {
        if !self.mounted || mode == self.mode.kind() {
            return;
        }
        debug!(text = %self.config.text, from = %self.mode.kind(), to = %mode, "trigger mode switch");
        self.cancel_all_timers();
        self.driver.halt();
        self.activation = Activation::Idle;
        self.config.animate_on = mode;
        self.mode = ModeController::new(
            mode,
            self.config.visibility_threshold,
            self.config.loop_timing,
        );
        self.enter_mode();
    }

    /// Replace the whole configuration, restarting from idle.
    ///
    /// On error the component keeps its previous configuration and state.
    pub fn reconfigure(&mut self, config: DecryptConfig) -> Result<()> {
        config.validate()?;
        self.cancel_all_timers();
        self.driver = build_driver(&config, &mut self.rng_source);
        self.mode = ModeController::new(
            config.animate_on,
            config.visibility_threshold,
            config.loop_timing,
        );
        self.activation = Activation::Idle;
        self.cycles_started = 0;
        self.config = config;
        debug!(text = %self.config.text, mode = %self.config.animate_on, "decrypted text reconfigured");
        if self.mounted {
            self.enter_mode();
        }
        Ok(())
    }

    /// Tear down: cancel every timer and stop responding to input.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let cancelled = self.cancel_all_timers();
        self.mounted = false;
        debug!(text = %self.config.text, cancelled, "decrypted text unmounted");
    }

    // --- output -----------------------------------------------------------

    /// Current displayed text.
    pub fn displayed(&self) -> String {
        self.driver.displayed_text()
    }

    /// Per-character output with revealed/encrypted styling state.
    pub fn spans(&self) -> impl Iterator<Item = Span<'_>> + '_ {
        let scrambling = self.driver.is_scrambling();
        let revealed = self.driver.revealed();
        self.driver
            .displayed()
            .iter()
            .enumerate()
            .map(move |(index, glyph)| Span {
                index,
                glyph: glyph.as_str(),
                state: if revealed.contains(index) || !scrambling {
                    SpanState::Revealed
                } else {
                    SpanState::Encrypted
                },
            })
    }

    /// The target text, for assistive technology and copy/paste.
    pub fn accessible_text(&self) -> &str {
        &self.config.text
    }

    // --- introspection ----------------------------------------------------

    pub fn config(&self) -> &DecryptConfig {
        &self.config
    }

    pub fn mode(&self) -> AnimateOn {
        self.mode.kind()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn cycle_state(&self) -> CycleState {
        self.driver.state()
    }

    pub fn is_scrambling(&self) -> bool {
        self.driver.is_scrambling()
    }

    pub fn revealed(&self) -> &RevealedSet {
        self.driver.revealed()
    }

    pub fn iteration(&self) -> u32 {
        self.driver.iteration()
    }

    /// Length of the target in grapheme clusters.
    pub fn len(&self) -> usize {
        self.driver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.driver.is_empty()
    }

    /// View mode only: whether the single cycle has been triggered.
    pub fn has_animated(&self) -> bool {
        match &self.mode {
            ModeController::View(v) => v.has_animated(),
            _ => false,
        }
    }

    /// Loop mode only: where the repeat cycle currently is.
    pub fn loop_phase(&self) -> Option<LoopPhase> {
        match &self.mode {
            ModeController::Loop(l) => Some(l.phase()),
            _ => None,
        }
    }

    /// Number of cycles started since mount or the last reconfigure.
    pub fn cycles_started(&self) -> u64 {
        self.cycles_started
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Component clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    // --- internals --------------------------------------------------------

    fn enter_mode(&mut self) {
        let directives = self.mode.enter();
        self.apply(directives);
    }

    fn on_timer(&mut self, id: TimerId, event: TimerEvent) {
        match event {
            TimerEvent::Tick => {
                if self.tick_timer != Some(id) {
                    return;
                }
                let outcome = self.driver.tick();
                trace!(
                    text = %self.config.text,
                    revealed = self.driver.revealed().len(),
                    iteration = self.driver.iteration(),
                    ?outcome,
                    "scramble tick"
                );
                match outcome {
                    TickOutcome::Running => {}
                    TickOutcome::Idle => self.cancel_tick(),
                    TickOutcome::Completed => {
                        self.cancel_tick();
                        debug!(text = %self.config.text, at = ?self.timers.now(), "cycle complete");
                        let directives = self.mode.cycle_complete();
                        self.apply(directives);
                    }
                }
            }
            TimerEvent::Loop(step) => {
                if self.delayed == Some(id) {
                    self.delayed = None;
                }
                let directives = self.mode.loop_step(step);
                self.apply(directives);
            }
        }
    }

    fn apply(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::Start => self.start_cycle(),
                Directive::Halt => self.halt_cycle(),
                Directive::Schedule(delay, step) => {
                    if let Some(prev) = self.delayed.take() {
                        self.timers.cancel(prev);
                    }
                    self.delayed = Some(self.timers.schedule_once(delay, TimerEvent::Loop(step)));
                }
            }
        }
    }

    fn start_cycle(&mut self) {
        self.cancel_tick();
        self.driver.begin();
        self.activation = Activation::Active;
        self.cycles_started += 1;
        self.tick_timer = Some(
            self.timers
                .schedule_every(self.config.speed, TimerEvent::Tick),
        );
        debug!(
            text = %self.config.text,
            at = ?self.timers.now(),
            cycle = self.cycles_started,
            "cycle started"
        );
    }

    fn halt_cycle(&mut self) {
        self.cancel_tick();
        self.driver.halt();
        self.activation = Activation::Idle;
        debug!(text = %self.config.text, at = ?self.timers.now(), "cycle halted");
    }

    fn cancel_tick(&mut self) {
        if let Some(id) = self.tick_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn cancel_all_timers(&mut self) -> usize {
        self.tick_timer = None;
        self.delayed = None;
        self.timers.cancel_all()
    }
}

impl Drop for DecryptedText {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn build_driver(config: &DecryptConfig, rng_source: &mut StdRng) -> ScrambleDriver {
    let strategy = if config.sequential {
        RevealStrategy::Sequential(config.reveal_direction)
    } else {
        RevealStrategy::Iterations(config.max_iterations)
    };
    ScrambleDriver::new(
        &config.text,
        config.alphabet(),
        strategy,
        StdRng::from_rng(rng_source),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoopTiming;
    use tracing_test::traced_test;

    const TICK: Duration = Duration::from_millis(50);

    fn mount(config: DecryptConfig) -> DecryptedText {
        DecryptedText::with_seed(config, 0xDEC0DE).expect("valid config")
    }

    #[test]
    fn mounts_idle_showing_target() {
        let t = mount(DecryptConfig::new("Welcome"));
        assert_eq!(t.displayed(), "Welcome");
        assert_eq!(t.activation(), Activation::Idle);
        assert_eq!(t.pending_timers(), 0);
        assert!(t.spans().all(|s| s.is_revealed()));
    }

    #[test]
    fn spans_mark_unrevealed_positions_encrypted_while_scrambling() {
        let mut t = mount(DecryptConfig::new("abcd").sequential(true));
        t.pointer_enter();
        t.advance(TICK);
        let states: Vec<_> = t.spans().map(|s| s.state).collect();
        assert_eq!(
            states,
            [
                SpanState::Revealed,
                SpanState::Encrypted,
                SpanState::Encrypted,
                SpanState::Encrypted
            ]
        );
    }

    #[test]
    fn hover_restart_needs_leave_and_enter() {
        let mut t = mount(DecryptConfig::new("abc").max_iterations(2));
        t.pointer_enter();
        t.advance(TICK * 2);
        assert_eq!(t.activation(), Activation::Idle);
        assert_eq!(t.cycles_started(), 1);
        t.pointer_leave();
        t.pointer_enter();
        assert_eq!(t.cycles_started(), 2);
    }

    #[test]
    fn pointer_enter_during_cycle_does_not_restart() {
        let mut t = mount(DecryptConfig::new("abc").max_iterations(5));
        t.pointer_enter();
        t.advance(TICK * 2);
        t.pointer_enter();
        assert_eq!(t.iteration(), 2);
        assert_eq!(t.cycles_started(), 1);
    }

    #[test]
    fn reconfigure_resets_to_new_target() {
        let mut t = mount(DecryptConfig::new("old text"));
        t.pointer_enter();
        t.advance(TICK);
        t.reconfigure(DecryptConfig::new("new").animate_on(AnimateOn::Loop))
            .expect("valid");
        assert_eq!(t.displayed(), "new");
        assert_eq!(t.mode(), AnimateOn::Loop);
        assert!(!t.is_scrambling());
        // Only the loop's initial delay is pending; the old tick is gone.
        assert_eq!(t.pending_timers(), 1);
    }

    #[test]
    fn reconfigure_restarts_the_cycle_count() {
        let mut t = mount(DecryptConfig::new("old").max_iterations(2));
        t.pointer_enter();
        t.advance(TICK * 2);
        assert_eq!(t.cycles_started(), 1);
        t.reconfigure(DecryptConfig::new("new")).expect("valid");
        assert_eq!(t.cycles_started(), 0);
    }

    #[test]
    fn reconfigure_rejects_invalid_and_keeps_state() {
        let mut t = mount(DecryptConfig::new("keep"));
        assert!(t.reconfigure(DecryptConfig::new("x").speed(Duration::ZERO)).is_err());
        assert_eq!(t.accessible_text(), "keep");
    }

    #[test]
    fn set_mode_to_same_mode_is_noop() {
        let mut t = mount(
            DecryptConfig::new("x")
                .animate_on(AnimateOn::Loop)
                .loop_timing(LoopTiming::default()),
        );
        let before = t.next_wakeup();
        t.advance(Duration::from_millis(400));
        t.set_mode(AnimateOn::Loop);
        assert_eq!(t.next_wakeup(), before.map(|d| d - Duration::from_millis(400)));
    }

    #[test]
    fn unmounted_component_ignores_everything() {
        let mut t = mount(DecryptConfig::new("abc"));
        t.unmount();
        t.pointer_enter();
        assert_eq!(t.advance(Duration::from_secs(10)), 0);
        assert_eq!(t.displayed(), "abc");
        assert!(!t.is_mounted());
    }

    #[test]
    #[traced_test]
    fn logs_cycle_lifecycle() {
        let mut t = mount(DecryptConfig::new("log me").max_iterations(1));
        t.pointer_enter();
        t.advance(TICK);
        t.unmount();
        assert!(logs_contain("cycle started"));
        assert!(logs_contain("cycle complete"));
        assert!(logs_contain("decrypted text unmounted"));
    }
}
