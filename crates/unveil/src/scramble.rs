#![forbid(unsafe_code)]

//! The scramble driver: per-tick mutation of the displayed text.
//!
//! The driver owns the target, the displayed glyphs, the revealed set, and
//! the iteration counter. It knows nothing about timers or trigger modes;
//! the owning component calls [`ScrambleDriver::tick`] from its interval
//! timer and reacts to [`TickOutcome::Completed`].
//!
//! # Invariants
//!
//! 1. `displayed().len() == target().len()` at all times.
//! 2. A target space is displayed as a space in every state.
//! 3. Within a sequential cycle the revealed set grows by exactly one index
//!    per tick and never shrinks.
//! 4. An idle driver ignores ticks.

use rand::rngs::StdRng;
use unveil_core::glyph;

use crate::alphabet::Alphabet;
use crate::policy::{RevealDirection, RevealedSet};

/// Whether a cycle is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    Scrambling,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The driver was idle; nothing changed.
    Idle,
    /// The cycle is still running.
    Running,
    /// The cycle finished on this tick. The displayed text equals the target.
    Completed,
}

/// How the driver advances a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStrategy {
    /// Resample everything every tick for a fixed number of ticks.
    Iterations(u32),
    /// Lock one position per tick in the given order.
    Sequential(RevealDirection),
}

/// Mutates a displayed string toward a target, one tick at a time.
#[derive(Debug, Clone)]
pub struct ScrambleDriver {
    target: Vec<String>,
    displayed: Vec<String>,
    revealed: RevealedSet,
    alphabet: Alphabet,
    strategy: RevealStrategy,
    iteration: u32,
    state: CycleState,
    rng: StdRng,
}

impl ScrambleDriver {
    /// Build an idle driver displaying `target` verbatim.
    pub fn new(target: &str, alphabet: Alphabet, strategy: RevealStrategy, rng: StdRng) -> Self {
        let target = glyph::graphemes(target);
        let len = target.len();
        Self {
            displayed: target.clone(),
            target,
            revealed: RevealedSet::with_len(len),
            alphabet,
            strategy,
            iteration: 0,
            state: CycleState::Idle,
            rng,
        }
    }

    /// Number of characters (grapheme clusters) in the target.
    #[inline]
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Whether the target is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Target glyphs.
    pub fn target(&self) -> &[String] {
        &self.target
    }

    /// Displayed glyphs.
    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    /// Displayed text as one string.
    pub fn displayed_text(&self) -> String {
        self.displayed.concat()
    }

    /// Positions locked to the target in the current cycle.
    pub fn revealed(&self) -> &RevealedSet {
        &self.revealed
    }

    /// Ticks elapsed in the current non-sequential cycle.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    #[inline]
    pub fn is_scrambling(&self) -> bool {
        self.state == CycleState::Scrambling
    }

    pub fn strategy(&self) -> RevealStrategy {
        self.strategy
    }

    /// Start a cycle: clear the revealed set and the iteration counter.
    ///
    /// The displayed text is left as is until the first tick.
    pub fn begin(&mut self) {
        self.revealed.clear();
        self.iteration = 0;
        self.state = CycleState::Scrambling;
    }

    /// Stop any cycle and show the target again with nothing revealed.
    pub fn halt(&mut self) {
        self.state = CycleState::Idle;
        self.revealed.clear();
        self.restore();
    }

    /// Advance the running cycle by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state == CycleState::Idle {
            return TickOutcome::Idle;
        }
        match self.strategy {
            RevealStrategy::Sequential(direction) => {
                if !self.revealed.is_full() {
                    let next = direction.next_index(&self.revealed, self.len());
                    self.revealed.insert(next);
                    self.shuffle();
                }
                if self.revealed.is_full() {
                    self.finish()
                } else {
                    TickOutcome::Running
                }
            }
            RevealStrategy::Iterations(max) => {
                self.shuffle();
                self.iteration = self.iteration.saturating_add(1);
                if self.iteration >= max {
                    self.restore();
                    self.finish()
                } else {
                    TickOutcome::Running
                }
            }
        }
    }

    fn finish(&mut self) -> TickOutcome {
        self.state = CycleState::Idle;
        TickOutcome::Completed
    }

    fn restore(&mut self) {
        self.displayed.clone_from(&self.target);
    }

    /// Resample every unrevealed, non-space position.
    fn shuffle(&mut self) {
        for (i, (shown, real)) in self.displayed.iter_mut().zip(&self.target).enumerate() {
            if glyph::is_space(real) || self.revealed.contains(i) {
                shown.clone_from(real);
                continue;
            }
            match self.alphabet.sample(&mut self.rng) {
                Some(g) => {
                    shown.clear();
                    shown.push_str(g);
                }
                // Only reachable for a derived alphabet, which is empty only
                // when the target has no non-space glyphs.
                None => shown.clone_from(real),
            }
        }
    }
}
