#![forbid(unsafe_code)]

//! Cancellable virtual timers.
//!
//! A [`TimerQueue`] is a component-local clock plus a set of pending one-shot
//! and repeating timers. Nothing here sleeps or spawns: the owner advances
//! the clock with elapsed time and pulls due timers one at a time with
//! [`TimerQueue::pop_due`], handling each before asking for the next.
//!
//! # Invariants
//!
//! 1. Timers fire in deadline order; equal deadlines fire in scheduling order.
//! 2. A cancelled timer never fires, even when it was already due in the
//!    current advance (handlers run between pops, so a handler may cancel a
//!    sibling that shares its deadline).
//! 3. A repeating timer keeps its [`TimerId`] across firings until cancelled.
//! 4. The clock never moves backwards.
//! 5. After [`TimerQueue::cancel_all`] the queue is empty and nothing fires.

use std::time::Duration;

/// Handle to a scheduled timer.
///
/// Ids are unique per queue and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw id value, for logging.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(Duration),
}

#[derive(Debug, Clone)]
struct Pending<E> {
    id: TimerId,
    deadline: Duration,
    /// Tie-breaker so equal deadlines fire in scheduling order.
    seq: u64,
    repeat: Repeat,
    event: E,
}

/// A virtual-time queue of pending timers carrying events of type `E`.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    /// Create an empty queue with its clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timers are pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether `id` is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Schedule `event` to fire once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId {
        self.push(delay, Repeat::Once, event)
    }

    /// Schedule `event` to fire every `interval`, first firing one interval
    /// from now.
    ///
    /// A zero interval is clamped to one nanosecond so the queue always makes
    /// progress.
    pub fn schedule_every(&mut self, interval: Duration, event: E) -> TimerId {
        let interval = if interval.is_zero() {
            Duration::from_nanos(1)
        } else {
            interval
        };
        self.push(interval, Repeat::Every(interval), event)
    }

    fn push(&mut self, delay: Duration, repeat: Repeat, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now.saturating_add(delay);
        crate::trace!(timer_id = id.0, ?deadline, ?repeat, "timer scheduled");
        self.pending.push(Pending {
            id,
            deadline,
            seq,
            repeat,
            event,
        });
        id
    }

    /// Cancel a pending timer. Returns `false` if it was not pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        let removed = self.pending.len() != before;
        if removed {
            crate::trace!(timer_id = id.0, "timer cancelled");
        }
        removed
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            crate::debug!(dropped, "all timers cancelled");
        }
        dropped
    }

    /// Time remaining until the earliest pending deadline, or `None` when
    /// nothing is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.deadline)
            .min()
            .map(|d| d.saturating_sub(self.now))
    }

    /// Move the clock forward to `t`. Earlier values are ignored.
    pub fn advance_to(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }

    fn earliest_due(&self, horizon: Duration) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= horizon)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(i, _)| i)
    }
}

impl<E: Clone> TimerQueue<E> {
    /// Fire the earliest timer due at or before `horizon`.
    ///
    /// The clock moves to the fired timer's deadline. One-shot timers are
    /// removed; repeating timers are rescheduled one interval later under the
    /// same id. Returns `None` when nothing is due; the caller then typically
    /// finishes with [`advance_to`](Self::advance_to)`(horizon)`.
    pub fn pop_due(&mut self, horizon: Duration) -> Option<(TimerId, E)> {
        let idx = self.earliest_due(horizon)?;
        let deadline = self.pending[idx].deadline;
        self.advance_to(deadline);

        match self.pending[idx].repeat {
            Repeat::Once => {
                let fired = self.pending.swap_remove(idx);
                Some((fired.id, fired.event))
            }
            Repeat::Every(interval) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let entry = &mut self.pending[idx];
                entry.deadline = deadline.saturating_add(interval);
                entry.seq = seq;
                Some((entry.id, entry.event.clone()))
            }
        }
    }
}
