//! Property-based invariant tests for the virtual timer queue.
//!
//! 1. Fired deadlines are non-decreasing within and across advances.
//! 2. Cancelled timers never fire afterwards.
//! 3. A repeating timer fires floor(elapsed / interval) times.
//! 4. `cancel_all` leaves nothing to fire.

use std::time::Duration;

use proptest::prelude::*;
use unveil_core::timer::TimerQueue;

fn delays() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..500, 1..24)
}

proptest! {
    #[test]
    fn fire_times_are_monotonic(ds in delays(), steps in prop::collection::vec(1u64..200, 1..20)) {
        let mut q = TimerQueue::new();
        for (i, d) in ds.iter().enumerate() {
            q.schedule_once(Duration::from_millis(*d), i);
        }
        let mut last = Duration::ZERO;
        let mut horizon = Duration::ZERO;
        for step in steps {
            horizon += Duration::from_millis(step);
            while q.pop_due(horizon).is_some() {
                prop_assert!(q.now() >= last, "clock went backwards");
                last = q.now();
            }
            q.advance_to(horizon);
        }
    }

    #[test]
    fn cancelled_timers_never_fire(ds in delays(), cancel_mask in prop::collection::vec(any::<bool>(), 24)) {
        let mut q = TimerQueue::new();
        let ids: Vec<_> = ds
            .iter()
            .enumerate()
            .map(|(i, d)| q.schedule_once(Duration::from_millis(*d), i))
            .collect();
        let mut cancelled = Vec::new();
        for (i, id) in ids.iter().enumerate() {
            if cancel_mask[i] {
                q.cancel(*id);
                cancelled.push(i);
            }
        }
        while let Some((_, ev)) = q.pop_due(Duration::from_secs(10)) {
            prop_assert!(!cancelled.contains(&ev), "cancelled timer {} fired", ev);
        }
        prop_assert!(q.is_empty());
    }

    #[test]
    fn interval_fire_count(interval_ms in 1u64..100, total_ms in 0u64..2_000) {
        let mut q = TimerQueue::new();
        q.schedule_every(Duration::from_millis(interval_ms), ());
        let mut count = 0u64;
        while q.pop_due(Duration::from_millis(total_ms)).is_some() {
            count += 1;
        }
        prop_assert_eq!(count, total_ms / interval_ms);
    }

    #[test]
    fn cancel_all_silences_everything(ds in delays()) {
        let mut q = TimerQueue::new();
        for d in &ds {
            q.schedule_every(Duration::from_millis(*d), ());
        }
        prop_assert_eq!(q.cancel_all(), ds.len());
        prop_assert!(q.pop_due(Duration::from_secs(60)).is_none());
    }
}
