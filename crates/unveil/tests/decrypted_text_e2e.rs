//! End-to-end trigger-mode scenarios for `DecryptedText`, driven on the
//! component's virtual clock.

use std::time::Duration;

use unveil::{
    Activation, AnimateOn, DecryptConfig, DecryptedText, LoopPhase, Rect, RevealDirection,
    SpanState,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn mount(config: DecryptConfig) -> DecryptedText {
    DecryptedText::with_seed(config, 2024).expect("valid config")
}

// ─── hover ──────────────────────────────────────────────────────────────

#[test]
fn hover_runs_one_cycle_then_resets_flag() {
    let mut t = mount(DecryptConfig::new("Hover me"));
    assert_eq!(t.activation(), Activation::Idle);

    t.pointer_enter();
    assert_eq!(t.activation(), Activation::Active);
    assert!(t.is_scrambling());

    // Nine ticks in, still going.
    t.advance(ms(450));
    assert!(t.is_scrambling());
    assert_eq!(t.iteration(), 9);

    // Tenth tick finishes and hands control back to idle.
    t.advance(ms(50));
    assert!(!t.is_scrambling());
    assert_eq!(t.activation(), Activation::Idle);
    assert_eq!(t.displayed(), "Hover me");
    assert_eq!(t.pending_timers(), 0);
}

#[test]
fn hover_leave_mid_cycle_restores_and_cancels() {
    let mut t = mount(DecryptConfig::new("Archive").sequential(true));
    t.pointer_enter();
    t.advance(ms(150));
    assert_eq!(t.revealed().len(), 3);

    t.pointer_leave();
    assert_eq!(t.displayed(), "Archive");
    assert!(t.revealed().is_empty());
    assert_eq!(t.activation(), Activation::Idle);
    assert_eq!(t.pending_timers(), 0);

    // Time passing after the leave changes nothing.
    assert_eq!(t.advance(ms(5_000)), 0);
    assert_eq!(t.displayed(), "Archive");
}

#[test]
fn hover_sequential_end_direction_reveals_from_the_right() {
    let mut t = mount(
        DecryptConfig::new("abcde")
            .sequential(true)
            .reveal_direction(RevealDirection::End),
    );
    t.pointer_enter();
    t.advance(ms(100));
    let states: Vec<_> = t.spans().map(|s| s.state).collect();
    assert_eq!(
        states,
        [
            SpanState::Encrypted,
            SpanState::Encrypted,
            SpanState::Encrypted,
            SpanState::Revealed,
            SpanState::Revealed,
        ]
    );
    assert_eq!(&t.displayed()[3..], "de");
}

// ─── view ───────────────────────────────────────────────────────────────

#[test]
fn view_triggers_once_on_first_intersection() {
    let mut t = mount(
        DecryptConfig::new("Welcome")
            .animate_on(AnimateOn::View)
            .sequential(true)
            .speed(ms(150)),
    );

    // Below the threshold: nothing.
    t.observe_visibility(0.05);
    assert!(!t.has_animated());
    assert_eq!(t.pending_timers(), 0);

    // Half the element scrolls into the viewport.
    let element = Rect::new(2, 10, 7, 2);
    let viewport = Rect::new(0, 0, 80, 11);
    t.observe_rect(&element, &viewport);
    assert!(t.has_animated());
    assert!(t.is_scrambling());

    t.advance(ms(150 * 7));
    assert!(!t.is_scrambling());
    assert_eq!(t.displayed(), "Welcome");
    // View mode stays triggered and shows the revealed text.
    assert_eq!(t.activation(), Activation::Active);
    assert_eq!(t.revealed().len(), 7);

    // A second intersection after the latch does nothing.
    t.observe_visibility(1.0);
    assert_eq!(t.cycles_started(), 1);
    assert_eq!(t.pending_timers(), 0);
}

#[test]
fn view_ignores_pointer_events() {
    let mut t = mount(DecryptConfig::new("To").animate_on(AnimateOn::View));
    t.pointer_enter();
    t.pointer_leave();
    assert_eq!(t.cycles_started(), 0);
}

// ─── loop ───────────────────────────────────────────────────────────────

#[test]
fn loop_repeats_until_unmounted() {
    let mut t = mount(DecryptConfig::new("AiVerse").animate_on(AnimateOn::Loop));
    assert_eq!(t.loop_phase(), Some(LoopPhase::Waiting));
    assert_eq!(t.next_wakeup(), Some(ms(1_000)));

    // 1 s pause, then the first cycle.
    t.advance(ms(999));
    assert!(!t.is_scrambling());
    t.advance(ms(1));
    assert!(t.is_scrambling());
    assert_eq!(t.activation(), Activation::Active);

    // Ten 50 ms ticks complete it; the text holds for 3 s.
    t.advance(ms(500));
    assert!(!t.is_scrambling());
    assert_eq!(t.activation(), Activation::Active);
    assert_eq!(t.loop_phase(), Some(LoopPhase::Holding));
    assert_eq!(t.displayed(), "AiVerse");

    t.advance(ms(2_999));
    assert_eq!(t.activation(), Activation::Active);
    t.advance(ms(1));
    assert_eq!(t.activation(), Activation::Idle);
    assert_eq!(t.displayed(), "AiVerse");

    // 2 s pause, then the next cycle.
    t.advance(ms(1_999));
    assert!(!t.is_scrambling());
    t.advance(ms(1));
    assert!(t.is_scrambling());
    assert_eq!(t.cycles_started(), 2);

    // Several more rounds: 0.5 s run + 3 s hold + 2 s pause each.
    t.advance(ms(5_500 * 3));
    assert_eq!(t.cycles_started(), 5);

    t.unmount();
    assert_eq!(t.pending_timers(), 0);
    let shown = t.displayed();
    assert_eq!(t.advance(Duration::from_secs(3_600)), 0);
    assert_eq!(t.displayed(), shown);
    assert_eq!(t.cycles_started(), 5);
}

#[test]
fn loop_sequential_center_reveals_outward() {
    let mut t = mount(
        DecryptConfig::new("Tomato")
            .animate_on(AnimateOn::Loop)
            .sequential(true)
            .reveal_direction(RevealDirection::Center),
    );
    t.advance(ms(1_000 + 50 * 6));
    assert_eq!(t.revealed().order(), [3, 2, 4, 1, 5, 0]);
    assert_eq!(t.displayed(), "Tomato");
    assert_eq!(t.loop_phase(), Some(LoopPhase::Holding));
}

#[test]
fn loop_reset_clears_the_revealed_set_on_next_start() {
    let mut t = mount(
        DecryptConfig::new("abc")
            .animate_on(AnimateOn::Loop)
            .sequential(true),
    );
    t.advance(ms(1_000 + 150));
    assert!(t.revealed().is_full());
    t.advance(ms(3_000 + 2_000));
    assert!(t.is_scrambling());
    assert!(t.revealed().is_empty());
}

// ─── mode switching ─────────────────────────────────────────────────────

#[test]
fn switching_view_to_loop_cancels_and_reenters() {
    let mut t = mount(
        DecryptConfig::new("Welcome")
            .animate_on(AnimateOn::View)
            .sequential(true)
            .speed(ms(150)),
    );
    t.observe_visibility(1.0);
    t.advance(ms(300));
    assert!(t.is_scrambling());

    t.set_mode(AnimateOn::Loop);
    assert_eq!(t.mode(), AnimateOn::Loop);
    assert!(!t.is_scrambling());
    assert_eq!(t.displayed(), "Welcome");
    // Only the loop's initial delay remains.
    assert_eq!(t.pending_timers(), 1);
    assert_eq!(t.next_wakeup(), Some(ms(1_000)));

    t.advance(ms(1_000));
    assert!(t.is_scrambling());
}

#[test]
fn switching_loop_to_hover_drops_pending_transitions() {
    let mut t = mount(DecryptConfig::new("x").animate_on(AnimateOn::Loop));
    t.set_mode(AnimateOn::Hover);
    assert_eq!(t.pending_timers(), 0);
    assert_eq!(t.advance(Duration::from_secs(60)), 0);
    assert_eq!(t.cycles_started(), 0);
}

#[test]
fn dropping_a_component_is_teardown() {
    let t = mount(DecryptConfig::new("bye").animate_on(AnimateOn::Loop));
    assert_eq!(t.pending_timers(), 1);
    drop(t);
}

#[test]
fn accessible_text_is_always_the_target() {
    let mut t = mount(DecryptConfig::new("Profile"));
    t.pointer_enter();
    t.advance(ms(50));
    assert_eq!(t.accessible_text(), "Profile");
}
