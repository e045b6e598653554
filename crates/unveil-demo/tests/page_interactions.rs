//! Headless runs of the landing page: hover hit testing, scroll-driven
//! visibility, loop promotion, and the exit timer.

use std::time::Duration;

use unveil::{Activation, AnimateOn, LoopPhase};
use unveil_demo::app::{App, AppOptions, Item};
use unveil_demo::page::Page;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn landing(options: AppOptions) -> App {
    let page = Page::landing().expect("landing page");
    let mut app = App::new(
        page,
        AppOptions {
            seed: Some(42),
            ..options
        },
    )
    .expect("valid page");
    app.resize(80, 24);
    app
}

fn item<'a>(app: &'a App, text: &str) -> &'a Item {
    app.items()
        .find(|(block, _)| block.config.text == text)
        .map(|(_, item)| item)
        .expect("block on page")
}

// ═══════════════════════════════════════════════════════════════════════
// Hover
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn pointer_over_dock_item_scrambles_it_until_it_leaves() {
    let mut app = landing(AppOptions::default());
    let home = item(&app, "Home").rect();
    assert_eq!(home.y, 22, "dock sits one row above the status line");

    app.pointer_moved(home.x + 1, home.y);
    assert!(item(&app, "Home").is_hovered());
    assert!(item(&app, "Home").text().is_scrambling());

    // Moving within the block is not a second enter.
    app.pointer_moved(home.x + 2, home.y);
    assert_eq!(item(&app, "Home").text().cycles_started(), 1);

    app.tick(ms(200));
    app.pointer_moved(0, 0);
    let home = item(&app, "Home");
    assert!(!home.is_hovered());
    assert!(!home.text().is_scrambling());
    assert_eq!(home.text().displayed(), "Home");
}

#[test]
fn sliding_across_the_dock_hands_hover_along() {
    let mut app = landing(AppOptions::default());
    let archive = item(&app, "Archive").rect();
    let profile = item(&app, "Profile").rect();

    app.pointer_moved(archive.x, archive.y);
    app.tick(ms(100));
    assert_eq!(item(&app, "Archive").text().revealed().len(), 2);

    app.pointer_moved(profile.x + 3, profile.y);
    assert_eq!(item(&app, "Archive").text().activation(), Activation::Idle);
    assert!(item(&app, "Archive").text().revealed().is_empty());
    assert_eq!(item(&app, "Profile").text().activation(), Activation::Active);
}

#[test]
fn gap_between_dock_items_hovers_nothing() {
    let mut app = landing(AppOptions::default());
    let home = item(&app, "Home").rect();
    app.pointer_moved(home.right() + 1, home.y);
    assert!(app.items().all(|(_, item)| !item.is_hovered()));
}

#[test]
fn hover_completes_and_needs_a_fresh_enter() {
    let mut app = landing(AppOptions::default());
    let title = item(&app, "AiVerse").rect();
    app.pointer_moved(title.x, title.y);
    // Fourteen 50 ms ticks.
    app.tick(ms(700));
    assert!(!item(&app, "AiVerse").text().is_scrambling());
    assert_eq!(item(&app, "AiVerse").text().displayed(), "AiVerse");

    app.pointer_moved(title.x + 1, title.y);
    assert_eq!(item(&app, "AiVerse").text().cycles_started(), 1);
}

#[test]
fn scrolling_under_a_still_pointer_changes_hover() {
    let mut app = landing(AppOptions::default());
    let title = item(&app, "AiVerse").rect();
    app.pointer_moved(title.x, title.y);
    assert!(item(&app, "AiVerse").is_hovered());

    app.scroll_by(1);
    assert!(!item(&app, "AiVerse").is_hovered());
    assert_eq!(item(&app, "AiVerse").text().displayed(), "AiVerse");
}

// ═══════════════════════════════════════════════════════════════════════
// View
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn above_the_fold_view_blocks_start_on_first_layout() {
    let app = landing(AppOptions::default());
    assert!(item(&app, "Welcome").text().is_scrambling());
    assert!(item(&app, "To").text().is_scrambling());
    assert!(!item(&app, "Every glyph starts out as noise").text().has_animated());
}

#[test]
fn scrolling_reveals_below_the_fold_blocks_once() {
    let mut app = landing(AppOptions::default());
    let noise = "Every glyph starts out as noise";
    let middle = "and settles into place from the middle out";

    // Viewport rows 5..29 include row 28.
    app.scroll_by(5);
    assert!(item(&app, noise).text().has_animated());
    assert!(!item(&app, middle).text().has_animated());

    app.tick(ms(5_000));
    assert_eq!(item(&app, noise).text().displayed(), noise);

    // Scrolling away and back does not replay it.
    app.scroll_to(0);
    app.scroll_to(5);
    assert_eq!(item(&app, noise).text().cycles_started(), 1);
}

#[test]
fn full_visibility_threshold_waits_for_the_whole_block() {
    let mut app = landing(AppOptions::default());
    let middle = "and settles into place from the middle out";

    // At scroll 13 row 36 sits under the status line; visibility is still
    // measured against the whole viewport.
    app.scroll_to(12);
    assert!(!item(&app, middle).text().has_animated());
    app.scroll_to(13);
    assert!(item(&app, middle).text().has_animated());
}

#[test]
fn fixed_blocks_stay_visible_while_scrolling() {
    let mut app = landing(AppOptions::default());
    app.scroll_to(app.max_scroll());
    let home = item(&app, "Home").rect();
    assert_eq!(home.y, app.scroll() + 22);
    assert!(app.on_screen(home).is_some());
}

// ═══════════════════════════════════════════════════════════════════════
// Looping and exit
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn headline_switches_to_loop_after_the_delay() {
    let mut app = landing(AppOptions {
        switch_to_loop_after: Some(ms(5_000)),
        ..AppOptions::default()
    });
    app.tick(ms(4_999));
    assert_eq!(item(&app, "Welcome").text().mode(), AnimateOn::View);

    app.tick(ms(1));
    assert!(app.is_promoted());
    let welcome = item(&app, "Welcome").text();
    assert_eq!(welcome.mode(), AnimateOn::Loop);
    assert_eq!(welcome.loop_phase(), Some(LoopPhase::Waiting));
    assert_eq!(welcome.next_wakeup(), Some(ms(1_000)));

    app.tick(ms(1_000));
    assert!(item(&app, "Welcome").text().is_scrambling());
    assert!(item(&app, "To").text().is_scrambling());
}

#[test]
fn promotion_inside_a_long_tick_lands_on_time() {
    let mut app = landing(AppOptions {
        switch_to_loop_after: Some(ms(5_000)),
        ..AppOptions::default()
    });
    // The switch happens at 5 s, so the loop's first cycle starts at 6 s
    // and is 150 ms in by 6.15 s.
    app.tick(ms(6_150));
    let welcome = item(&app, "Welcome").text();
    assert_eq!(welcome.loop_phase(), Some(LoopPhase::Running));
    assert_eq!(welcome.revealed().len(), 1);
}

#[test]
fn exit_timer_quits() {
    let mut app = landing(AppOptions {
        exit_after: Some(ms(300)),
        ..AppOptions::default()
    });
    assert!(app.next_wakeup().is_some_and(|d| d <= ms(300)));
    app.tick(ms(299));
    assert!(!app.should_quit());
    app.tick(ms(1));
    assert!(app.should_quit());
}
