//! Integration tests for the scroll and timer driven effects.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use authentic_only_integration_tests::{full_layout, start};
use authentic_only_storefront::markup::Capabilities;
use authentic_only_storefront::{
    DomPatch, Interactions, InteractionsConfig, MemoryStore, PageLayout, RecordingPage, UiEvent,
};

fn seconds(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

// =============================================================================
// Reveal Tests
// =============================================================================

#[test]
fn test_cards_reveal_once() {
    let mut ui = start(full_layout());
    assert!(ui.page().view().revealed.is_empty());

    ui.dispatch(UiEvent::Scroll { y: 1000.0 });
    let revealed = ui.page().view().revealed.clone();
    assert_eq!(
        revealed,
        ["product-card-0", "product-card-1", "product-card-2"]
    );

    ui.dispatch(UiEvent::Scroll { y: 0.0 });
    ui.dispatch(UiEvent::Scroll { y: 1000.0 });
    assert_eq!(ui.page().view().revealed, revealed);

    ui.dispatch(UiEvent::Scroll { y: 1500.0 });
    ui.dispatch(UiEvent::Scroll { y: 2000.0 });
    assert_eq!(ui.page().view().revealed.len(), 6);
}

#[test]
fn test_reveal_disabled_without_intersection_support() {
    let mut ui = start(PageLayout {
        capabilities: Capabilities {
            intersection_observer: false,
        },
        ..full_layout()
    });
    ui.dispatch(UiEvent::Scroll { y: 1500.0 });

    let view = ui.page().view();
    assert!(view.revealed.is_empty());
    // The other scroll effects keep working.
    assert_eq!(view.hero_offset, Some(-750.0));
    assert_eq!(view.active_nav_link.as_deref(), Some("#collection"));
}

// =============================================================================
// Parallax and Navigation Tests
// =============================================================================

#[test]
fn test_parallax_follows_scroll() {
    let mut ui = start(full_layout());
    ui.dispatch(UiEvent::Scroll { y: 400.0 });
    assert_eq!(ui.page().view().hero_offset, Some(-200.0));
    ui.dispatch(UiEvent::Scroll { y: 0.0 });
    assert_eq!(ui.page().view().hero_offset, Some(0.0));
}

#[test]
fn test_no_parallax_without_hero() {
    let mut ui = start(PageLayout {
        hero: false,
        ..full_layout()
    });
    ui.dispatch(UiEvent::Scroll { y: 400.0 });
    assert_eq!(ui.page().view().hero_offset, None);
}

#[test]
fn test_active_nav_link_tracks_sections() {
    let mut ui = start(full_layout());

    ui.dispatch(UiEvent::Scroll { y: 100.0 });
    assert_eq!(ui.page().view().active_nav_link.as_deref(), Some("#home"));

    // collection starts counting at 900 - 1500 / 3 = 400.
    ui.dispatch(UiEvent::Scroll { y: 399.0 });
    assert_eq!(ui.page().view().active_nav_link.as_deref(), Some("#home"));
    ui.dispatch(UiEvent::Scroll { y: 400.0 });
    assert_eq!(ui.page().view().active_nav_link.as_deref(), Some("#collection"));

    ui.dispatch(UiEvent::Scroll { y: 2200.0 });
    assert_eq!(ui.page().view().active_nav_link.as_deref(), Some("#about"));

    let nav_patches = ui
        .page()
        .patches()
        .iter()
        .filter(|p| matches!(p, DomPatch::SetActiveNavLink { .. }))
        .count();
    assert_eq!(nav_patches, 3);
}

#[test]
fn test_parallax_overflow_only_stops_parallax() {
    let config = InteractionsConfig::from_json(r#"{ "parallax_factor": 1e308 }"#).unwrap();
    let mut ui = Interactions::boot(
        config,
        full_layout(),
        RecordingPage::new(),
        MemoryStore::new(),
    )
    .unwrap();
    ui.dispatch(UiEvent::Scroll { y: 1500.0 });

    let view = ui.page().view();
    assert_eq!(view.hero_offset, None);
    assert!(!view.revealed.is_empty());
    assert_eq!(view.active_nav_link.as_deref(), Some("#collection"));
}

#[test]
fn test_nav_link_click_scrolls_to_section() {
    let mut ui = start(full_layout());
    ui.dispatch(UiEvent::NavLinkClick { href: "#about" });
    ui.dispatch(UiEvent::NavLinkClick { href: "#missing" });
    ui.dispatch(UiEvent::NavLinkClick { href: "#" });
    assert_eq!(ui.page().view().scrolled_to, ["about"]);
}

// =============================================================================
// Step Tests
// =============================================================================

#[test]
fn test_three_ticks_from_first_step() {
    for steps in [2, 3, 4, 5] {
        let mut ui = start(PageLayout {
            steps,
            ..full_layout()
        });
        ui.advance(seconds(12));
        assert_eq!(ui.active_step(), Some(3 % steps));
        assert_eq!(ui.page().view().active_step, Some(3 % steps));
    }
}

#[test]
fn test_step_click_does_not_resync_cycle() {
    let mut ui = start(full_layout());
    ui.advance(seconds(5));
    assert_eq!(ui.active_step(), Some(1));

    ui.dispatch(UiEvent::StepClick { index: 3 });
    assert_eq!(ui.active_step(), Some(3));

    ui.advance(seconds(3));
    assert_eq!(ui.active_step(), Some(2));
}

#[test]
fn test_out_of_range_step_click_is_ignored() {
    let mut ui = start(full_layout());
    ui.dispatch(UiEvent::StepClick { index: 9 });
    assert_eq!(ui.active_step(), None);
    assert!(ui.page().patches().iter().all(|p| !matches!(p, DomPatch::ActivateStep { .. })));
}

#[test]
fn test_no_steps_no_timer() {
    let mut ui = start(PageLayout {
        steps: 0,
        ..full_layout()
    });
    assert_eq!(ui.pending_timers(), 0);
    ui.advance(seconds(60));
    assert_eq!(ui.active_step(), None);
}
