//! Integration tests for the newsletter signup form.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use authentic_only_integration_tests::{full_layout, start};
use authentic_only_storefront::UiEvent;
use authentic_only_storefront::newsletter::{
    BUSY_LABEL, IDLE_LABEL, INVALID_EMAIL_MESSAGE, SUCCESS_MESSAGE,
};
use authentic_only_storefront::page::ToastKind;

fn submit(value: &str) -> UiEvent<'_> {
    UiEvent::NewsletterSubmit { value }
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_invalid_email_error_clears_after_three_seconds() {
    let mut ui = start(full_layout());
    ui.dispatch(submit("not-an-email"));

    let view = ui.page().view();
    assert_eq!(
        view.field_error.as_ref().map(|(_, m)| m.as_str()),
        Some(INVALID_EMAIL_MESSAGE)
    );
    assert!(view.input_invalid);
    assert!(!ui.newsletter_busy());

    ui.advance(Duration::from_millis(2999));
    assert!(ui.page().view().field_error.is_some());

    ui.advance(Duration::from_millis(1));
    assert!(ui.page().view().field_error.is_none());
    assert!(!ui.page().view().input_invalid);
}

#[test]
fn test_rejected_shapes() {
    for value in ["", "   ", "a@b", "@b.com", "a@.com", "a@b.", "a b@c.com", "a@@b.com"] {
        let mut ui = start(full_layout());
        ui.dispatch(submit(value));
        assert!(
            ui.page().view().field_error.is_some(),
            "{value:?} should be rejected"
        );
        assert!(!ui.newsletter_busy());
    }
}

#[test]
fn test_newer_error_replaces_older() {
    let mut ui = start(full_layout());
    ui.dispatch(submit("first"));
    let first = ui.page().view().field_error.clone().unwrap().0;

    ui.advance(Duration::from_millis(1000));
    ui.dispatch(submit("second"));
    let second = ui.page().view().field_error.clone().unwrap().0;
    assert_ne!(first, second);

    // The first error's timer still fires: it removes nothing but resets the
    // invalid marker.
    ui.advance(Duration::from_millis(2000));
    let view = ui.page().view();
    assert_eq!(view.field_error.as_ref().map(|(id, _)| *id), Some(second));
    assert!(!view.input_invalid);

    ui.advance(Duration::from_millis(1000));
    assert!(ui.page().view().field_error.is_none());
}

// =============================================================================
// Submission Tests
// =============================================================================

#[test]
fn test_valid_email_subscribes() {
    let mut ui = start(full_layout());
    ui.dispatch(submit(" a@b.com "));

    let view = ui.page().view();
    assert!(ui.newsletter_busy());
    assert!(view.submit_disabled);
    assert_eq!(view.submit_label.as_deref(), Some(BUSY_LABEL));
    assert!(view.field_error.is_none());

    ui.advance(Duration::from_millis(1500));

    let view = ui.page().view();
    assert!(!ui.newsletter_busy());
    assert!(!view.submit_disabled);
    assert_eq!(view.submit_label.as_deref(), Some(IDLE_LABEL));
    assert_eq!(view.input_cleared, 1);

    let success: Vec<_> = view
        .toasts
        .iter()
        .filter(|t| t.kind == ToastKind::Success)
        .collect();
    assert_eq!(success.len(), 1);
    assert_eq!(success[0].message, SUCCESS_MESSAGE);
}

#[test]
fn test_submissions_ignored_while_busy() {
    let mut ui = start(full_layout());
    ui.dispatch(submit("a@b.com"));
    ui.advance(Duration::from_millis(500));
    ui.dispatch(submit("c@d.com"));
    ui.dispatch(submit("not-an-email"));
    assert!(ui.page().view().field_error.is_none());

    ui.advance(Duration::from_millis(2000));
    let successes = ui
        .page()
        .patches()
        .iter()
        .filter(|p| {
            matches!(
                p,
                authentic_only_storefront::DomPatch::ShowToast {
                    kind: ToastKind::Success,
                    ..
                }
            )
        })
        .count();
    assert_eq!(successes, 1);
}

#[test]
fn test_success_toast_leaves_and_is_removed() {
    let mut ui = start(full_layout());
    ui.dispatch(submit("a@b.com"));
    ui.advance(Duration::from_millis(1500));
    assert_eq!(ui.page().view().toasts.len(), 1);

    ui.advance(Duration::from_millis(3000));
    assert!(ui.page().view().toasts[0].leaving);

    ui.advance(Duration::from_millis(500));
    assert!(ui.page().view().toasts.is_empty());
}

#[test]
fn test_can_subscribe_again_after_completion() {
    let mut ui = start(full_layout());
    ui.dispatch(submit("a@b.com"));
    ui.advance(Duration::from_millis(1500));
    ui.dispatch(submit("c@d.com"));
    assert!(ui.newsletter_busy());
}
