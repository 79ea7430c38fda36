//! Newsletter signup form.
//!
//! Validation happens locally; on success the form goes busy and a timer
//! stands in for the newsletter service accepting the address. There is no
//! network call.

use std::time::Duration;

use authentic_only_core::{Email, EmailError, is_form_whitespace};

use crate::controller::{Deferred, Timers};
use crate::page::{DomPatch, FieldErrorId, Page};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SUCCESS_MESSAGE: &str = "Thank you for subscribing to our luxury newsletter!";
pub const IDLE_LABEL: &str = "Subscribe";
pub const BUSY_LABEL: &str = "Subscribing...";

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Ignored,
    /// The address failed validation; an inline error is showing.
    Rejected(EmailError),
    /// The address is being subscribed.
    Accepted(Email),
}

pub struct Newsletter {
    error_for: Duration,
    submit_for: Duration,
    next_error_id: i64,
    current_error: Option<FieldErrorId>,
    pending: Option<Email>,
}

impl Newsletter {
    #[must_use]
    pub const fn new(error_for: Duration, submit_for: Duration) -> Self {
        Self {
            error_for,
            submit_for,
            next_error_id: 1,
            current_error: None,
            pending: None,
        }
    }

    /// Whether the submit button is disabled.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn current_error(&self) -> Option<FieldErrorId> {
        self.current_error
    }

    /// Validate `raw` and either show an inline error or start subscribing.
    pub fn submit(&mut self, raw: &str, page: &mut dyn Page, timers: &mut Timers) -> SubmitOutcome {
        if self.is_busy() {
            tracing::debug!("Newsletter submission already in flight, ignoring");
            return SubmitOutcome::Ignored;
        }

        match Email::parse(raw.trim_matches(is_form_whitespace)) {
            Err(e) => {
                self.show_error(page, timers);
                tracing::debug!(error = %e, "Newsletter email rejected");
                SubmitOutcome::Rejected(e)
            }
            Ok(email) => {
                page.apply(DomPatch::SetSubmitState {
                    disabled: true,
                    label: BUSY_LABEL.to_owned(),
                });
                timers.schedule(self.submit_for, Deferred::CompleteSubscription);
                tracing::info!(domain = email.domain(), "Newsletter subscription started");
                self.pending = Some(email.clone());
                SubmitOutcome::Accepted(email)
            }
        }
    }

    fn show_error(&mut self, page: &mut dyn Page, timers: &mut Timers) {
        if let Some(previous) = self.current_error.take() {
            page.apply(DomPatch::RemoveFieldError { id: previous });
        }

        let id = FieldErrorId::new(self.next_error_id);
        self.next_error_id += 1;

        page.apply(DomPatch::ShowFieldError {
            id,
            message: INVALID_EMAIL_MESSAGE.to_owned(),
        });
        page.apply(DomPatch::SetInputInvalid { invalid: true });
        self.current_error = Some(id);
        timers.schedule(self.error_for, Deferred::ClearFieldError(id));
    }

    /// Remove error `id` when its timer fires.
    ///
    /// The invalid border is reset even when a newer error has replaced this
    /// one, since the timer cannot be cancelled.
    pub fn clear_error(&mut self, id: FieldErrorId, page: &mut dyn Page) {
        if self.current_error == Some(id) {
            self.current_error = None;
        }
        page.apply(DomPatch::RemoveFieldError { id });
        page.apply(DomPatch::SetInputInvalid { invalid: false });
    }

    /// Finish the in-flight subscription: clear the input and re-enable the
    /// button. Returns the subscribed address.
    pub fn complete(&mut self, page: &mut dyn Page) -> Option<Email> {
        let email = self.pending.take()?;
        page.apply(DomPatch::ClearInput);
        page.apply(DomPatch::SetSubmitState {
            disabled: false,
            label: IDLE_LABEL.to_owned(),
        });
        tracing::info!(domain = email.domain(), "Newsletter subscription accepted");
        Some(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::RecordingPage;

    fn newsletter() -> Newsletter {
        Newsletter::new(Duration::from_millis(3000), Duration::from_millis(1500))
    }

    #[test]
    fn test_invalid_email_shows_error() {
        let mut form = newsletter();
        let mut page = RecordingPage::new();
        let mut timers = Timers::new();

        let outcome = form.submit("not-an-email", &mut page, &mut timers);
        assert_eq!(outcome, SubmitOutcome::Rejected(EmailError::MissingAtSymbol));
        assert!(page.view().input_invalid);
        assert_eq!(
            page.view().field_error.as_ref().map(|(_, m)| m.as_str()),
            Some(INVALID_EMAIL_MESSAGE)
        );
        assert!(!form.is_busy());

        let task = timers.pop_due(Duration::from_millis(3000));
        let Some(Deferred::ClearFieldError(id)) = task else {
            panic!("expected error clear timer, got {task:?}");
        };
        form.clear_error(id, &mut page);
        assert!(page.view().field_error.is_none());
        assert!(!page.view().input_invalid);
    }

    #[test]
    fn test_new_error_replaces_old() {
        let mut form = newsletter();
        let mut page = RecordingPage::new();
        let mut timers = Timers::new();

        form.submit("bad", &mut page, &mut timers);
        let first = form.current_error();
        form.submit("still bad", &mut page, &mut timers);
        let second = form.current_error();

        assert_ne!(first, second);
        assert_eq!(page.view().field_error.as_ref().map(|(id, _)| *id), second);
    }

    #[test]
    fn test_valid_email_goes_busy_then_completes() {
        let mut form = newsletter();
        let mut page = RecordingPage::new();
        let mut timers = Timers::new();

        let outcome = form.submit("  a@b.com ", &mut page, &mut timers);
        assert!(matches!(outcome, SubmitOutcome::Accepted(ref e) if e.as_str() == "a@b.com"));
        assert!(form.is_busy());
        assert!(page.view().submit_disabled);
        assert_eq!(page.view().submit_label.as_deref(), Some(BUSY_LABEL));

        assert_eq!(
            form.submit("a@b.com", &mut page, &mut timers),
            SubmitOutcome::Ignored
        );

        assert_eq!(
            timers.pop_due(Duration::from_millis(1500)),
            Some(Deferred::CompleteSubscription)
        );
        let email = form.complete(&mut page);
        assert_eq!(email.map(Email::into_inner), Some("a@b.com".to_string()));
        assert!(!form.is_busy());
        assert!(!page.view().submit_disabled);
        assert_eq!(page.view().submit_label.as_deref(), Some(IDLE_LABEL));
        assert_eq!(page.view().input_cleared, 1);
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        let mut form = newsletter();
        let mut page = RecordingPage::new();
        let mut timers = Timers::new();

        let outcome = form.submit("\u{feff}a@b.com\u{feff}", &mut page, &mut timers);
        assert!(matches!(outcome, SubmitOutcome::Accepted(ref e) if e.as_str() == "a@b.com"));
    }

    #[test]
    fn test_complete_without_pending_is_noop() {
        let mut form = newsletter();
        let mut page = RecordingPage::new();
        assert!(form.complete(&mut page).is_none());
        assert!(page.patches().is_empty());
    }
}
