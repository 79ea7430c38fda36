//! Transient toasts.
//!
//! A toast stays fully visible for a fixed time, plays an exit animation, and
//! removes itself. Both steps are ordinary timers; nothing can dismiss a toast
//! early.

use std::time::Duration;

use crate::controller::{Deferred, Timers};
use crate::page::{DomPatch, Page, ToastId, ToastKind};

pub struct Toasts {
    visible_for: Duration,
    exit_for: Duration,
    next_id: i64,
    live: Vec<ToastId>,
}

impl Toasts {
    #[must_use]
    pub const fn new(visible_for: Duration, exit_for: Duration) -> Self {
        Self {
            visible_for,
            exit_for,
            next_id: 1,
            live: Vec::new(),
        }
    }

    /// Display a toast and schedule its exit.
    pub fn show(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        page: &mut dyn Page,
        timers: &mut Timers,
    ) -> ToastId {
        let id = ToastId::new(self.next_id);
        self.next_id += 1;

        let message = message.into();
        tracing::debug!(toast = %id, ?kind, %message, "Showing toast");

        self.live.push(id);
        page.apply(DomPatch::ShowToast { id, kind, message });
        timers.schedule(self.visible_for, Deferred::ToastLeave(id));
        id
    }

    /// Start the exit animation and schedule removal.
    pub fn begin_exit(&mut self, id: ToastId, page: &mut dyn Page, timers: &mut Timers) {
        if !self.live.contains(&id) {
            return;
        }
        page.apply(DomPatch::ToastLeaving { id });
        timers.schedule(self.exit_for, Deferred::ToastRemove(id));
    }

    pub fn remove(&mut self, id: ToastId, page: &mut dyn Page) {
        let before = self.live.len();
        self.live.retain(|live| *live != id);
        if self.live.len() != before {
            page.apply(DomPatch::RemoveToast { id });
        }
    }

    /// Toasts currently on the page, oldest first.
    #[must_use]
    pub fn live(&self) -> &[ToastId] {
        &self.live
    }
}
