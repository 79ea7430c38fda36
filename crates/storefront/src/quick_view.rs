//! Product quick view modal.
//!
//! The modal is rebuilt from a product snapshot on every open and discarded
//! on close; nothing carries over between openings. Its close controls are
//! only armed once the open delay passes, and each mount is numbered so
//! settle timers left over from an earlier modal never touch a newer one.

use std::time::Duration;

use crate::controller::{Deferred, Timers};
use crate::markup::{ProductSnapshot, QUICK_VIEW_DESCRIPTION};
use crate::page::{DomPatch, Page, PanelKind, QuickViewContent};
use crate::panel::{Panel, PanelState};

pub struct QuickView {
    panel: Panel,
    product: Option<ProductSnapshot>,
    mount: u64,
    arm_delay: Duration,
    close_delay: Duration,
}

impl QuickView {
    #[must_use]
    pub const fn new(arm_delay: Duration, close_delay: Duration) -> Self {
        Self {
            panel: Panel::new(),
            product: None,
            mount: 0,
            arm_delay,
            close_delay,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.panel.state()
    }

    /// The product the mounted modal shows.
    #[must_use]
    pub const fn product(&self) -> Option<&ProductSnapshot> {
        self.product.as_ref()
    }

    /// Build and mount a modal for `product`, discarding any modal already
    /// mounted.
    pub fn open(&mut self, product: ProductSnapshot, page: &mut dyn Page, timers: &mut Timers) {
        if self.product.take().is_some() {
            page.apply(DomPatch::UnmountQuickView);
        }

        self.mount += 1;
        self.panel = Panel::new();
        self.panel.begin_open();

        tracing::debug!(product = %product.name, mount = self.mount, "Opening quick view");

        page.apply(DomPatch::MountQuickView(QuickViewContent {
            name: product.name.clone(),
            price_text: product.price_text.clone(),
            image: product.image.clone(),
            description: QUICK_VIEW_DESCRIPTION.to_owned(),
        }));
        page.apply(DomPatch::SetPanelActive {
            panel: PanelKind::QuickView,
            active: true,
        });
        self.product = Some(product);

        timers.schedule(
            self.arm_delay,
            Deferred::SettleQuickView {
                mount: self.mount,
                target: PanelState::Open,
            },
        );
    }

    /// Handle a click on the close button or on the overlay itself. Ignored
    /// until the modal is armed.
    pub fn close(&mut self, page: &mut dyn Page, timers: &mut Timers) {
        if self.panel.state() != PanelState::Open || !self.panel.begin_close() {
            return;
        }
        page.apply(DomPatch::SetPanelActive {
            panel: PanelKind::QuickView,
            active: false,
        });
        timers.schedule(
            self.close_delay,
            Deferred::SettleQuickView {
                mount: self.mount,
                target: PanelState::Closed,
            },
        );
    }

    pub fn settle(&mut self, mount: u64, target: PanelState, page: &mut dyn Page) {
        if mount != self.mount || !self.panel.settle(target) {
            tracing::trace!(mount, current = self.mount, ?target, "Dropping stale quick view settle");
            return;
        }
        if target == PanelState::Closed && self.product.take().is_some() {
            page.apply(DomPatch::UnmountQuickView);
        }
    }
}
