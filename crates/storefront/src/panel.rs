//! Slide-in panels.
//!
//! Every panel walks `Closed -> Opening -> Open -> Closing -> Closed`. The
//! transient states exist so a CSS transition can play; a settle timer
//! finishes each transition.
//!
//! Repeated open/close requests simply re-enter the target state. Settle
//! timers cannot be cancelled, so a settle only takes effect while the panel
//! is still in the transient state it was scheduled for; a stale one is
//! dropped when it fires.

use std::time::Duration;

use crate::controller::{Deferred, Timers};
use crate::markup::MenuLink;
use crate::page::{DomPatch, Page, PanelKind};

/// Visibility state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelState {
    /// Whether the panel is on screen in any form.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// The state machine shared by all panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panel {
    state: PanelState,
}

impl Panel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PanelState::Closed,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    /// Move toward `Open`. Returns `false` if the panel is already opening or
    /// open.
    pub const fn begin_open(&mut self) -> bool {
        match self.state {
            PanelState::Closed | PanelState::Closing => {
                self.state = PanelState::Opening;
                true
            }
            PanelState::Opening | PanelState::Open => false,
        }
    }

    /// Move toward `Closed`. Returns `false` if the panel is already closing
    /// or closed.
    pub const fn begin_close(&mut self) -> bool {
        match self.state {
            PanelState::Opening | PanelState::Open => {
                self.state = PanelState::Closing;
                true
            }
            PanelState::Closing | PanelState::Closed => false,
        }
    }

    /// Complete a transition toward `target`. Returns `false`, changing
    /// nothing, unless the panel is in the matching transient state.
    pub const fn settle(&mut self, target: PanelState) -> bool {
        match (self.state, target) {
            (PanelState::Opening, PanelState::Open) | (PanelState::Closing, PanelState::Closed) => {
                self.state = target;
                true
            }
            _ => false,
        }
    }
}

/// The slide-out navigation menu and its overlay.
pub struct SideMenu {
    panel: Panel,
    links: Vec<MenuLink>,
    open_delay: Duration,
    close_delay: Duration,
    stagger: Duration,
}

impl SideMenu {
    #[must_use]
    pub fn new(
        links: Vec<MenuLink>,
        open_delay: Duration,
        close_delay: Duration,
        stagger: Duration,
    ) -> Self {
        Self {
            panel: Panel::new(),
            links,
            open_delay,
            close_delay,
            stagger,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.panel.state()
    }

    #[must_use]
    pub fn links(&self) -> &[MenuLink] {
        &self.links
    }

    /// Show the menu, then mark it active once the open delay passes.
    pub fn open(&mut self, page: &mut dyn Page, timers: &mut Timers) {
        if !self.panel.begin_open() {
            return;
        }
        tracing::debug!("Opening side menu");
        page.apply(DomPatch::SetPanelDisplayed {
            panel: PanelKind::SideMenu,
            displayed: true,
        });
        timers.schedule(
            self.open_delay,
            Deferred::SettleMenu(PanelState::Open),
        );
    }

    /// Deactivate the menu and hide it after the close transition.
    pub fn close(&mut self, page: &mut dyn Page, timers: &mut Timers) {
        if !self.panel.begin_close() {
            return;
        }
        tracing::debug!("Closing side menu");
        page.apply(DomPatch::SetPanelActive {
            panel: PanelKind::SideMenu,
            active: false,
        });
        for index in 0..self.links.len() {
            page.apply(DomPatch::SetMenuItemAnimated {
                index,
                animated: false,
            });
        }
        timers.schedule(
            self.close_delay,
            Deferred::SettleMenu(PanelState::Closed),
        );
    }

    pub fn settle(&mut self, target: PanelState, page: &mut dyn Page, timers: &mut Timers) {
        if !self.panel.settle(target) {
            tracing::trace!(?target, state = ?self.panel.state(), "Dropping stale side menu settle");
            return;
        }
        match target {
            PanelState::Open => {
                page.apply(DomPatch::SetPanelActive {
                    panel: PanelKind::SideMenu,
                    active: true,
                });
                for index in 0..self.links.len() {
                    let delay = self
                        .stagger
                        .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
                    timers.schedule(delay, Deferred::MenuItemIn(index));
                }
            }
            PanelState::Closed => page.apply(DomPatch::SetPanelDisplayed {
                panel: PanelKind::SideMenu,
                displayed: false,
            }),
            PanelState::Opening | PanelState::Closing => {}
        }
    }

    /// Animate one link in, unless the menu has started closing since.
    pub fn item_in(&self, index: usize, page: &mut dyn Page) {
        if self.panel.state() == PanelState::Open && index < self.links.len() {
            page.apply(DomPatch::SetMenuItemAnimated {
                index,
                animated: true,
            });
        }
    }
}
