//! Visible document changes.
//!
//! Handlers never touch the document directly. They emit [`DomPatch`]es to a
//! [`Page`]; a browser binding applies each patch to the real DOM, while
//! [`RecordingPage`] keeps a log plus the resulting [`PageView`] for tests and
//! headless hosts.

use std::collections::BTreeSet;

use authentic_only_core::define_id;

use crate::markup::MenuLink;

define_id!(ToastId);
define_id!(FieldErrorId);

/// Visual flavour of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Bottom-right `.notification` (cart and wishlist feedback).
    Notification,
    /// Top-right `.success-message` (newsletter confirmation).
    Success,
}

/// Slide-in or overlay surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelKind {
    SideMenu,
    QuickView,
}

/// Contents of a freshly built quick view modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickViewContent {
    pub name: String,
    pub price_text: String,
    pub image: String,
    pub description: String,
}

/// One visible change to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum DomPatch {
    /// Set `.cart-counter` text and display.
    SetCartCounter { count: usize, visible: bool },
    /// Append a toast element.
    ShowToast {
        id: ToastId,
        kind: ToastKind,
        message: String,
    },
    /// Start a toast's exit animation.
    ToastLeaving { id: ToastId },
    /// Remove a toast element.
    RemoveToast { id: ToastId },
    /// Insert side menu markup (overlay, panel, close control, links).
    CreateSideMenu { links: Vec<MenuLink> },
    /// Toggle a panel's `display`.
    SetPanelDisplayed { panel: PanelKind, displayed: bool },
    /// Toggle a panel's `active` class.
    SetPanelActive { panel: PanelKind, active: bool },
    /// Toggle `animate-in` on the menu link at `index`.
    SetMenuItemAnimated { index: usize, animated: bool },
    /// Insert quick view markup with its own close, add-to-cart and wishlist
    /// controls.
    MountQuickView(QuickViewContent),
    /// Remove quick view markup entirely.
    UnmountQuickView,
    /// Toggle `active` on a product's wishlist controls.
    SetWishlisted { product: String, active: bool },
    /// Append an `.error-message` after the newsletter input.
    ShowFieldError { id: FieldErrorId, message: String },
    /// Remove a specific `.error-message`, if it is still present.
    RemoveFieldError { id: FieldErrorId },
    /// Toggle the newsletter input's invalid border.
    SetInputInvalid { invalid: bool },
    /// Update the newsletter button.
    SetSubmitState { disabled: bool, label: String },
    /// Empty the newsletter input.
    ClearInput,
    /// Add `animate-in` to a scroll reveal target.
    Reveal { target: String },
    /// Set the hero's `background-position-y` in pixels.
    SetHeroOffset { px: f64 },
    /// Mark the nav link with this `href` active and clear the rest.
    SetActiveNavLink { href: Option<String> },
    /// Mark the step at `index` active and clear the rest.
    ActivateStep { index: usize },
    /// Smoothly scroll a section into view.
    ScrollIntoView { section: String },
}

/// The visible document.
pub trait Page {
    fn apply(&mut self, patch: DomPatch);
}

impl Page for Vec<DomPatch> {
    fn apply(&mut self, patch: DomPatch) {
        self.push(patch);
    }
}

/// A toast as currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleToast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub leaving: bool,
}

/// Observable document state after applying a sequence of patches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub cart_counter: Option<String>,
    pub cart_counter_visible: bool,
    pub toasts: Vec<VisibleToast>,
    pub side_menu_links: Option<Vec<MenuLink>>,
    pub displayed_panels: BTreeSet<PanelKind>,
    pub active_panels: BTreeSet<PanelKind>,
    pub animated_menu_items: BTreeSet<usize>,
    pub quick_view: Option<QuickViewContent>,
    pub wishlisted: BTreeSet<String>,
    pub field_error: Option<(FieldErrorId, String)>,
    pub input_invalid: bool,
    pub submit_disabled: bool,
    pub submit_label: Option<String>,
    pub input_cleared: usize,
    pub revealed: Vec<String>,
    pub hero_offset: Option<f64>,
    pub active_nav_link: Option<String>,
    pub active_step: Option<usize>,
    pub scrolled_to: Vec<String>,
}

impl PageView {
    /// Apply one patch.
    pub fn apply(&mut self, patch: &DomPatch) {
        match patch {
            DomPatch::SetCartCounter { count, visible } => {
                self.cart_counter = Some(count.to_string());
                self.cart_counter_visible = *visible;
            }
            DomPatch::ShowToast { id, kind, message } => self.toasts.push(VisibleToast {
                id: *id,
                kind: *kind,
                message: message.clone(),
                leaving: false,
            }),
            DomPatch::ToastLeaving { id } => {
                if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == *id) {
                    toast.leaving = true;
                }
            }
            DomPatch::RemoveToast { id } => self.toasts.retain(|t| t.id != *id),
            DomPatch::CreateSideMenu { links } => self.side_menu_links = Some(links.clone()),
            DomPatch::SetPanelDisplayed { panel, displayed } => {
                toggle(&mut self.displayed_panels, *panel, *displayed);
            }
            DomPatch::SetPanelActive { panel, active } => {
                toggle(&mut self.active_panels, *panel, *active);
            }
            DomPatch::SetMenuItemAnimated { index, animated } => {
                toggle(&mut self.animated_menu_items, *index, *animated);
            }
            DomPatch::MountQuickView(content) => {
                self.quick_view = Some(content.clone());
                self.displayed_panels.insert(PanelKind::QuickView);
            }
            DomPatch::UnmountQuickView => {
                self.quick_view = None;
                self.displayed_panels.remove(&PanelKind::QuickView);
                self.active_panels.remove(&PanelKind::QuickView);
            }
            DomPatch::SetWishlisted { product, active } => {
                toggle(&mut self.wishlisted, product.clone(), *active);
            }
            DomPatch::ShowFieldError { id, message } => {
                self.field_error = Some((*id, message.clone()));
            }
            DomPatch::RemoveFieldError { id } => {
                if self.field_error.as_ref().is_some_and(|(current, _)| current == id) {
                    self.field_error = None;
                }
            }
            DomPatch::SetInputInvalid { invalid } => self.input_invalid = *invalid,
            DomPatch::SetSubmitState { disabled, label } => {
                self.submit_disabled = *disabled;
                self.submit_label = Some(label.clone());
            }
            DomPatch::ClearInput => self.input_cleared += 1,
            DomPatch::Reveal { target } => self.revealed.push(target.clone()),
            DomPatch::SetHeroOffset { px } => self.hero_offset = Some(*px),
            DomPatch::SetActiveNavLink { href } => self.active_nav_link.clone_from(href),
            DomPatch::ActivateStep { index } => self.active_step = Some(*index),
            DomPatch::ScrollIntoView { section } => self.scrolled_to.push(section.clone()),
        }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, on: bool) {
    if on {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

/// A [`Page`] that records every patch and tracks the resulting view.
#[derive(Debug, Clone, Default)]
pub struct RecordingPage {
    patches: Vec<DomPatch>,
    view: PageView,
}

impl RecordingPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every patch applied so far, oldest first.
    #[must_use]
    pub fn patches(&self) -> &[DomPatch] {
        &self.patches
    }

    /// The document as it currently looks.
    #[must_use]
    pub const fn view(&self) -> &PageView {
        &self.view
    }

    /// Forget recorded patches, keeping the current view.
    pub fn clear_log(&mut self) {
        self.patches.clear();
    }
}

impl Page for RecordingPage {
    fn apply(&mut self, patch: DomPatch) {
        self.view.apply(&patch);
        self.patches.push(patch);
    }
}
