//! The storefront interaction controller.
//!
//! [`Interactions`] is created once by the page's startup routine and owns
//! every feature's state. The host feeds it [`UiEvent`]s and advances its
//! virtual clock; it answers with [`DomPatch`]es on the [`Page`].
//!
//! Each event is routed to exactly one feature (scroll fans out to the
//! scroll effects). A handler that fails is reported against its
//! [`Feature`] and the controller keeps serving everything else.

use std::time::Duration;

use authentic_only_core::{CartItemId, Price};
use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::cart::{Cart, NewCartItem};
use crate::config::InteractionsConfig;
use crate::effects::{NavHighlighter, RevealTracker, StepCycler, parallax_offset};
use crate::error::{AppError, Feature, Result};
use crate::markup::{Action, PageLayout, ProductCard, ProductSnapshot, default_menu_links};
use crate::newsletter::{Newsletter, SUCCESS_MESSAGE, SubmitOutcome};
use crate::notifications::Toasts;
use crate::page::{DomPatch, FieldErrorId, Page, ToastId, ToastKind};
use crate::panel::{PanelState, SideMenu};
use crate::quick_view::QuickView;
use crate::scheduler::Scheduler;
use crate::storage::KeyValueStore;
use crate::wishlist::Wishlist;

/// The controller's timer queue.
pub type Timers = Scheduler<Deferred>;

/// Work scheduled for later by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Start a toast's exit animation.
    ToastLeave(ToastId),
    /// Remove a toast after its exit animation.
    ToastRemove(ToastId),
    /// Complete a side menu transition.
    SettleMenu(PanelState),
    /// Animate in the side menu link at this index.
    MenuItemIn(usize),
    /// Complete a transition of the quick view with this mount number.
    SettleQuickView { mount: u64, target: PanelState },
    /// Remove an inline newsletter error.
    ClearFieldError(FieldErrorId),
    /// The newsletter service accepted the pending address.
    CompleteSubscription,
    /// Advance the step highlighter.
    StepTick,
}

/// An input from the page.
#[derive(Clone, Copy)]
pub enum UiEvent<'a> {
    /// A click on a recognised control. `card` is the enclosing
    /// `.product-card`, if any; `data_id` the control's `data-id` attribute.
    Click {
        action: Action,
        card: Option<&'a dyn ProductCard>,
        data_id: Option<&'a str>,
    },
    /// A click on an in-page navigation link.
    NavLinkClick { href: &'a str },
    /// A click on the `.step` at this index.
    StepClick { index: usize },
    /// The newsletter form was submitted with this input value.
    NewsletterSubmit { value: &'a str },
    /// The window scrolled to `y`.
    Scroll { y: f64 },
    /// The viewport changed height.
    Resize { viewport_height: f64 },
}

impl UiEvent<'_> {
    /// Short name used in spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::NavLinkClick { .. } => "nav_link_click",
            Self::StepClick { .. } => "step_click",
            Self::NewsletterSubmit { .. } => "newsletter_submit",
            Self::Scroll { .. } => "scroll",
            Self::Resize { .. } => "resize",
        }
    }

    /// The feature a failure of this event is attributed to. Scroll effects
    /// report their own failures, each against its own feature.
    #[must_use]
    pub const fn feature(&self) -> Feature {
        match self {
            Self::Click { action, .. } => match action {
                Action::AddToCart | Action::RemoveFromCart => Feature::Cart,
                Action::Wishlist => Feature::Wishlist,
                Action::QuickView | Action::CloseQuickView | Action::QuickViewOverlay => {
                    Feature::QuickView
                }
                Action::OpenMenu | Action::CloseMenu | Action::MenuOverlay => Feature::SideMenu,
            },
            Self::NavLinkClick { .. } => Feature::SmoothScroll,
            Self::StepClick { .. } => Feature::Steps,
            Self::NewsletterSubmit { .. } => Feature::Newsletter,
            Self::Scroll { .. } | Self::Resize { .. } => Feature::Reveal,
        }
    }
}

/// Owns all interactive state of one page.
pub struct Interactions<P, S> {
    config: InteractionsConfig,
    layout: PageLayout,
    page: P,
    timers: Timers,
    session_start_ms: i64,
    scroll_y: f64,
    cart: Cart<S>,
    toasts: Toasts,
    side_menu: SideMenu,
    quick_view: QuickView,
    wishlist: Wishlist,
    newsletter: Option<Newsletter>,
    reveal: Option<RevealTracker>,
    nav: NavHighlighter,
    steps: Option<StepCycler>,
}

impl<P: Page, S: KeyValueStore> Interactions<P, S> {
    /// Wire up every feature the page supports, using the current time as
    /// the session start.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `config` fails validation.
    pub fn boot(
        config: InteractionsConfig,
        layout: PageLayout,
        page: P,
        storage: S,
    ) -> Result<Self> {
        Self::start(config, layout, page, storage, Utc::now())
    }

    /// Wire up every feature the page supports.
    ///
    /// Hydrates the cart and renders its counter, creates the side menu when
    /// the page lacks one, reveals whatever is already in view and starts the
    /// step cycle. Features whose markup is absent stay disabled.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `config` fails validation.
    #[instrument(skip_all, fields(storage_key = %config.storage_key))]
    pub fn start(
        config: InteractionsConfig,
        layout: PageLayout,
        mut page: P,
        storage: S,
        session_start: DateTime<Utc>,
    ) -> Result<Self> {
        config.validate()?;

        let cart = Cart::hydrate(storage, config.storage_key.clone());

        let links = if let Some(links) = &layout.side_menu_links {
            links.clone()
        } else {
            let links = default_menu_links();
            tracing::debug!(links = links.len(), "No side menu in markup, creating one");
            page.apply(DomPatch::CreateSideMenu {
                links: links.clone(),
            });
            links
        };
        let side_menu = SideMenu::new(
            links,
            config.menu_open_delay(),
            config.menu_close(),
            config.menu_item_stagger(),
        );

        let reveal = if layout.capabilities.intersection_observer {
            Some(RevealTracker::new(
                layout.reveal_targets.clone(),
                config.reveal_threshold,
                config.reveal_bottom_margin_px,
            ))
        } else {
            AppError::Unsupported("IntersectionObserver").report(Feature::Reveal);
            None
        };

        let newsletter = if layout.newsletter_form {
            Some(Newsletter::new(config.field_error(), config.newsletter_submit()))
        } else {
            tracing::debug!("No newsletter form, signup disabled");
            None
        };

        let mut timers = Timers::new();
        let steps = StepCycler::new(layout.steps);
        if steps.is_some() {
            timers.schedule_every(config.step_interval(), Deferred::StepTick);
        }

        let mut interactions = Self {
            toasts: Toasts::new(config.toast_visible(), config.toast_exit()),
            quick_view: QuickView::new(config.quick_view_arm(), config.quick_view_close()),
            nav: NavHighlighter::new(layout.nav_links.clone(), layout.sections.clone()),
            wishlist: Wishlist::new(),
            session_start_ms: session_start.timestamp_millis(),
            scroll_y: 0.0,
            config,
            layout,
            page,
            timers,
            cart,
            side_menu,
            newsletter,
            reveal,
            steps,
        };

        interactions.render_counter();
        if let Err(e) = interactions.evaluate_reveal() {
            e.report(Feature::Reveal);
        }

        tracing::info!(
            cart_items = interactions.cart.len(),
            steps = interactions.layout.steps,
            "Storefront interactions started"
        );
        Ok(interactions)
    }

    /// Handle one page event.
    #[instrument(skip_all, fields(event = event.name()))]
    pub fn dispatch(&mut self, event: UiEvent<'_>) {
        let feature = event.feature();
        if let Err(e) = self.handle(event) {
            e.report(feature);
        }
    }

    fn handle(&mut self, event: UiEvent<'_>) -> Result<()> {
        match event {
            UiEvent::Click {
                action,
                card,
                data_id,
            } => self.on_click(action, card, data_id),
            UiEvent::NavLinkClick { href } => {
                self.scroll_to(href);
                Ok(())
            }
            UiEvent::StepClick { index } => {
                self.select_step(index);
                Ok(())
            }
            UiEvent::NewsletterSubmit { value } => {
                self.submit_newsletter(value);
                Ok(())
            }
            UiEvent::Scroll { y } => {
                self.on_scroll(y);
                Ok(())
            }
            UiEvent::Resize { viewport_height } => {
                self.layout.viewport_height = viewport_height;
                self.evaluate_reveal()
            }
        }
    }

    fn on_click(
        &mut self,
        action: Action,
        card: Option<&dyn ProductCard>,
        data_id: Option<&str>,
    ) -> Result<()> {
        match action {
            Action::AddToCart => {
                let product = self.product_for(card)?;
                let price = Price::parse_display(&product.price_text)?;
                self.add_item(NewCartItem {
                    name: product.name,
                    price,
                    image: product.image,
                });
            }
            Action::RemoveFromCart => {
                let raw = data_id.ok_or(AppError::MissingElement("[data-id]"))?;
                let id: CartItemId = raw
                    .parse()
                    .map_err(|_| AppError::InvalidMarkup(format!("data-id {raw:?}")))?;
                self.remove_item(id);
            }
            Action::Wishlist => {
                let product = self.product_for(card)?;
                self.toggle_wishlist(&product.name);
            }
            Action::QuickView => {
                let card = card.ok_or(AppError::MissingElement(".product-card"))?;
                let product = ProductSnapshot::capture(card)?;
                self.quick_view
                    .open(product, &mut self.page, &mut self.timers);
            }
            Action::OpenMenu => self.side_menu.open(&mut self.page, &mut self.timers),
            Action::CloseMenu | Action::MenuOverlay => {
                self.side_menu.close(&mut self.page, &mut self.timers);
            }
            Action::CloseQuickView | Action::QuickViewOverlay => {
                self.quick_view.close(&mut self.page, &mut self.timers);
            }
        }
        Ok(())
    }

    /// The product a card-level control acts on: the enclosing card, or the
    /// product shown in the quick view for the modal's own buttons.
    fn product_for(&self, card: Option<&dyn ProductCard>) -> Result<ProductSnapshot> {
        match card {
            Some(card) => ProductSnapshot::capture(card),
            None => self
                .quick_view
                .product()
                .cloned()
                .ok_or(AppError::MissingElement(".product-card")),
        }
    }

    /// Add an item to the cart, persist it, update the counter and confirm
    /// with a toast. Returns the assigned id.
    ///
    /// A storage failure is reported; the item stays in the cart.
    #[instrument(skip(self, item), fields(product = %item.name))]
    pub fn add_item(&mut self, item: NewCartItem) -> CartItemId {
        let now_ms = self.now_ms();
        let added = self.cart.add(item, now_ms);
        self.persist_cart();
        self.render_counter();
        self.toasts.show(
            ToastKind::Notification,
            format!("{} added to cart!", added.name),
            &mut self.page,
            &mut self.timers,
        );
        tracing::info!(item_id = %added.id, price = %added.price.amount(), "Added to cart");
        added.id
    }

    /// Remove every item with `id`, persist and update the counter. Returns
    /// how many items were removed; an unknown id changes nothing.
    #[instrument(skip_all, fields(item_id = %id))]
    pub fn remove_item(&mut self, id: CartItemId) -> usize {
        let removed = self.cart.remove(id);
        self.persist_cart();
        self.render_counter();
        if removed == 0 {
            tracing::debug!("No cart item with this id");
        }
        removed
    }

    /// Sum of the cart's prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    fn persist_cart(&mut self) {
        if let Err(e) = self.cart.persist() {
            e.report(Feature::Cart);
        }
    }

    fn render_counter(&mut self) {
        if !self.layout.cart_counter {
            return;
        }
        let count = self.cart.len();
        self.page.apply(DomPatch::SetCartCounter {
            count,
            visible: count > 0,
        });
    }

    fn toggle_wishlist(&mut self, product: &str) {
        let added = self.wishlist.toggle(product);
        self.page.apply(DomPatch::SetWishlisted {
            product: product.to_owned(),
            active: added,
        });
        self.toasts.show(
            ToastKind::Notification,
            Wishlist::message(product, added),
            &mut self.page,
            &mut self.timers,
        );
    }

    fn scroll_to(&mut self, href: &str) {
        let Some(section) = self.layout.section_for_href(href) else {
            tracing::debug!(href, "Nav link has no matching section");
            return;
        };
        let section = section.id.clone();
        self.page.apply(DomPatch::ScrollIntoView { section });
    }

    fn select_step(&mut self, index: usize) {
        let Some(steps) = self.steps.as_mut() else {
            return;
        };
        if steps.select(index) {
            self.page.apply(DomPatch::ActivateStep { index });
        } else {
            tracing::debug!(index, steps = steps.step_count(), "Step click out of range");
        }
    }

    fn submit_newsletter(&mut self, value: &str) {
        let Some(newsletter) = self.newsletter.as_mut() else {
            tracing::debug!("Newsletter submit without a form");
            return;
        };
        if let SubmitOutcome::Rejected(reason) =
            newsletter.submit(value, &mut self.page, &mut self.timers)
        {
            tracing::debug!(%reason, "Newsletter signup rejected");
        }
    }

    fn on_scroll(&mut self, y: f64) {
        self.scroll_y = y;
        if let Err(e) = self.evaluate_reveal() {
            e.report(Feature::Reveal);
        }
        if let Err(e) = self.apply_parallax(y) {
            e.report(Feature::Parallax);
        }
        if self.nav.is_enabled()
            && let Err(e) = self.nav.update(y, &mut self.page)
        {
            e.report(Feature::NavHighlight);
        }
    }

    fn evaluate_reveal(&mut self) -> Result<()> {
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.evaluate(self.scroll_y, self.layout.viewport_height, &mut self.page)?;
        }
        Ok(())
    }

    fn apply_parallax(&mut self, y: f64) -> Result<()> {
        if self.layout.hero {
            let px = parallax_offset(y, self.config.parallax_factor)?;
            self.page.apply(DomPatch::SetHeroOffset { px });
        }
        Ok(())
    }

    /// Move the clock forward by `elapsed`, firing every timer that falls due
    /// in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(task) = self.timers.pop_due(until) {
            self.run(task);
        }
    }

    fn run(&mut self, task: Deferred) {
        tracing::trace!(?task, at = ?self.timers.now(), "Timer fired");
        match task {
            Deferred::ToastLeave(id) => self.toasts.begin_exit(id, &mut self.page, &mut self.timers),
            Deferred::ToastRemove(id) => self.toasts.remove(id, &mut self.page),
            Deferred::SettleMenu(target) => {
                self.side_menu
                    .settle(target, &mut self.page, &mut self.timers);
            }
            Deferred::MenuItemIn(index) => self.side_menu.item_in(index, &mut self.page),
            Deferred::SettleQuickView { mount, target } => {
                self.quick_view.settle(mount, target, &mut self.page);
            }
            Deferred::ClearFieldError(id) => {
                if let Some(newsletter) = self.newsletter.as_mut() {
                    newsletter.clear_error(id, &mut self.page);
                }
            }
            Deferred::CompleteSubscription => {
                let completed = self
                    .newsletter
                    .as_mut()
                    .and_then(|newsletter| newsletter.complete(&mut self.page));
                if completed.is_some() {
                    self.toasts.show(
                        ToastKind::Success,
                        SUCCESS_MESSAGE,
                        &mut self.page,
                        &mut self.timers,
                    );
                }
            }
            Deferred::StepTick => {
                if let Some(steps) = self.steps.as_mut() {
                    let index = steps.tick();
                    self.page.apply(DomPatch::ActivateStep { index });
                }
            }
        }
    }

    /// Current session time in epoch milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        let elapsed = i64::try_from(self.timers.now().as_millis()).unwrap_or(i64::MAX);
        self.session_start_ms.saturating_add(elapsed)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart<S> {
        &self.cart
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    pub const fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    #[must_use]
    pub const fn config(&self) -> &InteractionsConfig {
        &self.config
    }

    #[must_use]
    pub const fn menu_state(&self) -> PanelState {
        self.side_menu.state()
    }

    #[must_use]
    pub const fn quick_view_state(&self) -> PanelState {
        self.quick_view.state()
    }

    #[must_use]
    pub fn is_wishlisted(&self, product: &str) -> bool {
        self.wishlist.contains(product)
    }

    /// Whether a newsletter subscription is in flight.
    #[must_use]
    pub fn newsletter_busy(&self) -> bool {
        self.newsletter.as_ref().is_some_and(Newsletter::is_busy)
    }

    /// The highlighted step, if the page has steps and one is highlighted.
    #[must_use]
    pub fn active_step(&self) -> Option<usize> {
        self.steps.as_ref().and_then(StepCycler::active)
    }

    /// Number of timers waiting to fire, repeating ones included.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }
}
