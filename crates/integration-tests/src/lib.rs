//! End-to-end tests for the Authentic Only storefront interactions.
//!
//! Every scenario drives a real [`Interactions`] controller against a
//! [`RecordingPage`] and a [`MemoryStore`], advancing the virtual clock
//! instead of sleeping.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p authentic-only-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Adding, removing and persisting cart items
//! - `panels` - Side menu and quick view transitions
//! - `newsletter` - Signup validation and submission
//! - `effects` - Reveal, parallax, nav highlighting and steps
//! - `isolation` - One failing feature leaving the others working

use authentic_only_storefront::markup::{RevealTarget, SectionGeometry};
use authentic_only_storefront::{
    Action, Interactions, InteractionsConfig, MemoryStore, PageLayout, ProductCard,
    RecordingPage, UiEvent,
};
use chrono::{DateTime, Utc};

/// The controller under test.
pub type Storefront = Interactions<RecordingPage, MemoryStore>;

/// Session start used by every scenario, in epoch milliseconds.
pub const SESSION_START_MS: i64 = 1_700_000_000_000;

/// A product card as it appears in the collection grid.
#[derive(Debug, Clone, Default)]
pub struct CardFixture {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl CardFixture {
    #[must_use]
    pub fn new(name: &str, price: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            price: Some(price.to_string()),
            image: Some(format!("/images/{}.jpg", name.to_lowercase().replace(' ', "-"))),
        }
    }

    #[must_use]
    pub fn watch() -> Self {
        Self::new("Watch", "$500")
    }

    #[must_use]
    pub fn ring() -> Self {
        Self::new("Ring", "$1,200")
    }
}

impl ProductCard for CardFixture {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn price_text(&self) -> Option<String> {
        self.price.clone()
    }

    fn image_src(&self) -> Option<String> {
        self.image.clone()
    }
}

/// A page with every feature present: counter, hero, newsletter, four
/// steps, three sections with matching nav links, and a grid of cards.
#[must_use]
pub fn full_layout() -> PageLayout {
    let sections = [("home", 0.0, 900.0), ("collection", 900.0, 1500.0), ("about", 2400.0, 900.0)]
        .into_iter()
        .map(|(id, top, height)| SectionGeometry {
            id: id.to_string(),
            top,
            height,
        })
        .collect();

    let reveal_targets = (0..6_u32)
        .map(|i| RevealTarget {
            key: format!("product-card-{i}"),
            top: 1000.0 + f64::from(i) * 250.0,
            height: 220.0,
        })
        .collect();

    PageLayout {
        cart_counter: true,
        hero: true,
        newsletter_form: true,
        nav_links: vec!["#home".into(), "#collection".into(), "#about".into()],
        sections,
        steps: 4,
        reveal_targets,
        ..PageLayout::default()
    }
}

/// Start a controller on `layout` with an empty store.
///
/// # Panics
///
/// Panics if the default configuration is rejected.
#[must_use]
pub fn start(layout: PageLayout) -> Storefront {
    start_with_store(layout, MemoryStore::new())
}

/// Start a controller on `layout` backed by `store`.
///
/// # Panics
///
/// Panics if the default configuration is rejected.
#[must_use]
pub fn start_with_store(layout: PageLayout, store: MemoryStore) -> Storefront {
    let session_start = DateTime::<Utc>::from_timestamp_millis(SESSION_START_MS)
        .unwrap_or_else(|| unreachable!("fixed timestamp is in range"));
    Interactions::start(
        InteractionsConfig::default(),
        layout,
        RecordingPage::new(),
        store,
        session_start,
    )
    .unwrap_or_else(|e| panic!("default config rejected: {e}"))
}

/// A click on a control inside `card`.
#[must_use]
pub fn click_on(action: Action, card: &dyn ProductCard) -> UiEvent<'_> {
    UiEvent::Click {
        action,
        card: Some(card),
        data_id: None,
    }
}

/// A click on a control outside any product card.
#[must_use]
pub const fn click(action: Action) -> UiEvent<'static> {
    UiEvent::Click {
        action,
        card: None,
        data_id: None,
    }
}
