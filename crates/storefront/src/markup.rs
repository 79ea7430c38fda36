//! The markup contract consumed by the interaction layer.
//!
//! Nothing here touches a real document. A browser binding reads the page once
//! at startup into a [`PageLayout`], exposes product cards through
//! [`ProductCard`], and translates clicked class names with
//! [`Action::from_class`].

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Description shown in every quick view.
pub const QUICK_VIEW_DESCRIPTION: &str =
    "Experience unparalleled luxury with this meticulously crafted piece.";

/// Read access to a `.product-card` element.
///
/// Each accessor returns `None` when the card lacks the element.
pub trait ProductCard {
    /// Text of the card's `.product-name`.
    fn name(&self) -> Option<String>;
    /// Text of the card's `.product-price`, as displayed (e.g. `"$1,200"`).
    fn price_text(&self) -> Option<String>;
    /// Source of the card's `img`.
    fn image_src(&self) -> Option<String>;
}

/// An owned copy of a product card's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub name: String,
    pub price_text: String,
    pub image: String,
}

impl ProductSnapshot {
    /// Build a snapshot from literal values.
    #[must_use]
    pub fn new(name: &str, price_text: &str, image: &str) -> Self {
        Self {
            name: name.to_owned(),
            price_text: price_text.to_owned(),
            image: image.to_owned(),
        }
    }

    /// Copy every field out of `card`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingElement` naming the first absent element.
    pub fn capture(card: &dyn ProductCard) -> Result<Self> {
        Ok(Self {
            name: card.name().ok_or(AppError::MissingElement(".product-name"))?,
            price_text: card
                .price_text()
                .ok_or(AppError::MissingElement(".product-price"))?,
            image: card.image_src().ok_or(AppError::MissingElement("img"))?,
        })
    }
}

impl ProductCard for ProductSnapshot {
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn price_text(&self) -> Option<String> {
        Some(self.price_text.clone())
    }

    fn image_src(&self) -> Option<String> {
        Some(self.image.clone())
    }
}

/// A clickable control recognised by its class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddToCart,
    RemoveFromCart,
    Wishlist,
    QuickView,
    OpenMenu,
    CloseMenu,
    MenuOverlay,
    CloseQuickView,
    QuickViewOverlay,
}

impl Action {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("add-to-cart-btn", Self::AddToCart),
        ("remove-from-cart", Self::RemoveFromCart),
        ("wishlist-btn", Self::Wishlist),
        ("quick-view-btn", Self::QuickView),
        ("menu-toggle", Self::OpenMenu),
        ("close-menu", Self::CloseMenu),
        ("side-menu-overlay", Self::MenuOverlay),
        ("close-modal", Self::CloseQuickView),
        ("quick-view-overlay", Self::QuickViewOverlay),
    ];

    /// Look up the action bound to a class name.
    #[must_use]
    pub fn from_class(class: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == class)
            .map(|(_, action)| *action)
    }

    /// Find the first bound action in an element's class list.
    pub fn from_class_list<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        classes.into_iter().find_map(Self::from_class)
    }

    /// The class name that triggers this action.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, action)| *action == self)
            .map_or("", |(name, _)| name)
    }
}

/// A link in the side menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuLink {
    pub label: String,
    pub href: String,
}

/// Links inserted when the page has no side menu of its own.
#[must_use]
pub fn default_menu_links() -> Vec<MenuLink> {
    [
        ("About Us", "#about"),
        ("Contact", "#contact"),
        ("Support", "#support"),
        ("FAQ", "#faq"),
        ("Careers", "#careers"),
        ("Press", "#press"),
    ]
    .into_iter()
    .map(|(label, href)| MenuLink {
        label: label.to_owned(),
        href: href.to_owned(),
    })
    .collect()
}

/// A `section[id]` with its document geometry in CSS pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionGeometry {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// An element that fades in when scrolled into view
/// (`.product-card`, `.step`, `.trust-item`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevealTarget {
    /// Stable key the binding uses to find the element again.
    pub key: String,
    pub top: f64,
    pub height: f64,
}

/// Optional browser capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
        }
    }
}

/// What the page offers, read once at startup.
///
/// Each feature checks the parts it needs here and stays disabled when they
/// are absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// `.cart-counter` badge exists
    pub cart_counter: bool,
    /// Links of an existing `.side-menu`; `None` means the menu is created
    pub side_menu_links: Option<Vec<MenuLink>>,
    /// `.hero-section` exists
    pub hero: bool,
    /// `.newsletter form` with an email input and a button exists
    pub newsletter_form: bool,
    /// `href`s of `nav a[href^="#"]` links, in document order
    pub nav_links: Vec<String>,
    /// `section[id]` elements, in document order
    pub sections: Vec<SectionGeometry>,
    /// Number of `.step` elements
    pub steps: usize,
    /// Elements revealed on scroll
    pub reveal_targets: Vec<RevealTarget>,
    /// Viewport height in CSS pixels
    pub viewport_height: f64,
    pub capabilities: Capabilities,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            cart_counter: false,
            side_menu_links: None,
            hero: false,
            newsletter_form: false,
            nav_links: Vec::new(),
            sections: Vec::new(),
            steps: 0,
            reveal_targets: Vec::new(),
            viewport_height: 800.0,
            capabilities: Capabilities::default(),
        }
    }
}

impl PageLayout {
    /// Find a section by the fragment of an in-page link (`"#about"`).
    #[must_use]
    pub fn section_for_href(&self, href: &str) -> Option<&SectionGeometry> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        self.sections.iter().find(|section| section.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct BareCard;

    impl ProductCard for BareCard {
        fn name(&self) -> Option<String> {
            Some("Watch".to_string())
        }
        fn price_text(&self) -> Option<String> {
            None
        }
        fn image_src(&self) -> Option<String> {
            Some("/img/watch.jpg".to_string())
        }
    }

    #[test]
    fn test_capture_reports_missing_element() {
        let err = ProductSnapshot::capture(&BareCard).unwrap_err();
        assert!(matches!(err, AppError::MissingElement(".product-price")));
    }

    #[test]
    fn test_capture_copies_fields() {
        let card = ProductSnapshot::new("Ring", "$1,200", "/img/ring.jpg");
        let snapshot = ProductSnapshot::capture(&card).unwrap();
        assert_eq!(snapshot, card);
    }

    #[test]
    fn test_action_table() {
        assert_eq!(Action::from_class("add-to-cart-btn"), Some(Action::AddToCart));
        assert_eq!(Action::from_class("btn"), None);
        assert_eq!(
            Action::from_class_list(["btn", "primary", "quick-view-btn"]),
            Some(Action::QuickView)
        );
        assert_eq!(Action::RemoveFromCart.class_name(), "remove-from-cart");
    }

    #[test]
    fn test_section_for_href() {
        let layout = PageLayout {
            sections: vec![SectionGeometry {
                id: "about".to_string(),
                top: 900.0,
                height: 600.0,
            }],
            ..PageLayout::default()
        };
        assert_eq!(layout.section_for_href("#about").unwrap().top, 900.0);
        assert!(layout.section_for_href("#press").is_none());
        assert!(layout.section_for_href("#").is_none());
        assert!(layout.section_for_href("about").is_none());
    }

    #[test]
    fn test_layout_from_json() {
        let layout: PageLayout = serde_json::from_str(
            r#"{"cart_counter": true, "steps": 4, "capabilities": {"intersection_observer": false}}"#,
        )
        .unwrap();
        assert!(layout.cart_counter);
        assert_eq!(layout.steps, 4);
        assert!(!layout.capabilities.intersection_observer);
        assert!((layout.viewport_height - 800.0).abs() < f64::EPSILON);
        assert_eq!(default_menu_links().len(), 6);
    }
}
