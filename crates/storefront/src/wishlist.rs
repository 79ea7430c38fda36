//! Wishlist toggles.
//!
//! Membership is tracked per product name for the current page only.

use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct Wishlist {
    products: BTreeSet<String>,
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `product`, returning whether it is now wishlisted.
    pub fn toggle(&mut self, product: &str) -> bool {
        if self.products.remove(product) {
            false
        } else {
            self.products.insert(product.to_owned());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, product: &str) -> bool {
        self.products.contains(product)
    }

    /// Toast text for a toggle result.
    #[must_use]
    pub fn message(product: &str, added: bool) -> String {
        let direction = if added { "added to" } else { "removed from" };
        format!("{product} {direction} wishlist!")
    }
}
