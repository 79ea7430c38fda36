//! Client-side shopping cart.
//!
//! The cart is a flat, ordered list of items persisted as a JSON array under a
//! single storage key. It is hydrated once at startup and written back after
//! every mutation; the controller owns the side effects (counter badge,
//! toasts) that accompany each change.

use std::collections::HashSet;

use authentic_only_core::{CartItemId, Price};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::KeyValueStore;

/// An item in the cart. This is also the persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// An item about to be added; the cart assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// The visitor's cart, bound to its durable store.
#[derive(Debug)]
pub struct Cart<S> {
    storage: S,
    key: String,
    items: Vec<CartItem>,
    last_id: Option<i64>,
}

impl<S: KeyValueStore> Cart<S> {
    /// Load the cart saved under `key`.
    ///
    /// Never fails: absent, unreadable or malformed data yields an empty
    /// cart, logged as a warning. Entries repeating an id already loaded are
    /// dropped so ids stay unique.
    pub fn hydrate(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match storage.get(&key) {
            Ok(Some(json)) => decode_items(&json, &key),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cart storage unreadable, starting empty");
                Vec::new()
            }
        };
        let last_id = items.iter().map(|item| item.id.as_i64()).max();

        tracing::debug!(key = %key, items = items.len(), "Cart hydrated");

        Self {
            storage,
            key,
            items,
            last_id,
        }
    }

    /// Append an item, assigning an id derived from `now_ms` (epoch
    /// milliseconds).
    ///
    /// Ids are strictly increasing within the session, so two adds in the same
    /// millisecond, or a clock behind a hydrated id, still get distinct ids.
    /// Once the largest id is `i64::MAX`, the highest id not held by any item
    /// is used instead. Only memory changes; call [`Cart::persist`] afterwards.
    pub fn add(&mut self, item: NewCartItem, now_ms: i64) -> CartItem {
        let id = match self.last_id {
            Some(last) if last >= now_ms => {
                last.checked_add(1).unwrap_or_else(|| self.highest_free_id())
            }
            _ => now_ms,
        };
        self.last_id = Some(self.last_id.map_or(id, |last| last.max(id)));

        let item = CartItem {
            id: CartItemId::new(id),
            name: item.name,
            price: item.price,
            image: item.image,
        };
        self.items.push(item.clone());
        item
    }

    /// Remove every item with `id`, returning how many were removed.
    /// Only memory changes; call [`Cart::persist`] afterwards.
    pub fn remove(&mut self, id: CartItemId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before - self.items.len()
    }

    /// Sum of item prices; zero for an empty cart. Clamps at the largest
    /// representable amount rather than overflowing.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| &item.price).sum()
    }

    /// Write the full item list to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store rejects the write. The
    /// in-memory cart is unaffected either way.
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.items)?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The storage key the cart is saved under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S> Cart<S> {
    fn highest_free_id(&self) -> i64 {
        let taken: HashSet<i64> = self.items.iter().map(|item| item.id.as_i64()).collect();
        let id = (i64::MIN..=i64::MAX)
            .rev()
            .find(|id| !taken.contains(id))
            .unwrap_or(i64::MIN);
        tracing::warn!(key = %self.key, id, "Cart ids exhausted, reusing a free id");
        id
    }
}

fn decode_items(json: &str, key: &str) -> Vec<CartItem> {
    let items: Vec<CartItem> = match serde_json::from_str(json) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Stored cart is malformed, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id);
            if !fresh {
                tracing::warn!(key = %key, id = %item.id, "Dropping stored cart item with duplicate id");
            }
            fresh
        })
        .collect()
}
