//! Authentic Only storefront interactions.
//!
//! The client-side behaviour of the storefront as a headless library: the
//! persistent cart, the side menu and quick view panels, the newsletter form
//! and the scroll-driven effects.
//!
//! # Architecture
//!
//! - [`Interactions`] owns all state and is driven through typed [`UiEvent`]s
//! - Visible changes are emitted as [`DomPatch`]es to a [`Page`] implementation
//! - Delays run on a virtual, non-cancellable timer queue the host advances
//! - The cart persists through any [`KeyValueStore`]
//!
//! A browser binding implements [`Page`], [`KeyValueStore`] and
//! [`ProductCard`]; [`RecordingPage`] and [`MemoryStore`] serve tests and
//! headless hosts.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod markup;
pub mod newsletter;
pub mod notifications;
pub mod page;
pub mod panel;
pub mod quick_view;
pub mod scheduler;
pub mod storage;
pub mod telemetry;
pub mod wishlist;

pub use cart::{Cart, CartItem, NewCartItem};
pub use config::InteractionsConfig;
pub use controller::{Interactions, UiEvent};
pub use error::{AppError, Feature};
pub use markup::{Action, PageLayout, ProductCard, ProductSnapshot};
pub use page::{DomPatch, Page, PageView, RecordingPage};
pub use panel::PanelState;
pub use storage::{KeyValueStore, MemoryStore};
