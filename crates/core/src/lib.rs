//! Authentic Only Core - Shared types library.
//!
//! This crate provides the value types used by the storefront interaction
//! layer and anything else that reads or writes the same data (for example
//! another page sharing the persisted cart).
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no timers,
//! no page access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for cart item IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
