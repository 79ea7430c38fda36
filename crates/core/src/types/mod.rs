//! Core types for the Authentic Only storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;

pub use email::{Email, EmailError, is_form_whitespace};
pub use id::*;
pub use price::{Price, PriceError};
