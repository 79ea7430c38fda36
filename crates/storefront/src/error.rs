//! Unified error handling with a diagnostic channel.
//!
//! Every event handler returns `Result<(), AppError>`. The controller never
//! propagates a handler failure past the event that caused it: it calls
//! [`AppError::report`], which logs the failure against the [`Feature`] that
//! raised it, and carries on serving every other feature.

use authentic_only_core::PriceError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Independently wired storefront features.
///
/// Used to attribute diagnostics; a failure in one feature never disables
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Cart,
    SideMenu,
    QuickView,
    Wishlist,
    Newsletter,
    Reveal,
    Parallax,
    NavHighlight,
    SmoothScroll,
    Steps,
}

impl Feature {
    /// Stable name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::SideMenu => "side_menu",
            Self::QuickView => "quick_view",
            Self::Wishlist => "wishlist",
            Self::Newsletter => "newsletter",
            Self::Reveal => "reveal",
            Self::Parallax => "parallax",
            Self::NavHighlight => "nav_highlight",
            Self::SmoothScroll => "smooth_scroll",
            Self::Steps => "steps",
        }
    }
}

/// Application-level error type for storefront interactions.
#[derive(Debug, Error)]
pub enum AppError {
    /// Interaction configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart state could not be encoded for storage.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A product card or control lacks an element the feature reads.
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    /// Markup is present but its content cannot be interpreted.
    #[error("Invalid markup: {0}")]
    InvalidMarkup(String),

    /// A product card shows a price that cannot be parsed.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// A scroll or layout measurement is not a finite number.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    /// The host lacks a browser capability the feature needs.
    #[error("Unsupported capability: {0}")]
    Unsupported(&'static str),
}

impl AppError {
    /// Whether the failure comes from the page markup rather than the runtime.
    #[must_use]
    pub const fn is_markup(&self) -> bool {
        matches!(
            self,
            Self::MissingElement(_) | Self::InvalidMarkup(_) | Self::InvalidPrice(_)
        )
    }

    /// Report the failure to the diagnostic channel.
    ///
    /// Markup problems and missing capabilities are logged as warnings since
    /// they degrade one feature of the page, runtime failures as errors.
    pub fn report(&self, feature: Feature) {
        if let Self::Unsupported(capability) = self {
            tracing::warn!(
                feature = feature.as_str(),
                capability,
                "{capability} not supported, feature disabled"
            );
        } else if self.is_markup() {
            tracing::warn!(feature = feature.as_str(), error = %self, "Storefront markup error");
        } else {
            tracing::error!(feature = feature.as_str(), error = %self, "Storefront interaction error");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::MissingElement(".product-name");
        assert_eq!(err.to_string(), "Missing element: .product-name");

        let err = AppError::InvalidMarkup("data-id \"abc\"".to_string());
        assert_eq!(err.to_string(), "Invalid markup: data-id \"abc\"");

        let err = AppError::from(PriceError::Negative);
        assert_eq!(err.to_string(), "Invalid price: price cannot be negative");

        let err = AppError::InvalidGeometry("hero offset");
        assert_eq!(err.to_string(), "Invalid geometry: hero offset");
    }

    #[test]
    fn test_markup_classification() {
        assert!(AppError::MissingElement("img").is_markup());
        assert!(AppError::InvalidPrice(PriceError::Empty).is_markup());
        assert!(!AppError::Unsupported("IntersectionObserver").is_markup());
        assert!(!AppError::InvalidGeometry("viewport").is_markup());
        assert!(!AppError::Storage(StorageError::QuotaExceeded { key: "k".into() }).is_markup());
    }

    #[test]
    fn test_feature_names() {
        assert_eq!(Feature::Cart.as_str(), "cart");
        assert_eq!(Feature::Parallax.as_str(), "parallax");
        assert_eq!(Feature::NavHighlight.as_str(), "nav_highlight");
    }
}
