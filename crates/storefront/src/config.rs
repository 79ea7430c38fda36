//! Interaction configuration.
//!
//! Every field has a default matching the live storefront, so a page only
//! needs to embed the values it wants to change:
//!
//! ```json
//! { "step_interval_ms": 6000, "storage_key": "luxuryCart" }
//! ```
//!
//! # Fields
//!
//! - `storage_key` - Local storage key holding the cart (default: `luxuryCart`)
//! - `toast_visible_ms` - How long a toast stays before leaving (default: 3000)
//! - `toast_exit_ms` - Exit animation length before removal (default: 500)
//! - `field_error_ms` - Inline newsletter error lifetime (default: 3000)
//! - `newsletter_submit_ms` - Simulated subscription latency (default: 1500)
//! - `menu_open_delay_ms` - Delay before the menu is marked active (default: 10)
//! - `menu_close_ms` - Menu slide-out transition (default: 300)
//! - `menu_item_stagger_ms` - Per-link stagger when the menu opens (default: 100)
//! - `quick_view_arm_ms` - Delay before quick view close controls respond (default: 100)
//! - `quick_view_close_ms` - Quick view fade-out before discard (default: 300)
//! - `step_interval_ms` - Step highlighter auto-advance period (default: 4000)
//! - `parallax_factor` - Hero offset per scrolled pixel (default: 0.5)
//! - `reveal_threshold` - Visible fraction that triggers a reveal (default: 0.1)
//! - `reveal_bottom_margin_px` - Viewport bottom pull-in for reveals (default: 50)

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration value {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Storefront interaction configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionsConfig {
    /// Local storage key for the persisted cart
    pub storage_key: String,
    /// Time a toast stays fully visible
    pub toast_visible_ms: u64,
    /// Toast exit animation length
    pub toast_exit_ms: u64,
    /// Lifetime of the inline newsletter error
    pub field_error_ms: u64,
    /// Simulated newsletter acceptance latency
    pub newsletter_submit_ms: u64,
    /// Delay between showing the side menu and marking it active
    pub menu_open_delay_ms: u64,
    /// Side menu close transition
    pub menu_close_ms: u64,
    /// Stagger between menu links animating in
    pub menu_item_stagger_ms: u64,
    /// Delay before quick view overlay/close clicks are honoured
    pub quick_view_arm_ms: u64,
    /// Quick view fade-out before the modal is discarded
    pub quick_view_close_ms: u64,
    /// Step highlighter auto-advance period
    pub step_interval_ms: u64,
    /// Hero background offset per scrolled pixel
    pub parallax_factor: f64,
    /// Visible fraction of an element that triggers its reveal
    pub reveal_threshold: f64,
    /// Bottom viewport margin pulled in before measuring reveals
    pub reveal_bottom_margin_px: f64,
}

impl Default for InteractionsConfig {
    fn default() -> Self {
        Self {
            storage_key: "luxuryCart".to_string(),
            toast_visible_ms: 3000,
            toast_exit_ms: 500,
            field_error_ms: 3000,
            newsletter_submit_ms: 1500,
            menu_open_delay_ms: 10,
            menu_close_ms: 300,
            menu_item_stagger_ms: 100,
            quick_view_arm_ms: 100,
            quick_view_close_ms: 300,
            step_interval_ms: 4000,
            parallax_factor: 0.5,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
        }
    }
}

impl InteractionsConfig {
    /// Load configuration from a JSON object embedded in the page.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed, names an unknown field,
    /// or a value fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "storage_key",
                "must not be empty".to_string(),
            ));
        }
        if self.step_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "step_interval_ms",
                "must be greater than zero".to_string(),
            ));
        }
        if !self.parallax_factor.is_finite() {
            return Err(ConfigError::InvalidValue(
                "parallax_factor",
                self.parallax_factor.to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::InvalidValue(
                "reveal_threshold",
                format!("{} is outside 0.0..=1.0", self.reveal_threshold),
            ));
        }
        if !self.reveal_bottom_margin_px.is_finite() || self.reveal_bottom_margin_px < 0.0 {
            return Err(ConfigError::InvalidValue(
                "reveal_bottom_margin_px",
                self.reveal_bottom_margin_px.to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    #[must_use]
    pub const fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    #[must_use]
    pub const fn field_error(&self) -> Duration {
        Duration::from_millis(self.field_error_ms)
    }

    #[must_use]
    pub const fn newsletter_submit(&self) -> Duration {
        Duration::from_millis(self.newsletter_submit_ms)
    }

    #[must_use]
    pub const fn menu_open_delay(&self) -> Duration {
        Duration::from_millis(self.menu_open_delay_ms)
    }

    #[must_use]
    pub const fn menu_close(&self) -> Duration {
        Duration::from_millis(self.menu_close_ms)
    }

    /// Gap between successive menu links animating in.
    #[must_use]
    pub const fn menu_item_stagger(&self) -> Duration {
        Duration::from_millis(self.menu_item_stagger_ms)
    }

    #[must_use]
    pub const fn quick_view_arm(&self) -> Duration {
        Duration::from_millis(self.quick_view_arm_ms)
    }

    #[must_use]
    pub const fn quick_view_close(&self) -> Duration {
        Duration::from_millis(self.quick_view_close_ms)
    }

    #[must_use]
    pub const fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = InteractionsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_key, "luxuryCart");
        assert_eq!(config.toast_visible(), Duration::from_secs(3));
        assert_eq!(config.step_interval(), Duration::from_secs(4));
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = InteractionsConfig::from_json(r#"{"step_interval_ms": 6000}"#).unwrap();
        assert_eq!(config.step_interval_ms, 6000);
        assert_eq!(config.newsletter_submit_ms, 1500);
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        let err = InteractionsConfig::from_json(r#"{"stepInterval": 1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = InteractionsConfig::from_json(r#"{"storage_key": "  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("storage_key", _)));

        let err = InteractionsConfig::from_json(r#"{"step_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("step_interval_ms", _)));

        let err = InteractionsConfig::from_json(r#"{"reveal_threshold": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("reveal_threshold", _)));
    }

    #[test]
    fn test_duration_accessors() {
        let config = InteractionsConfig::default();
        assert_eq!(config.menu_open_delay(), Duration::from_millis(10));
        assert_eq!(config.menu_close(), Duration::from_millis(300));
        assert_eq!(config.menu_item_stagger(), Duration::from_millis(100));
        assert_eq!(config.newsletter_submit(), Duration::from_millis(1500));
    }
}
