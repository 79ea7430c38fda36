//! Scroll-position effects: hero parallax and active nav highlighting.

use crate::error::{AppError, Result};
use crate::markup::SectionGeometry;
use crate::page::{DomPatch, Page};

/// Hero background offset for a scroll position.
///
/// # Errors
///
/// Returns [`AppError::InvalidGeometry`] if the offset is not finite.
pub fn parallax_offset(scroll_y: f64, factor: f64) -> Result<f64> {
    let offset = -(scroll_y * factor);
    if offset.is_finite() {
        Ok(offset)
    } else {
        Err(AppError::InvalidGeometry("hero offset"))
    }
}

/// The section the reader is in: the last one, in document order, that has
/// been scrolled past `top - height / 3`.
#[must_use]
pub fn current_section(sections: &[SectionGeometry], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| scroll_y >= section.top - section.height / 3.0)
        .last()
        .map(|section| section.id.as_str())
}

/// Keeps exactly one nav link (or none) marked active.
pub struct NavHighlighter {
    links: Vec<String>,
    sections: Vec<SectionGeometry>,
    active: Option<Option<String>>,
}

impl NavHighlighter {
    #[must_use]
    pub const fn new(links: Vec<String>, sections: Vec<SectionGeometry>) -> Self {
        Self {
            links,
            sections,
            active: None,
        }
    }

    /// Nothing to highlight without both links and sections.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.links.is_empty() && !self.sections.is_empty()
    }

    /// The link that should be active at `scroll_y`.
    #[must_use]
    pub fn active_link(&self, scroll_y: f64) -> Option<&str> {
        let id = current_section(&self.sections, scroll_y)?;
        self.links
            .iter()
            .find(|href| href.strip_prefix('#') == Some(id))
            .map(String::as_str)
    }

    /// Emit a patch when the active link changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidGeometry`] if `scroll_y` is not finite; the
    /// highlighted link is left as it was.
    pub fn update(&mut self, scroll_y: f64, page: &mut dyn Page) -> Result<()> {
        if !scroll_y.is_finite() {
            return Err(AppError::InvalidGeometry("scroll position"));
        }
        let next = self.active_link(scroll_y).map(str::to_owned);
        if self.active.as_ref() == Some(&next) {
            return Ok(());
        }
        page.apply(DomPatch::SetActiveNavLink { href: next.clone() });
        self.active = Some(next);
        Ok(())
    }
}
