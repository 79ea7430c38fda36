//! Viewport reveal tracking.
//!
//! Emulates an intersection observer with a bottom root margin: the viewport
//! is shrunk by the margin, and an element is revealed the first time the
//! visible share of its height reaches the threshold. Revealed elements never
//! revert.

use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::markup::RevealTarget;
use crate::page::{DomPatch, Page};

pub struct RevealTracker {
    targets: Vec<RevealTarget>,
    revealed: HashSet<String>,
    threshold: f64,
    bottom_margin: f64,
}

impl RevealTracker {
    #[must_use]
    pub fn new(targets: Vec<RevealTarget>, threshold: f64, bottom_margin: f64) -> Self {
        Self {
            targets,
            revealed: HashSet::new(),
            threshold,
            bottom_margin,
        }
    }

    /// Reveal every target now sufficiently in view. Returns how many were
    /// newly revealed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidGeometry`] if the scroll position or the
    /// viewport height is not finite; nothing is revealed.
    pub fn evaluate(
        &mut self,
        scroll_y: f64,
        viewport_height: f64,
        page: &mut dyn Page,
    ) -> Result<usize> {
        if !scroll_y.is_finite() || !viewport_height.is_finite() {
            return Err(AppError::InvalidGeometry("viewport"));
        }
        let root_bottom = (viewport_height - self.bottom_margin).max(0.0);
        let mut newly = 0;

        for target in &self.targets {
            if self.revealed.contains(&target.key) {
                continue;
            }
            let Some(ratio) = intersection_ratio(target, scroll_y, root_bottom) else {
                continue;
            };
            if ratio >= self.threshold {
                self.revealed.insert(target.key.clone());
                page.apply(DomPatch::Reveal {
                    target: target.key.clone(),
                });
                newly += 1;
            }
        }

        if newly > 0 {
            tracing::trace!(newly, scroll_y, "Revealed elements");
        }
        Ok(newly)
    }

    #[must_use]
    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }

    /// Whether every target has been revealed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.revealed.len() == self.targets.len()
    }
}

/// Visible share of `target`'s height inside `[0, root_bottom]`, or `None`
/// when it does not intersect at all.
fn intersection_ratio(target: &RevealTarget, scroll_y: f64, root_bottom: f64) -> Option<f64> {
    let top = target.top - scroll_y;
    let bottom = top + target.height.max(0.0);

    if bottom < 0.0 || top > root_bottom {
        return None;
    }
    if target.height <= 0.0 {
        return Some(1.0);
    }

    let visible = bottom.min(root_bottom) - top.max(0.0);
    Some((visible / target.height).clamp(0.0, 1.0))
}
