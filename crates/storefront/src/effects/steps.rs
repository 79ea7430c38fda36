//! Rotating step highlighter.
//!
//! The automatic cycle keeps its own position. Clicking a step highlights it
//! immediately but does not move, pause or restart the cycle, so the next tick
//! continues from where the cycle was.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCycler {
    len: usize,
    position: usize,
    active: Option<usize>,
}

impl StepCycler {
    /// A cycler over `len` steps, or `None` when there are no steps.
    #[must_use]
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            position: 0,
            active: None,
        })
    }

    /// Advance the cycle, wrapping after the last step. Returns the step to
    /// highlight.
    pub const fn tick(&mut self) -> usize {
        self.position = (self.position + 1) % self.len;
        self.active = Some(self.position);
        self.position
    }

    /// Highlight `index` without touching the cycle. Returns `false` for an
    /// index past the last step.
    pub const fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// The highlighted step, if any has been highlighted yet.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn step_count(&self) -> usize {
        self.len
    }
}
