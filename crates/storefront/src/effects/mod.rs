//! Scroll and timer driven decoration.
//!
//! - [`reveal`] - One-shot fade-in of cards as they enter the viewport
//! - [`scroll`] - Hero parallax and active navigation highlighting
//! - [`steps`] - The rotating step highlighter

pub mod reveal;
pub mod scroll;
pub mod steps;

pub use reveal::RevealTracker;
pub use scroll::{NavHighlighter, current_section, parallax_offset};
pub use steps::StepCycler;
