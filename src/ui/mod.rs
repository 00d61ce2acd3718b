//! Terminal UI components.
//!
//! - [`viewport`]: scroll position and the visible line window
//! - [`shaping`]: [`TerminalShaper`], the cell-grid [`Shaper`](crate::layout::Shaper)
//! - [`style`]: theme colors as terminal styles

pub mod shaping;
pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::{gutter_width, render};
pub use shaping::{ShapedLine, TerminalShaper};
pub use status::status_text;

#[cfg(test)]
mod tests;
