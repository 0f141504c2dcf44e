//! Renderers module
//!
//! Turns renderer-agnostic layouts into pixel display lists for the JS
//! front end. Nothing here decides *what* is visible; that is settled by
//! the layout engine before a display list is built.

pub mod display_list;
pub mod layout;

pub use display_list::{DisplayList, RenderArrow, RenderGlyph, RenderRule};
pub use layout::{build_display_list, DisplayConfig};
