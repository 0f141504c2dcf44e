//! Display List for Diagram Rendering
//!
//! This module defines the output structure returned to JavaScript. The
//! DisplayList contains all pre-calculated positions and classes needed to
//! draw a long division diagram without any layout calculations on the JS
//! side.

use serde::{Serialize, Deserialize};

/// Top-level display list for one diagram at one stage
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayList {
    /// Digits and labels with their positions
    pub glyphs: Vec<RenderGlyph>,

    /// Horizontal rules (division bracket top, subtraction lines)
    pub rules: Vec<RenderRule>,

    /// Bring-down arrows from a dividend digit to its work row
    #[serde(default)]
    pub arrows: Vec<RenderArrow>,

    /// Vertical bracket stroke left of the dividend
    pub bracket: RenderRule,

    /// Overall width in pixels
    pub width: f32,

    /// Overall height in pixels
    pub height: f32,

    pub stage_index: usize,
    pub stage_count: usize,
    pub is_complete: bool,
}

/// A single positioned glyph
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderGlyph {
    /// Text to display (usually one digit)
    pub text: String,

    /// X position (left edge)
    pub x: f32,

    /// Y position (top edge)
    pub y: f32,

    /// Dividend column the glyph is aligned to, if any
    pub column: Option<usize>,

    /// CSS classes to apply (e.g., "digit", "quotient", "product")
    pub classes: Vec<String>,
}

/// A straight stroke from (x1, y1) to (x2, y2)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderRule {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub classes: Vec<String>,
}

/// Arrow showing which dividend digit was brought down
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderArrow {
    /// Dividend column of the brought-down digit
    pub column: usize,

    /// Index of the work row the arrow points into
    pub row_index: usize,

    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
}
