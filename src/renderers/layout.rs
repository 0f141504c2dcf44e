//! Pixel layout for long division diagrams
//!
//! Converts a `LayoutResult` (dividend columns) into a `DisplayList` (pixels).
//! Vertical placement is derived purely from the logical row sequence:
//!
//! ```text
//! line 0            quotient
//! line 1            divisor ) dividend
//! line 2 + 3r       row r: working number (brought down)
//! line 3 + 3r       row r: product, with a rule beneath
//! line 4 + 3r       row r: difference
//! line 2 + 3n       remainder
//! ```

use serde::{Deserialize, Serialize};
use crate::division::columns::{digit_count, digits_of};
use crate::models::{DividendDivisor, LayoutResult, RowValue};
use super::display_list::*;

/// Lines per work row (working number, product, difference)
pub const LINES_PER_ROW: usize = 3;

/// Measurements supplied by the host page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width of one digit column in pixels
    pub column_width: f32,

    /// Height of one text line in pixels
    pub line_height: f32,

    /// Left margin in pixels
    pub left_margin: f32,

    /// Top margin in pixels
    pub top_margin: f32,

    /// Vertical gap kept between an arrow and the glyphs it connects
    pub arrow_gap: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            column_width: 24.0,
            line_height: 32.0,
            left_margin: 16.0,
            top_margin: 16.0,
            arrow_gap: 4.0,
        }
    }
}

impl DisplayConfig {
    /// Height of one work row block
    pub fn row_height(&self) -> f32 {
        self.line_height * LINES_PER_ROW as f32
    }
}

/// Pixel geometry for one problem
struct Grid<'a> {
    config: &'a DisplayConfig,
    /// Columns reserved for the divisor plus the bracket
    divisor_cols: usize,
}

impl<'a> Grid<'a> {
    fn new(problem: &DividendDivisor, config: &'a DisplayConfig) -> Self {
        Self {
            config,
            divisor_cols: digit_count(problem.divisor) + 1,
        }
    }

    /// Left edge of dividend column `col`
    fn column_x(&self, col: usize) -> f32 {
        self.config.left_margin + (self.divisor_cols + col) as f32 * self.config.column_width
    }

    fn column_center(&self, col: usize) -> f32 {
        self.column_x(col) + self.config.column_width / 2.0
    }

    /// Top edge of text line `line`
    fn line_y(&self, line: usize) -> f32 {
        self.config.top_margin + line as f32 * self.config.line_height
    }

    /// Top edge of work row `row`
    fn row_top(&self, row: usize) -> f32 {
        self.line_y(2) + row as f32 * self.config.row_height()
    }
}

/// Build the display list for `layout`
pub fn build_display_list(
    layout: &LayoutResult,
    problem: &DividendDivisor,
    config: &DisplayConfig,
) -> DisplayList {
    let grid = Grid::new(problem, config);
    let dividend_len = problem.dividend_len();
    let mut glyphs = Vec::new();
    let mut rules = Vec::new();
    let mut arrows = Vec::new();

    // Divisor, left of the bracket
    for (i, digit) in digits_of(problem.divisor).into_iter().enumerate() {
        glyphs.push(RenderGlyph {
            text: digit.to_string(),
            x: config.left_margin + i as f32 * config.column_width,
            y: grid.line_y(1),
            column: None,
            classes: vec!["digit".to_string(), "divisor".to_string()],
        });
    }

    let brought_down: Vec<usize> = layout
        .work_rows
        .iter()
        .filter_map(|row| row.working_number.as_ref().and_then(RowValue::last_column))
        .collect();

    for (col, digit) in digits_of(problem.dividend).into_iter().enumerate() {
        let mut classes = vec!["digit".to_string(), "dividend".to_string()];
        if brought_down.contains(&col) {
            classes.push("brought-down".to_string());
        }
        glyphs.push(RenderGlyph {
            text: digit.to_string(),
            x: grid.column_x(col),
            y: grid.line_y(1),
            column: Some(col),
            classes,
        });
    }

    for q in &layout.quotient_digits {
        // Columns were range-checked by the layout engine
        let col = q.column_position.max(0) as usize;
        glyphs.push(RenderGlyph {
            text: q.digit.to_string(),
            x: grid.column_x(col),
            y: grid.line_y(0),
            column: Some(col),
            classes: vec!["digit".to_string(), "quotient".to_string()],
        });
    }

    let bracket_top = grid.line_y(1);
    rules.push(RenderRule {
        x1: grid.column_x(0),
        y1: bracket_top,
        x2: grid.column_x(dividend_len),
        y2: bracket_top,
        classes: vec!["bracket-top".to_string()],
    });
    let bracket = RenderRule {
        x1: grid.column_x(0),
        y1: bracket_top,
        x2: grid.column_x(0),
        y2: grid.line_y(2),
        classes: vec!["bracket".to_string()],
    };

    for (row_index, row) in layout.work_rows.iter().enumerate() {
        let top = grid.row_top(row_index);

        if let Some(value) = row.working_number.as_ref().filter(|_| row.show_working_number) {
            push_value(&mut glyphs, &grid, value, top, "working-number");
            if let Some(col) = value.last_column() {
                arrows.push(RenderArrow {
                    column: col,
                    row_index,
                    from_x: grid.column_center(col),
                    from_y: grid.line_y(2) + config.arrow_gap,
                    to_x: grid.column_center(col),
                    to_y: top - config.arrow_gap,
                });
            }
        }

        if let Some(value) = row.product.as_ref().filter(|_| row.show_product) {
            let y = top + config.line_height;
            push_value(&mut glyphs, &grid, value, y, "product");
            if let (Some(first), Some(last)) = (value.first_column(), value.last_column()) {
                let rule_y = y + config.line_height;
                rules.push(RenderRule {
                    x1: grid.column_x(first),
                    y1: rule_y,
                    x2: grid.column_x(last + 1),
                    y2: rule_y,
                    classes: vec!["subtraction".to_string()],
                });
            }
        }

        if let Some(value) = row.difference.as_ref().filter(|_| row.show_difference) {
            let y = top + 2.0 * config.line_height;
            push_value(&mut glyphs, &grid, value, y, "difference");
        }
    }

    let remainder_line = 2 + LINES_PER_ROW * layout.work_rows.len();
    if let Some(rem) = &layout.remainder {
        let y = grid.line_y(remainder_line);
        if let Some(first) = rem.value.first_column() {
            glyphs.push(RenderGlyph {
                text: "R".to_string(),
                x: grid.column_x(first) - config.column_width,
                y,
                column: None,
                classes: vec!["remainder-label".to_string()],
            });
        }
        push_value(&mut glyphs, &grid, &rem.value, y, "remainder");
    }

    let last_line = if layout.remainder.is_some() {
        remainder_line
    } else {
        remainder_line.saturating_sub(1).max(1)
    };

    DisplayList {
        glyphs,
        rules,
        arrows,
        bracket,
        width: grid.column_x(dividend_len) + config.left_margin,
        height: grid.line_y(last_line + 1) + config.top_margin,
        stage_index: layout.stage_index,
        stage_count: layout.stage_count,
        is_complete: layout.is_complete,
    }
}

fn push_value(glyphs: &mut Vec<RenderGlyph>, grid: &Grid, value: &RowValue, y: f32, class: &str) {
    for placed in &value.digits {
        glyphs.push(RenderGlyph {
            text: placed.digit.to_string(),
            x: grid.column_x(placed.column),
            y,
            column: Some(placed.column),
            classes: vec!["digit".to_string(), class.to_string()],
        });
    }
}
