//! Renderer-agnostic long division layout
//!
//! This is what the layout engine hands to the rendering layer. Every value
//! carries the dividend columns its digits occupy; the renderer never does
//! column arithmetic itself.

use serde::{Deserialize, Serialize};
use crate::diagnostics::Diagnostics;

/// A single digit pinned to a dividend column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedDigit {
    pub digit: u8,
    pub column: usize,
}

/// One digit of the quotient, written above the dividend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotientDigit {
    pub digit: u8,
    pub column_position: i32,
}

/// A number in a work row together with its placed digits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowValue {
    pub value: u32,
    pub digits: Vec<PlacedDigit>,
}

impl RowValue {
    /// Leftmost occupied column
    pub fn first_column(&self) -> Option<usize> {
        self.digits.first().map(|d| d.column)
    }

    /// Rightmost occupied column (the anchor)
    pub fn last_column(&self) -> Option<usize> {
        self.digits.last().map(|d| d.column)
    }
}

/// One subtraction cycle's worth of work below the dividend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRow {
    pub column_position: i32,

    /// Number brought down to start this row
    #[serde(default)]
    pub working_number: Option<RowValue>,

    /// Quotient digit × divisor, written under the working number
    #[serde(default)]
    pub product: Option<RowValue>,

    /// Result of the subtraction, written under the rule
    #[serde(default)]
    pub difference: Option<RowValue>,

    pub show_working_number: bool,
    pub show_product: bool,
    pub show_difference: bool,
}

impl WorkRow {
    pub fn new(column_position: i32) -> Self {
        Self {
            column_position,
            working_number: None,
            product: None,
            difference: None,
            show_working_number: false,
            show_product: false,
            show_difference: false,
        }
    }

    /// True when no value has been attached yet
    pub fn is_empty(&self) -> bool {
        !(self.show_working_number || self.show_product || self.show_difference)
    }
}

/// The trailing "R n" row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainderRow {
    pub column_position: i32,
    pub value: RowValue,
}

/// Complete layout for one cursor position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub quotient_digits: Vec<QuotientDigit>,
    pub work_rows: Vec<WorkRow>,
    #[serde(default)]
    pub remainder: Option<RemainderRow>,
    pub is_complete: bool,
    pub stage_index: usize,
    pub stage_count: usize,
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl LayoutResult {
    /// Quotient digits as a plain number (None before any digit is visible)
    pub fn quotient_value(&self) -> Option<u64> {
        if self.quotient_digits.is_empty() {
            return None;
        }
        Some(
            self.quotient_digits
                .iter()
                .fold(0u64, |acc, q| acc * 10 + q.digit as u64),
        )
    }
}
