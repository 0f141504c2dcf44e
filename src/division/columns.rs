//! Column arithmetic
//!
//! A value anchored at column `p` puts its last digit under dividend column
//! `p` and grows leftward: `d` digits occupy `[p - d + 1, p]`.

use crate::error::{DiagramError, Result};
use crate::models::{PlacedDigit, RowValue};

/// Number of decimal digits (0 has one digit)
pub fn digit_count(value: u32) -> usize {
    let mut n = value;
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Decimal digits, most significant first
pub fn digits_of(value: u32) -> Vec<u8> {
    let mut digits = Vec::with_capacity(digit_count(value));
    let mut n = value;
    loop {
        digits.push((n % 10) as u8);
        n /= 10;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// The `k`-th digit counting from the right (k = 0 is the units digit)
pub fn digit_from_right(value: u32, k: usize) -> u8 {
    let mut n = value;
    for _ in 0..k {
        n /= 10;
    }
    (n % 10) as u8
}

/// Leftmost column a value anchored at `anchor` would occupy
pub fn first_column(value: u32, anchor: i32) -> i64 {
    anchor as i64 - digit_count(value) as i64 + 1
}

/// Place `value` so its last digit sits at `anchor`
///
/// Fails with `ColumnOutOfRange` on the first column that falls outside
/// `[0, dividend_len - 1]`; nothing is clamped.
pub fn place_value(value: u32, anchor: i32, dividend_len: usize) -> Result<Vec<PlacedDigit>> {
    let start = first_column(value, anchor);
    let mut placed = Vec::with_capacity(digit_count(value));

    for (offset, digit) in digits_of(value).into_iter().enumerate() {
        let column = start + offset as i64;
        if column < 0 || column >= dividend_len as i64 {
            return Err(DiagramError::ColumnOutOfRange {
                column,
                anchor,
                value,
                dividend_len,
            });
        }
        placed.push(PlacedDigit {
            digit,
            column: column as usize,
        });
    }

    Ok(placed)
}

/// `place_value` wrapped into a `RowValue`
pub fn row_value(value: u32, anchor: i32, dividend_len: usize) -> Result<RowValue> {
    Ok(RowValue {
        value,
        digits: place_value(value, anchor, dividend_len)?,
    })
}

/// Check a bare column (quotient digits, arrows) against the dividend width
pub fn check_column(column: i32, dividend_len: usize) -> Result<usize> {
    if column < 0 || column as i64 >= dividend_len as i64 {
        return Err(DiagramError::ColumnOutOfRange {
            column: column as i64,
            anchor: column,
            value: 0,
            dividend_len,
        });
    }
    Ok(column as usize)
}
