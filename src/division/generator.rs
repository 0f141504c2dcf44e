//! Reference trace generator
//!
//! Produces the schoolbook trace for a problem: find the first working
//! number that the divisor fits into, then repeat divide / multiply /
//! subtract / bring down until the dividend runs out.

use crate::error::{DiagramError, Result};
use crate::models::{DividendDivisor, DivisionStep, StepKind};
use super::columns::digits_of;

/// Build the full step trace for `problem`
pub fn generate_trace(problem: &DividendDivisor) -> Vec<DivisionStep> {
    let digits = digits_of(problem.dividend);
    let last_col = (digits.len() - 1) as i32;
    let mut trace = TraceBuilder::default();

    trace.push(DivisionStep::new(0, StepKind::Setup, 0));

    if problem.dividend < problem.divisor {
        trace.push(DivisionStep::new(0, StepKind::Check, 0));
        trace.push(DivisionStep::divide(0, 0, 0));
    } else {
        // Smallest leading prefix the divisor fits into
        let mut col = 0usize;
        let mut working = digits[0] as u32;
        while working < problem.divisor {
            col += 1;
            working = working * 10 + digits[col] as u32;
        }
        trace.push(DivisionStep::new(0, StepKind::Check, col as i32));

        loop {
            let q = working / problem.divisor;
            let product = q * problem.divisor;
            let difference = working - product;
            let c = col as i32;

            trace.push(DivisionStep::divide(0, c, q as u8));
            trace.push(DivisionStep::multiply(0, c, product));
            trace.push(DivisionStep::subtract(0, c, difference));

            if col + 1 >= digits.len() {
                break;
            }
            col += 1;
            working = difference * 10 + digits[col] as u32;
            trace.push(DivisionStep::bring_down(0, col as i32, working));
        }
    }

    if problem.remainder > 0 {
        trace.push(DivisionStep::remainder(0, last_col, problem.remainder));
    }
    trace.push(DivisionStep::new(0, StepKind::Complete, last_col));

    log::debug!(
        "generated {} steps for {} ÷ {}",
        trace.steps.len(),
        problem.dividend,
        problem.divisor
    );
    trace.steps
}

/// Numbers steps as they are pushed
#[derive(Default)]
struct TraceBuilder {
    steps: Vec<DivisionStep>,
}

impl TraceBuilder {
    fn push(&mut self, mut step: DivisionStep) {
        step.step_index = self.steps.len() as u32;
        self.steps.push(step);
    }
}

/// Draw a practice problem with the given digit counts
///
/// Divisors are at least 2; single-digit dividends start at 1.
pub fn random_problem(dividend_digits: u32, divisor_digits: u32) -> Result<DividendDivisor> {
    if !(1..=9).contains(&dividend_digits) {
        return Err(DiagramError::Generation(format!(
            "dividend digits must be 1-9, got {}",
            dividend_digits
        )));
    }
    if divisor_digits < 1 || divisor_digits > dividend_digits {
        return Err(DiagramError::Generation(format!(
            "divisor digits must be 1-{}, got {}",
            dividend_digits, divisor_digits
        )));
    }

    let (lo, hi) = digit_range(dividend_digits);
    let dividend = random_in(lo.max(1), hi)?;
    let (lo, hi) = digit_range(divisor_digits);
    let divisor = random_in(lo.max(2), hi)?;

    DividendDivisor::new(dividend, divisor)
}

fn digit_range(digits: u32) -> (u32, u32) {
    let lo = if digits == 1 { 0 } else { 10u32.pow(digits - 1) };
    (lo, 10u32.pow(digits) - 1)
}

fn random_in(lo: u32, hi: u32) -> Result<u32> {
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf).map_err(|e| DiagramError::Generation(e.to_string()))?;
    let span = (hi - lo) as u64 + 1;
    Ok(lo + (u64::from_le_bytes(buf) % span) as u32)
}
