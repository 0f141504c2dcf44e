//! Trace validation
//!
//! Checks the contract upstream generators must honor. Violations come back
//! as diagnostics rather than errors; the layout engine decides separately
//! which of them are fatal for drawing.

use crate::diagnostics::{DiagnosticMark, DiagnosticSeverity, Diagnostics};
use crate::error::DiagramError;
use crate::models::{DividendDivisor, DivisionStep, StepKind};
use super::columns::place_value;

pub const KIND_STEP_INDEX: &str = "step_index_order";
pub const KIND_MISSING_PAYLOAD: &str = "missing_payload";
pub const KIND_QUOTIENT_DIGIT: &str = "quotient_digit_range";
pub const KIND_QUOTIENT_COLUMN: &str = "quotient_column";
pub const KIND_CYCLE_ORDER: &str = "cycle_order";
pub const KIND_COLUMN_RANGE: &str = "column_out_of_range";
pub const KIND_INCOMPLETE: &str = "incomplete_trace";
pub const KIND_IDENTITY: &str = "dividend_identity";

/// Run every trace check
pub fn validate_trace(trace: &[DivisionStep], dividend_len: usize) -> Diagnostics {
    let mut diags = Diagnostics::new();
    diags.extend(check_step_indices(trace));
    diags.extend(check_payloads(trace));
    diags.extend(check_quotient_digits(trace));
    diags.extend(check_cycle_order(trace));
    diags.extend(check_columns(trace, dividend_len));
    if let Some(mark) = check_complete(trace) {
        diags.add(mark);
    }
    diags
}

/// Validate a trace against its problem, including the dividend identity
pub fn validate_problem_trace(problem: &DividendDivisor, trace: &[DivisionStep]) -> Diagnostics {
    let mut diags = validate_trace(trace, problem.dividend_len());
    if !problem.satisfies_identity() {
        diags.add(DiagnosticMark::new(
            DiagnosticSeverity::Error,
            KIND_IDENTITY,
            format!(
                "{} ≠ {} × {} + {}",
                problem.dividend, problem.divisor, problem.quotient, problem.remainder
            ),
        ));
    }
    diags
}

fn check_step_indices(trace: &[DivisionStep]) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();
    let mut previous: Option<u32> = None;

    for step in trace {
        let ok = match previous {
            None => step.step_index == 0,
            Some(prev) => step.step_index > prev,
        };
        if !ok {
            marks.push(
                DiagnosticMark::new(
                    DiagnosticSeverity::Error,
                    KIND_STEP_INDEX,
                    format!("step index {} breaks ascending order", step.step_index),
                )
                .at_step(step.step_index),
            );
        }
        previous = Some(step.step_index);
    }
    marks
}

fn check_payloads(trace: &[DivisionStep]) -> Vec<DiagnosticMark> {
    trace
        .iter()
        .filter(|step| !step.has_required_payload())
        .map(|step| {
            DiagnosticMark::new(
                DiagnosticSeverity::Error,
                KIND_MISSING_PAYLOAD,
                format!("{} step has no value", step.kind.as_str()),
            )
            .at_step(step.step_index)
            .at_column(step.column_position)
        })
        .collect()
}

fn check_quotient_digits(trace: &[DivisionStep]) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();
    let mut last_column: Option<i32> = None;

    for step in trace.iter().filter(|s| s.kind == StepKind::Divide) {
        if let Some(digit) = step.quotient_digit {
            if digit > 9 {
                marks.push(
                    DiagnosticMark::new(
                        DiagnosticSeverity::Error,
                        KIND_QUOTIENT_DIGIT,
                        format!("quotient digit {} is not a single digit", digit),
                    )
                    .at_step(step.step_index),
                );
            }
        }
        if let Some(prev) = last_column {
            if step.column_position <= prev {
                marks.push(
                    DiagnosticMark::new(
                        DiagnosticSeverity::Error,
                        KIND_QUOTIENT_COLUMN,
                        format!(
                            "quotient digit at column {} does not follow column {}",
                            step.column_position, prev
                        ),
                    )
                    .at_step(step.step_index)
                    .at_column(step.column_position),
                );
            }
        }
        last_column = Some(step.column_position);
    }
    marks
}

/// divide → multiply → subtract share a column; bring_down lands one column right
fn check_cycle_order(trace: &[DivisionStep]) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();
    // (cycle column, order of last cycle step seen)
    let mut cycle: Option<(i32, u8)> = None;

    for step in trace {
        let Some(order) = step.kind.cycle_order() else {
            continue;
        };

        let problem = match (step.kind, cycle) {
            (StepKind::Divide, None) => None,
            (StepKind::Divide, Some((_, last))) if last >= 2 => None,
            (StepKind::Divide, Some(_)) => Some("divide before the previous cycle subtracted"),
            (_, None) => Some("cycle step before any divide"),
            (StepKind::BringDown, Some((col, last))) => {
                if last != 2 {
                    Some("bring_down must follow subtract")
                } else if step.column_position != col + 1 {
                    Some("bring_down must land one column right of its cycle")
                } else {
                    None
                }
            }
            (_, Some((col, last))) => {
                if order != last + 1 {
                    Some("cycle steps out of order")
                } else if step.column_position != col {
                    Some("cycle step changes column")
                } else {
                    None
                }
            }
        };

        if let Some(message) = problem {
            marks.push(
                DiagnosticMark::new(DiagnosticSeverity::Error, KIND_CYCLE_ORDER, message)
                    .at_step(step.step_index)
                    .at_column(step.column_position),
            );
        }

        cycle = match step.kind {
            StepKind::Divide => Some((step.column_position, 0)),
            _ => cycle.map(|(col, _)| (col, order)),
        };
    }
    marks
}

fn check_columns(trace: &[DivisionStep], dividend_len: usize) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();

    for step in trace {
        let value = step
            .product
            .or(step.difference)
            .or(step.working_number)
            .or(step.remainder)
            .or(step.quotient_digit.map(u32::from));
        let Some(value) = value else {
            continue;
        };
        // Quotient digits are single glyphs above the anchor column
        let value = if step.kind == StepKind::Divide { 0 } else { value };

        if let Err(e) = place_value(value, step.column_position, dividend_len) {
            marks.push(
                DiagnosticMark::new(DiagnosticSeverity::Error, KIND_COLUMN_RANGE, e.to_string())
                    .at_step(step.step_index)
                    .at_column(step.column_position),
            );
        }
    }
    marks
}

/// Warn when the trace never reaches `remainder` or `complete`
pub fn check_complete(trace: &[DivisionStep]) -> Option<DiagnosticMark> {
    if trace.iter().any(|s| s.kind.is_terminal()) {
        return None;
    }
    Some(DiagnosticMark::new(
        DiagnosticSeverity::Warning,
        KIND_INCOMPLETE,
        DiagramError::IncompleteTrace.to_string(),
    ))
}
