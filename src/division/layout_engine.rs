//! Long division layout engine
//!
//! Turns the visible prefix of a trace into a `LayoutResult`. The layout is
//! recomputed from scratch for every cursor position; nothing is cached
//! between calls, so calling it twice with the same inputs gives the same
//! answer.

use crate::diagnostics::{DiagnosticMark, DiagnosticSeverity, Diagnostics};
use crate::error::{DiagramError, Result};
use crate::models::{
    DividendDivisor, DivisionStep, LayoutResult, QuotientDigit, RemainderRow, StepKind, WorkRow,
};
use crate::stepper::StepCursor;
use super::columns::{check_column, row_value};
use super::stages::StagePlan;
use super::validate::{
    KIND_INCOMPLETE, KIND_MISSING_PAYLOAD, KIND_QUOTIENT_COLUMN, KIND_QUOTIENT_DIGIT,
};

/// Layout engine for long division diagrams
#[derive(Debug, Default, Clone, Copy)]
pub struct LongDivisionLayoutEngine;

impl LongDivisionLayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the layout for the stage the cursor points at
    ///
    /// # Errors
    /// `ColumnOutOfRange` when any visible digit would land outside the
    /// dividend's columns.
    pub fn compute_layout(
        &self,
        problem: &DividendDivisor,
        trace: &[DivisionStep],
        plan: &StagePlan,
        cursor: &StepCursor,
    ) -> Result<LayoutResult> {
        let stage_index = cursor.index().min(plan.stage_count().saturating_sub(1));
        let dividend_len = problem.dividend_len();
        let mut diagnostics = Diagnostics::new();

        let visible: Vec<&DivisionStep> = plan.visible_steps(trace, stage_index).collect();

        let quotient_digits = extract_quotient_digits(&visible, dividend_len, &mut diagnostics)?;
        let work_rows = group_work_rows(&visible, dividend_len, &mut diagnostics)?;
        let remainder = extract_remainder(&visible, dividend_len)?;

        let at_final = stage_index >= plan.final_stage_index();
        if at_final && !plan.is_terminated() {
            log::warn!(
                "incomplete trace for {} ÷ {}: final stage reached without a closing step",
                problem.dividend,
                problem.divisor
            );
            diagnostics.add(DiagnosticMark::new(
                DiagnosticSeverity::Warning,
                KIND_INCOMPLETE,
                DiagramError::IncompleteTrace.to_string(),
            ));
        }

        log::debug!(
            "layout {} ÷ {} at stage {}/{}: {} quotient digits, {} rows",
            problem.dividend,
            problem.divisor,
            stage_index,
            plan.stage_count(),
            quotient_digits.len(),
            work_rows.len()
        );

        Ok(LayoutResult {
            quotient_digits,
            work_rows,
            remainder,
            is_complete: at_final && plan.is_terminated() && !diagnostics.has_errors(),
            stage_index,
            stage_count: plan.stage_count(),
            diagnostics,
        })
    }
}

/// Stateless entry point: build the stage plan and lay out stage `stage_index`
pub fn compute_layout(
    problem: &DividendDivisor,
    trace: &[DivisionStep],
    stage_index: usize,
) -> Result<LayoutResult> {
    let plan = StagePlan::from_trace(trace);
    let cursor = StepCursor::new(plan.stage_count(), stage_index)?;
    LongDivisionLayoutEngine::new().compute_layout(problem, trace, &plan, &cursor)
}

/// One digit per divide step, ascending by column
fn extract_quotient_digits(
    visible: &[&DivisionStep],
    dividend_len: usize,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<QuotientDigit>> {
    let mut digits: Vec<QuotientDigit> = Vec::new();

    for step in visible.iter().filter(|s| s.kind == StepKind::Divide) {
        let Some(digit) = step.quotient_digit else {
            diagnostics.add(missing_payload(step, "quotient_digit"));
            continue;
        };
        check_column(step.column_position, dividend_len)?;

        if digit > 9 {
            diagnostics.add(
                DiagnosticMark::new(
                    DiagnosticSeverity::Error,
                    KIND_QUOTIENT_DIGIT,
                    format!("quotient digit {} is not a single digit", digit),
                )
                .at_step(step.step_index)
                .at_column(step.column_position),
            );
            continue;
        }

        if let Some(last) = digits.last() {
            if step.column_position <= last.column_position {
                diagnostics.add(
                    DiagnosticMark::new(
                        DiagnosticSeverity::Error,
                        KIND_QUOTIENT_COLUMN,
                        format!("second quotient digit for column {}", step.column_position),
                    )
                    .at_step(step.step_index)
                    .at_column(step.column_position),
                );
                continue;
            }
        }

        digits.push(QuotientDigit {
            digit,
            column_position: step.column_position,
        });
    }

    Ok(digits)
}

fn missing_payload(step: &DivisionStep, field: &str) -> DiagnosticMark {
    DiagnosticMark::new(
        DiagnosticSeverity::Error,
        KIND_MISSING_PAYLOAD,
        format!("{} step has no {}", step.kind.as_str(), field),
    )
    .at_step(step.step_index)
    .at_column(step.column_position)
}

/// Single pass: a new row opens whenever the column changes between
/// consecutive visible steps. Rows with nothing attached are dropped.
fn group_work_rows(
    visible: &[&DivisionStep],
    dividend_len: usize,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<WorkRow>> {
    let mut rows = Vec::new();
    let mut current: Option<WorkRow> = None;

    for step in visible {
        let col = step.column_position;
        if current.as_ref().map(|row| row.column_position) != Some(col) {
            if let Some(row) = current.take() {
                if !row.is_empty() {
                    rows.push(row);
                }
            }
            current = Some(WorkRow::new(col));
        }

        let Some(row) = current.as_mut() else {
            continue;
        };
        match step.kind {
            StepKind::BringDown => match step.working_number {
                Some(v) => {
                    row.working_number = Some(row_value(v, col, dividend_len)?);
                    row.show_working_number = true;
                }
                None => diagnostics.add(missing_payload(step, "working_number")),
            },
            StepKind::Multiply => match step.product {
                Some(v) => {
                    row.product = Some(row_value(v, col, dividend_len)?);
                    row.show_product = true;
                }
                None => diagnostics.add(missing_payload(step, "product")),
            },
            StepKind::Subtract => match step.difference {
                Some(v) => {
                    row.difference = Some(row_value(v, col, dividend_len)?);
                    row.show_difference = true;
                }
                None => diagnostics.add(missing_payload(step, "difference")),
            },
            _ => {}
        }
    }

    if let Some(row) = current {
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// The "R n" row, suppressed when the remainder is zero
fn extract_remainder(visible: &[&DivisionStep], dividend_len: usize) -> Result<Option<RemainderRow>> {
    let step = visible
        .iter()
        .rev()
        .find(|s| s.kind == StepKind::Remainder);

    match step.and_then(|s| s.remainder.map(|v| (s.column_position, v))) {
        Some((col, value)) if value > 0 => Ok(Some(RemainderRow {
            column_position: col,
            value: row_value(value, col, dividend_len)?,
        })),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::division::generator::generate_trace;
    use crate::models::PlacedDigit;

    fn problem(dividend: u32, divisor: u32) -> DividendDivisor {
        DividendDivisor::new(dividend, divisor).unwrap()
    }

    fn final_layout(p: &DividendDivisor) -> LayoutResult {
        let trace = generate_trace(p);
        compute_layout(p, &trace, usize::MAX).unwrap()
    }

    #[test]
    fn test_156_by_7_final_layout() {
        let layout = final_layout(&problem(156, 7));

        assert_eq!(
            layout.quotient_digits,
            vec![
                QuotientDigit { digit: 2, column_position: 1 },
                QuotientDigit { digit: 2, column_position: 2 },
            ]
        );
        assert_eq!(layout.work_rows.len(), 2);

        let first = &layout.work_rows[0];
        assert_eq!(first.column_position, 1);
        assert_eq!(first.product.as_ref().unwrap().value, 14);
        assert_eq!(first.difference.as_ref().unwrap().value, 1);
        assert!(!first.show_working_number);

        let second = &layout.work_rows[1];
        assert_eq!(second.column_position, 2);
        assert_eq!(second.working_number.as_ref().unwrap().value, 16);
        assert_eq!(
            second.working_number.as_ref().unwrap().digits,
            vec![
                PlacedDigit { digit: 1, column: 1 },
                PlacedDigit { digit: 6, column: 2 },
            ]
        );
        assert_eq!(second.difference.as_ref().unwrap().value, 2);

        assert_eq!(layout.remainder.as_ref().unwrap().value.value, 2);
        assert!(layout.is_complete);
        assert!(layout.diagnostics.is_empty());
    }

    #[test]
    fn test_first_stage_shows_nothing() {
        let p = problem(156, 7);
        let layout = compute_layout(&p, &generate_trace(&p), 0).unwrap();
        assert!(layout.quotient_digits.is_empty());
        assert!(layout.work_rows.is_empty());
        assert!(!layout.is_complete);
    }

    #[test]
    fn test_dividend_smaller_than_divisor() {
        let p = problem(12, 48);
        let trace = generate_trace(&p);
        let plan = StagePlan::from_trace(&trace);

        // Stage right before the remainder stage
        let before = plan.final_stage_index() - 2;
        let layout = compute_layout(&p, &trace, before).unwrap();
        assert_eq!(layout.quotient_digits, vec![QuotientDigit { digit: 0, column_position: 0 }]);
        assert!(layout.work_rows.is_empty());

        let done = final_layout(&p);
        assert!(done.work_rows.is_empty());
        assert_eq!(done.remainder.unwrap().value.value, 12);
    }

    #[test]
    fn test_zero_remainder_has_no_remainder_row() {
        let layout = final_layout(&problem(1005, 5));
        assert!(layout.remainder.is_none());
        assert!(layout.is_complete);
        assert_eq!(layout.quotient_value(), Some(201));
    }

    #[test]
    fn test_remainder_step_with_zero_value_suppressed() {
        let p = problem(14, 7);
        let trace = vec![
            DivisionStep::new(0, StepKind::Setup, 0),
            DivisionStep::divide(1, 1, 2),
            DivisionStep::multiply(2, 1, 14),
            DivisionStep::subtract(3, 1, 0),
            DivisionStep::remainder(4, 1, 0),
        ];
        let layout = compute_layout(&p, &trace, usize::MAX).unwrap();
        assert!(layout.remainder.is_none());
        assert!(layout.is_complete);
    }

    #[test]
    fn test_negative_column_is_error() {
        let p = problem(156, 7);
        let trace = vec![
            DivisionStep::new(0, StepKind::Setup, 0),
            DivisionStep::divide(1, 1, 2),
            DivisionStep::multiply(2, -1, 14),
        ];
        let err = compute_layout(&p, &trace, 1).unwrap_err();
        assert!(matches!(err, DiagramError::ColumnOutOfRange { anchor: -1, .. }));
    }

    #[test]
    fn test_negative_quotient_column_is_error() {
        let p = problem(156, 7);
        let trace = vec![DivisionStep::divide(0, -2, 2)];
        assert!(matches!(
            compute_layout(&p, &trace, 1),
            Err(DiagramError::ColumnOutOfRange { .. })
        ));
    }

    #[test]
    fn test_hidden_defect_does_not_fail_early_stages() {
        let p = problem(156, 7);
        let trace = vec![
            DivisionStep::new(0, StepKind::Setup, 0),
            DivisionStep::divide(1, 1, 2),
            DivisionStep::multiply(2, 1, 14),
            DivisionStep::divide(3, 2, 2),
            DivisionStep::multiply(4, 5, 14),
        ];
        assert!(compute_layout(&p, &trace, 1).is_ok());
        assert!(compute_layout(&p, &trace, 2).is_err());
    }

    #[test]
    fn test_non_adjacent_columns_stay_separate() {
        let p = problem(156, 7);
        let trace = vec![
            DivisionStep::multiply(0, 1, 14),
            DivisionStep::subtract(1, 2, 2),
            DivisionStep::subtract(2, 1, 1),
        ];
        let layout = compute_layout(&p, &trace, 0).unwrap();
        let cols: Vec<i32> = layout.work_rows.iter().map(|r| r.column_position).collect();
        assert_eq!(cols, vec![1, 2, 1]);
    }

    #[test]
    fn test_incomplete_trace_flagged() {
        let p = problem(156, 7);
        let trace = vec![
            DivisionStep::new(0, StepKind::Setup, 0),
            DivisionStep::divide(1, 1, 2),
            DivisionStep::multiply(2, 1, 14),
        ];
        let layout = compute_layout(&p, &trace, 1).unwrap();
        assert!(!layout.is_complete);
        assert!(layout.diagnostics.has_kind(KIND_INCOMPLETE));

        // Not flagged before the final stage
        let early = compute_layout(&p, &trace, 0).unwrap();
        assert!(!early.diagnostics.has_kind(KIND_INCOMPLETE));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let p = problem(98765, 43);
        let trace = generate_trace(&p);
        for stage in 0..StagePlan::from_trace(&trace).stage_count() {
            let a = compute_layout(&p, &trace, stage).unwrap();
            let b = compute_layout(&p, &trace, stage).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_duplicate_quotient_column_skipped() {
        let p = problem(15, 5);
        let trace = vec![
            DivisionStep::divide(0, 1, 3),
            DivisionStep::divide(1, 1, 3),
            DivisionStep::new(2, StepKind::Complete, 1),
        ];
        let layout = compute_layout(&p, &trace, usize::MAX).unwrap();
        assert_eq!(layout.quotient_digits.len(), 1);
        assert!(layout.diagnostics.has_kind(KIND_QUOTIENT_COLUMN));
        assert!(!layout.is_complete);
    }

    #[test]
    fn test_malformed_divide_steps_flagged() {
        let p = problem(156, 7);
        let trace = vec![
            DivisionStep::new(0, StepKind::Setup, 0),
            DivisionStep::divide(1, 1, 12),
            DivisionStep::new(2, StepKind::Divide, 2),
            DivisionStep::new(3, StepKind::Complete, 2),
        ];
        let layout = compute_layout(&p, &trace, usize::MAX).unwrap();
        assert!(layout.quotient_digits.is_empty());
        assert!(layout.diagnostics.has_kind(KIND_QUOTIENT_DIGIT));
        assert!(layout.diagnostics.has_kind(KIND_MISSING_PAYLOAD));
        assert!(!layout.is_complete);
    }

    #[test]
    fn test_multiply_without_product_flagged() {
        let p = problem(156, 7);
        let trace = vec![
            DivisionStep::new(0, StepKind::Setup, 0),
            DivisionStep::divide(1, 1, 2),
            DivisionStep::new(2, StepKind::Multiply, 1),
            DivisionStep::subtract(3, 1, 1),
            DivisionStep::new(4, StepKind::Complete, 1),
        ];
        let layout = compute_layout(&p, &trace, usize::MAX).unwrap();
        let row = &layout.work_rows[0];
        assert!(!row.show_product);
        assert!(row.show_difference);

        let mark = layout
            .diagnostics
            .marks
            .iter()
            .find(|m| m.kind == KIND_MISSING_PAYLOAD)
            .unwrap();
        assert_eq!(mark.step_index, Some(2));
        assert!(!layout.is_complete);
    }
}
