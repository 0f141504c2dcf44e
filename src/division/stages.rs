//! Stage mapping for long division traces
//!
//! Steps before the first divide belong to `setup`. Every divide opens a new
//! stage (`divide_1`, `divide_2`, ...) that also owns the multiply, subtract
//! and bring-down steps following it. `remainder` and `complete` steps get
//! their own stages.

use serde::Serialize;
use crate::error::Result;
use crate::models::{DivisionStep, StepKind};
use crate::stepper::StageList;

pub const SETUP_STAGE: &str = "setup";
pub const REMAINDER_STAGE: &str = "remainder";
pub const COMPLETE_STAGE: &str = "complete";

/// Stage id for the `n`-th divide (1-based)
pub fn divide_stage_id(n: usize) -> String {
    format!("divide_{}", n)
}

/// Which stage each trace step belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagePlan {
    ids: Vec<String>,
    /// Parallel to the trace: stage index of each step
    step_stages: Vec<usize>,
    complete_stage: Option<usize>,
    terminated: bool,
}

impl StagePlan {
    /// Build the plan in one pass over the trace
    pub fn from_trace(trace: &[DivisionStep]) -> Self {
        let mut ids = vec![SETUP_STAGE.to_string()];
        let mut step_stages = Vec::with_capacity(trace.len());
        let mut current = 0;
        let mut divides = 0;
        let mut complete_stage = None;
        let mut terminated = false;

        for step in trace {
            match step.kind {
                StepKind::Divide => {
                    divides += 1;
                    ids.push(divide_stage_id(divides));
                    current = ids.len() - 1;
                }
                StepKind::Remainder => {
                    current = open_stage(&mut ids, REMAINDER_STAGE);
                    terminated = true;
                }
                StepKind::Complete => {
                    current = open_stage(&mut ids, COMPLETE_STAGE);
                    complete_stage = Some(current);
                    terminated = true;
                }
                _ => {}
            }
            step_stages.push(current);
        }

        Self {
            ids,
            step_stages,
            complete_stage,
            terminated,
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn stage_count(&self) -> usize {
        self.ids.len()
    }

    /// Stage index of the step at trace position `pos`
    pub fn stage_of(&self, pos: usize) -> Option<usize> {
        self.step_stages.get(pos).copied()
    }

    /// The stage at which the diagram counts as finished
    pub fn final_stage_index(&self) -> usize {
        self.complete_stage.unwrap_or(self.ids.len() - 1)
    }

    /// True when the trace contains a `remainder` or `complete` step
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Steps whose stage is at or before `stage_index`, in trace order
    pub fn visible_steps<'a>(
        &'a self,
        trace: &'a [DivisionStep],
        stage_index: usize,
    ) -> impl Iterator<Item = &'a DivisionStep> + 'a {
        trace
            .iter()
            .zip(self.step_stages.iter())
            .filter(move |(_, stage)| **stage <= stage_index)
            .map(|(step, _)| step)
    }

    /// Stage list with the cursor on the first stage
    pub fn to_stage_list(&self) -> Result<StageList> {
        StageList::new(self.ids.clone(), 0)
    }
}

fn open_stage(ids: &mut Vec<String>, id: &str) -> usize {
    match ids.iter().position(|s| s == id) {
        Some(idx) => idx,
        None => {
            ids.push(id.to_string());
            ids.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DividendDivisor;
    use crate::division::generator::generate_trace;

    #[test]
    fn test_stage_ids_for_two_cycles() {
        let trace = generate_trace(&DividendDivisor::new(156, 7).unwrap());
        let plan = StagePlan::from_trace(&trace);
        assert_eq!(
            plan.ids(),
            &["setup", "divide_1", "divide_2", "remainder", "complete"]
                .map(String::from)
        );
        assert_eq!(plan.final_stage_index(), 4);
        assert!(plan.is_terminated());
    }

    #[test]
    fn test_cycle_steps_attach_to_divide_stage() {
        let trace = vec![
            DivisionStep::new(0, StepKind::Setup, 0),
            DivisionStep::divide(1, 0, 3),
            DivisionStep::multiply(2, 0, 6),
            DivisionStep::subtract(3, 0, 0),
            DivisionStep::bring_down(4, 1, 4),
            DivisionStep::divide(5, 1, 2),
        ];
        let plan = StagePlan::from_trace(&trace);
        let stages: Vec<_> = (0..trace.len()).map(|i| plan.stage_of(i).unwrap()).collect();
        assert_eq!(stages, vec![0, 1, 1, 1, 1, 2]);
        assert!(!plan.is_terminated());
        assert_eq!(plan.final_stage_index(), 2);
    }

    #[test]
    fn test_empty_trace_has_setup_stage() {
        let plan = StagePlan::from_trace(&[]);
        assert_eq!(plan.stage_count(), 1);
        assert_eq!(plan.visible_steps(&[], 0).count(), 0);
    }

    #[test]
    fn test_visible_steps_are_prefix() {
        let trace = generate_trace(&DividendDivisor::new(156, 7).unwrap());
        let plan = StagePlan::from_trace(&trace);
        let at_one: Vec<_> = plan.visible_steps(&trace, 1).collect();
        assert!(at_one.iter().all(|s| s.kind != StepKind::Remainder));
        assert_eq!(at_one.last().unwrap().kind, StepKind::BringDown);
    }
}
