//! Diagram instance state
//!
//! A `DivisionDiagram` owns one problem, its immutable trace and the stage
//! list walking it. The cursor is the only thing that ever changes; the
//! layout is derived on demand.

use serde::Serialize;
use crate::diagnostics::Diagnostics;
use crate::division::{generate_trace, validate_problem_trace, LongDivisionLayoutEngine, StagePlan};
use crate::error::Result;
use crate::models::{DividendDivisor, DivisionStep, LayoutResult};
use crate::renderers::{build_display_list, DisplayConfig, DisplayList};
use crate::stepper::StageList;

/// One long division diagram on the page
#[derive(Serialize, Clone, Debug)]
pub struct DivisionDiagram {
    problem: DividendDivisor,
    trace: Vec<DivisionStep>,
    plan: StagePlan,
    stages: StageList,
}

impl DivisionDiagram {
    /// Diagram with the reference trace for `problem`
    pub fn new(problem: DividendDivisor) -> Result<Self> {
        let trace = generate_trace(&problem);
        Self::from_trace(problem, trace)
    }

    /// Diagram over a trace produced elsewhere
    pub fn from_trace(problem: DividendDivisor, trace: Vec<DivisionStep>) -> Result<Self> {
        let plan = StagePlan::from_trace(&trace);
        let stages = plan.to_stage_list()?;

        let diags = validate_problem_trace(&problem, &trace);
        if !diags.is_empty() {
            log::warn!(
                "trace for {} ÷ {} has {} diagnostic(s)",
                problem.dividend,
                problem.divisor,
                diags.len()
            );
        }

        Ok(Self {
            problem,
            trace,
            plan,
            stages,
        })
    }

    /// Diagram from JSON problem (`{"dividend", "divisor"}`) and trace array
    pub fn from_json(problem_json: &str, trace_json: &str) -> Result<Self> {
        let problem: DividendDivisor = serde_json::from_str(problem_json)?;
        let trace: Vec<DivisionStep> = serde_json::from_str(trace_json)?;
        Self::from_trace(problem, trace)
    }

    pub fn problem(&self) -> &DividendDivisor {
        &self.problem
    }

    pub fn trace(&self) -> &[DivisionStep] {
        &self.trace
    }

    pub fn stages(&self) -> &StageList {
        &self.stages
    }

    pub fn stage_index(&self) -> usize {
        self.stages.current_index()
    }

    pub fn advance(&mut self) -> usize {
        self.stages.advance()
    }

    pub fn retreat(&mut self) -> usize {
        self.stages.retreat()
    }

    pub fn seek(&mut self, index: usize) -> usize {
        self.stages.seek(index)
    }

    /// Layout for the current stage
    pub fn layout(&self) -> Result<LayoutResult> {
        LongDivisionLayoutEngine::new().compute_layout(
            &self.problem,
            &self.trace,
            &self.plan,
            self.stages.cursor(),
        )
    }

    /// Pixel-positioned display list for the current stage
    pub fn display_list(&self, config: &DisplayConfig) -> Result<DisplayList> {
        let layout = self.layout()?;
        Ok(build_display_list(&layout, &self.problem, config))
    }

    /// Contract check of the trace against the problem
    pub fn validate(&self) -> Diagnostics {
        validate_problem_trace(&self.problem, &self.trace)
    }
}
