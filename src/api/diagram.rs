//! Long division diagram API
//!
//! Diagram instances live in a WASM-owned registry and are addressed by a
//! numeric handle. JavaScript creates a diagram, moves its cursor, and pulls
//! a fresh layout or display list after every move.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;
use crate::division::{self, generate_trace, random_problem};
use crate::error::{DiagramError, Result};
use crate::models::{DividendDivisor, DivisionDiagram, DivisionStep};
use crate::renderers::DisplayConfig;
use super::helpers::{deserialize, js_error, serialize};

/// Live diagrams keyed by handle
#[derive(Default)]
struct Registry {
    next_id: u32,
    diagrams: HashMap<u32, DivisionDiagram>,
}

lazy_static! {
    static ref DIAGRAMS: Mutex<Registry> = Mutex::new(Registry::default());
}

fn lock_registry() -> MutexGuard<'static, Registry> {
    // Poisoning is recovered: diagram mutations are single index moves
    DIAGRAMS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Store a diagram and return its handle
pub fn register_diagram(diagram: DivisionDiagram) -> u32 {
    let mut registry = lock_registry();
    registry.next_id = registry.next_id.wrapping_add(1);
    let id = registry.next_id;
    registry.diagrams.insert(id, diagram);
    log::debug!("registered diagram {} ({} live)", id, registry.diagrams.len());
    id
}

/// Run `f` against the diagram with handle `id`
pub fn with_diagram<R>(id: u32, f: impl FnOnce(&mut DivisionDiagram) -> Result<R>) -> Result<R> {
    let mut registry = lock_registry();
    let diagram = registry
        .diagrams
        .get_mut(&id)
        .ok_or(DiagramError::UnknownDiagram(id))?;
    f(diagram)
}

/// Drop a diagram; returns false for unknown handles
pub fn dispose_diagram_by_id(id: u32) -> bool {
    lock_registry().diagrams.remove(&id).is_some()
}

// ============================================================================
// Diagram lifecycle
// ============================================================================

/// Create a diagram from a problem, using the built-in trace generator
#[wasm_bindgen(js_name = createDivisionDiagram)]
pub fn create_division_diagram(dividend: u32, divisor: u32) -> std::result::Result<u32, JsValue> {
    let problem = DividendDivisor::new(dividend, divisor).map_err(js_error)?;
    let diagram = DivisionDiagram::new(problem).map_err(js_error)?;
    let id = register_diagram(diagram);
    log::debug!("createDivisionDiagram({} ÷ {}) -> {}", dividend, divisor, id);
    Ok(id)
}

/// Create a diagram over a trace produced by an external generator
#[wasm_bindgen(js_name = loadDivisionDiagram)]
pub fn load_division_diagram(problem_js: JsValue, trace_js: JsValue) -> std::result::Result<u32, JsValue> {
    let problem: DividendDivisor = deserialize(problem_js, "Failed to deserialize problem")?;
    let trace: Vec<DivisionStep> = deserialize(trace_js, "Failed to deserialize trace")?;
    // Trace diagnostics are logged by `from_trace`
    let diagram = DivisionDiagram::from_trace(problem, trace).map_err(js_error)?;
    Ok(register_diagram(diagram))
}

#[wasm_bindgen(js_name = disposeDiagram)]
pub fn dispose_diagram(id: u32) -> bool {
    dispose_diagram_by_id(id)
}

// ============================================================================
// Cursor movement
// ============================================================================

/// Move to the next stage; returns the new stage index
#[wasm_bindgen(js_name = advanceDiagram)]
pub fn advance_diagram(id: u32) -> std::result::Result<usize, JsValue> {
    with_diagram(id, |d| Ok(d.advance())).map_err(js_error)
}

/// Move to the previous stage; returns the new stage index
#[wasm_bindgen(js_name = retreatDiagram)]
pub fn retreat_diagram(id: u32) -> std::result::Result<usize, JsValue> {
    with_diagram(id, |d| Ok(d.retreat())).map_err(js_error)
}

/// Jump to a stage (clamped); returns the new stage index
#[wasm_bindgen(js_name = seekDiagram)]
pub fn seek_diagram(id: u32, index: usize) -> std::result::Result<usize, JsValue> {
    with_diagram(id, |d| Ok(d.seek(index))).map_err(js_error)
}

// ============================================================================
// Queries
// ============================================================================

/// Layout for the current stage
#[wasm_bindgen(js_name = getDiagramLayout)]
pub fn get_diagram_layout(id: u32) -> std::result::Result<JsValue, JsValue> {
    let layout = with_diagram(id, |d| d.layout()).map_err(js_error)?;
    serialize(&layout, "Failed to serialize layout")
}

/// Pixel display list for the current stage (`config` may be undefined)
#[wasm_bindgen(js_name = getDiagramDisplayList)]
pub fn get_diagram_display_list(id: u32, config_js: JsValue) -> std::result::Result<JsValue, JsValue> {
    let config: DisplayConfig = if config_js.is_undefined() || config_js.is_null() {
        DisplayConfig::default()
    } else {
        deserialize(config_js, "Failed to deserialize display config")?
    };
    let list = with_diagram(id, |d| d.display_list(&config)).map_err(js_error)?;
    serialize(&list, "Failed to serialize display list")
}

/// Ordered stage ids (labels are looked up by the host)
#[wasm_bindgen(js_name = getDiagramStageIds)]
pub fn get_diagram_stage_ids(id: u32) -> std::result::Result<js_sys::Array, JsValue> {
    let ids = with_diagram(id, |d| Ok(d.stages().ids().to_vec())).map_err(js_error)?;
    Ok(ids.into_iter().map(JsValue::from).collect())
}

#[wasm_bindgen(js_name = isDiagramStageVisible)]
pub fn is_diagram_stage_visible(id: u32, stage_id: &str) -> std::result::Result<bool, JsValue> {
    with_diagram(id, |d| Ok(d.stages().is_visible(stage_id))).map_err(js_error)
}

#[wasm_bindgen(js_name = isDiagramStageCurrent)]
pub fn is_diagram_stage_current(id: u32, stage_id: &str) -> std::result::Result<bool, JsValue> {
    with_diagram(id, |d| Ok(d.stages().is_current(stage_id))).map_err(js_error)
}

/// Trace contract diagnostics for a diagram
#[wasm_bindgen(js_name = validateDiagram)]
pub fn validate_diagram(id: u32) -> std::result::Result<JsValue, JsValue> {
    let diags = with_diagram(id, |d| Ok(d.validate())).map_err(js_error)?;
    serialize(&diags, "Failed to serialize diagnostics")
}

// ============================================================================
// Stateless helpers
// ============================================================================

/// Layout for an arbitrary trace at `stage_index`, without registering a diagram
#[wasm_bindgen(js_name = computeDivisionLayout)]
pub fn compute_division_layout(
    problem_js: JsValue,
    trace_js: JsValue,
    stage_index: usize,
) -> std::result::Result<JsValue, JsValue> {
    let problem: DividendDivisor = deserialize(problem_js, "Failed to deserialize problem")?;
    let trace: Vec<DivisionStep> = deserialize(trace_js, "Failed to deserialize trace")?;
    let layout = division::compute_layout(&problem, &trace, stage_index).map_err(js_error)?;
    serialize(&layout, "Failed to serialize layout")
}

/// Reference trace for a problem
#[wasm_bindgen(js_name = generateDivisionTrace)]
pub fn generate_division_trace(dividend: u32, divisor: u32) -> std::result::Result<JsValue, JsValue> {
    let problem = DividendDivisor::new(dividend, divisor).map_err(js_error)?;
    serialize(&generate_trace(&problem), "Failed to serialize trace")
}

/// Random practice problem with the given digit counts
#[wasm_bindgen(js_name = randomDivisionProblem)]
pub fn random_division_problem(
    dividend_digits: u32,
    divisor_digits: u32,
) -> std::result::Result<JsValue, JsValue> {
    let problem = random_problem(dividend_digits, divisor_digits).map_err(js_error)?;
    serialize(&problem, "Failed to serialize problem")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_diagram(dividend: u32, divisor: u32) -> u32 {
        let problem = DividendDivisor::new(dividend, divisor).unwrap();
        register_diagram(DivisionDiagram::new(problem).unwrap())
    }

    #[test]
    fn test_registry_round_trip() {
        let id = new_diagram(156, 7);
        assert_eq!(with_diagram(id, |d| Ok(d.advance())).unwrap(), 1);
        assert_eq!(with_diagram(id, |d| Ok(d.stage_index())).unwrap(), 1);
        assert!(dispose_diagram_by_id(id));
        assert!(!dispose_diagram_by_id(id));
    }

    #[test]
    fn test_create_diagram_outside_browser() {
        let id = create_division_diagram(156, 7).unwrap();
        assert_eq!(with_diagram(id, |d| Ok(d.stages().len())).unwrap(), 5);
        assert!(dispose_diagram(id));
    }

    #[test]
    fn test_unknown_handle() {
        let err = with_diagram(u32::MAX, |d| Ok(d.advance())).unwrap_err();
        assert_eq!(err, DiagramError::UnknownDiagram(u32::MAX));
    }

    #[test]
    fn test_handles_are_distinct() {
        let a = new_diagram(12, 48);
        let b = new_diagram(12, 48);
        assert_ne!(a, b);
        with_diagram(a, |d| Ok(d.advance())).unwrap();
        assert_eq!(with_diagram(b, |d| Ok(d.stage_index())).unwrap(), 0);
        dispose_diagram_by_id(a);
        dispose_diagram_by_id(b);
    }
}
