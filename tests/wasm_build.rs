//! WASM build test
//!
//! Exercises the JavaScript-facing API inside a browser.

#![cfg(target_arch = "wasm32")]

use math_diagrams_wasm::api::*;
use math_diagrams_wasm::diagnostics::Diagnostics;
use math_diagrams_wasm::{generate_trace, DividendDivisor};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_diagram_lifecycle() {
    let id = create_division_diagram(156, 7).unwrap();
    assert_eq!(advance_diagram(id).unwrap(), 1);
    assert_eq!(retreat_diagram(id).unwrap(), 0);

    let ids = get_diagram_stage_ids(id).unwrap();
    assert_eq!(ids.length(), 5);
    assert_eq!(ids.get(1).as_string().unwrap(), "divide_1");

    assert!(is_diagram_stage_visible(id, "setup").unwrap());
    assert!(!is_diagram_stage_visible(id, "complete").unwrap());
    assert!(dispose_diagram(id));
}

#[wasm_bindgen_test]
fn test_zero_divisor_rejected() {
    assert!(create_division_diagram(10, 0).is_err());
}

#[wasm_bindgen_test]
fn test_layout_and_display_list_serialize() {
    let id = create_division_diagram(1005, 5).unwrap();
    seek_diagram(id, 99).unwrap();

    let layout = get_diagram_layout(id).unwrap();
    assert!(layout.is_object());

    let list = get_diagram_display_list(id, JsValue::UNDEFINED).unwrap();
    assert!(list.is_object());
    dispose_diagram(id);
}

#[wasm_bindgen_test]
fn test_unknown_handle_rejected() {
    assert!(advance_diagram(u32::MAX).is_err());
}

#[wasm_bindgen_test]
fn test_stage_stepper_class() {
    let ids = js_sys::Array::new();
    ids.push(&JsValue::from_str("setup"));
    ids.push(&JsValue::from_str("angles"));

    let mut stepper = StageStepper::new(ids, 0).unwrap();
    assert_eq!(stepper.total(), 2);
    stepper.advance();
    stepper.advance();
    assert_eq!(stepper.index(), 1);
    assert_eq!(stepper.current_id(), "angles");
    assert!(stepper.is_visible("setup"));
}

#[wasm_bindgen_test]
fn test_load_generated_trace() {
    let problem = serde_wasm_bindgen::to_value(&DividendDivisor::new(156, 7).unwrap()).unwrap();
    let trace = generate_division_trace(156, 7).unwrap();

    let id = load_division_diagram(problem, trace).unwrap();
    assert_eq!(get_diagram_stage_ids(id).unwrap().length(), 5);

    let diags: Diagnostics = serde_wasm_bindgen::from_value(validate_diagram(id).unwrap()).unwrap();
    assert!(diags.is_empty());
    dispose_diagram(id);
}

#[wasm_bindgen_test]
fn test_load_truncated_trace_still_draws() {
    let problem = DividendDivisor::new(156, 7).unwrap();
    let mut steps = generate_trace(&problem);
    steps.pop();

    let id = load_division_diagram(
        serde_wasm_bindgen::to_value(&problem).unwrap(),
        serde_wasm_bindgen::to_value(&steps).unwrap(),
    )
    .unwrap();

    let diags: Diagnostics = serde_wasm_bindgen::from_value(validate_diagram(id).unwrap()).unwrap();
    assert!(!diags.is_empty());
    assert!(get_diagram_layout(id).unwrap().is_object());
    dispose_diagram(id);
}
