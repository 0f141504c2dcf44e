//! Generic stage stepper for JavaScript diagrams
//!
//! Angle, polygon, fraction and graph diagrams only need the step cursor,
//! not a layout engine. They build a `StageStepper` from their own stage
//! ids and ask it what to show.

use wasm_bindgen::prelude::*;
use crate::stepper::StageList;
use super::helpers::js_error;

/// Cursor over a JS-supplied list of stage ids
#[wasm_bindgen]
pub struct StageStepper {
    stages: StageList,
}

#[wasm_bindgen]
impl StageStepper {
    /// Create from an array of stage id strings; non-string entries are skipped
    #[wasm_bindgen(constructor)]
    pub fn new(ids: js_sys::Array, initial: usize) -> Result<StageStepper, JsValue> {
        let ids: Vec<String> = ids.iter().filter_map(|v| v.as_string()).collect();
        let stages = StageList::new(ids, initial).map_err(js_error)?;
        Ok(StageStepper { stages })
    }

    pub fn advance(&mut self) -> usize {
        self.stages.advance()
    }

    pub fn retreat(&mut self) -> usize {
        self.stages.retreat()
    }

    pub fn reset(&mut self) {
        self.stages.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn index(&self) -> usize {
        self.stages.current_index()
    }

    #[wasm_bindgen(getter)]
    pub fn total(&self) -> usize {
        self.stages.len()
    }

    #[wasm_bindgen(getter, js_name = currentId)]
    pub fn current_id(&self) -> String {
        self.stages.current_id().to_string()
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self, id: &str) -> bool {
        self.stages.is_visible(id)
    }

    #[wasm_bindgen(js_name = isCurrent)]
    pub fn is_current(&self, id: &str) -> bool {
        self.stages.is_current(id)
    }

    #[wasm_bindgen(js_name = isAtOrAfter)]
    pub fn is_at_or_after(&self, index: usize) -> bool {
        self.stages.cursor().is_at_or_after(index)
    }
}
