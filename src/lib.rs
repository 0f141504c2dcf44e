//! Math Diagram WASM Module
//!
//! Core logic behind the interactive math diagrams: the progressive
//! step-disclosure cursor shared by every diagram, and the column-aligned
//! long division layout engine. Rendering stays in JavaScript; this module
//! hands it plain, pre-computed data.

pub mod error;
pub mod stepper;
pub mod models;
pub mod division;
pub mod diagnostics;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use error::{DiagramError, Result};
pub use models::division::*;
pub use models::layout::*;
pub use models::DivisionDiagram;
pub use stepper::{StageList, StageListBuilder, StepCursor};
pub use division::{compute_layout, generate_trace, LongDivisionLayoutEngine, StagePlan};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }

    log::info!("Math diagram WASM module initialized");
}
