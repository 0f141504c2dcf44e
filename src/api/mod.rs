//! Math Diagram WASM API
//!
//! JavaScript-facing API for the diagram core.
//!
//! # Module Structure
//!
//! - `helpers`: serialization, error conversion and console logging
//! - `diagram`: long division diagram registry, cursor moves and layouts
//! - `stepper`: `StageStepper` class for diagrams that only need a cursor

pub mod helpers;
pub mod diagram;
pub mod stepper;

pub use diagram::{
    create_division_diagram, load_division_diagram, dispose_diagram, advance_diagram,
    retreat_diagram, seek_diagram, get_diagram_layout, get_diagram_display_list,
    get_diagram_stage_ids, is_diagram_stage_visible, is_diagram_stage_current, validate_diagram,
    compute_division_layout, generate_division_trace, random_division_problem,
};
pub use stepper::StageStepper;
