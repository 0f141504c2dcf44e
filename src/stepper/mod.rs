//! Progressive step disclosure
//!
//! Every diagram reveals its construction one stage at a time. This module
//! holds the shared cursor model so each diagram does not reinvent
//! "which stages are visible right now".
//!
//! ## Modules
//!
//! - `cursor`: saturating index over a stage count
//! - `stages`: ordered, dynamically built stage ids walked by a cursor

pub mod cursor;
pub mod stages;

pub use cursor::StepCursor;
pub use stages::{StageList, StageListBuilder};
