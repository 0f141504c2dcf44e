//! Data models for the diagram core
//!
//! - `division`: problem constants and the flat step trace
//! - `layout`: renderer-agnostic layout output
//! - `diagram_state`: one live diagram instance (problem + trace + cursor)

pub mod division;
pub mod layout;
pub mod diagram_state;

pub use division::*;
pub use layout::*;
pub use diagram_state::DivisionDiagram;
