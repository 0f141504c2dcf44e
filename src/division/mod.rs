//! Long division: trace generation, validation and layout
//!
//! ## Data flow
//!
//! ```text
//! DividendDivisor ──generate_trace──▶ [DivisionStep]
//!                                        │
//!                        StagePlan ◀─────┤ (stage of every step)
//!                                        ▼
//!          StepCursor ──▶ LongDivisionLayoutEngine ──▶ LayoutResult
//! ```
//!
//! ## Modules
//!
//! - `columns`: digit counts and column anchoring
//! - `stages`: mapping trace steps to named stages
//! - `generator`: reference schoolbook trace and random practice problems
//! - `validate`: trace contract checks reported as diagnostics
//! - `layout_engine`: visible-prefix layout (quotient digits, work rows)

pub mod columns;
pub mod stages;
pub mod generator;
pub mod validate;
pub mod layout_engine;

pub use columns::{digit_count, digits_of, place_value};
pub use stages::StagePlan;
pub use generator::{generate_trace, random_problem};
pub use validate::{validate_trace, validate_problem_trace};
pub use layout_engine::{compute_layout, LongDivisionLayoutEngine};
