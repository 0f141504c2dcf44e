//! Diagnostics for generated traces
//!
//! Non-fatal problems found while validating or laying out a trace. They
//! travel with the layout so the host can flag a generation defect without
//! refusing to draw anything.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostic marks
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A diagnostic mark pointing at a trace step and/or dividend column
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMark {
    /// Offending step, when one can be named
    pub step_index: Option<u32>,
    /// Dividend column involved, when known
    pub column: Option<i32>,
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "incomplete_trace", "cycle_order")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticMark {
    pub fn new(
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            step_index: None,
            column: None,
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn at_step(mut self, step_index: u32) -> Self {
        self.step_index = Some(step_index);
        self
    }

    pub fn at_column(mut self, column: i32) -> Self {
        self.column = Some(column);
        self
    }
}

/// Collection of diagnostic marks for one trace
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub marks: Vec<DiagnosticMark>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn add(&mut self, mark: DiagnosticMark) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = DiagnosticMark>) {
        self.marks.extend(marks);
    }

    pub fn has_errors(&self) -> bool {
        self.marks
            .iter()
            .any(|m| m.severity == DiagnosticSeverity::Error)
    }

    /// Check for a mark of the given kind
    pub fn has_kind(&self, kind: &str) -> bool {
        self.marks.iter().any(|m| m.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }
}
