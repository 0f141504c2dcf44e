//! Step cursor for progressive disclosure
//!
//! Pure index arithmetic with no knowledge of what the stages mean.

use serde::{Deserialize, Serialize};
use crate::error::{DiagramError, Result};

/// Saturating cursor over `total` stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CursorInput")]
pub struct StepCursor {
    index: usize,
    total: usize,
}

/// Wire form of a cursor; goes through `StepCursor::new` so `index` is clamped
#[derive(Deserialize)]
struct CursorInput {
    #[serde(default)]
    index: usize,
    total: usize,
}

impl TryFrom<CursorInput> for StepCursor {
    type Error = DiagramError;

    fn try_from(input: CursorInput) -> Result<Self> {
        StepCursor::new(input.total, input.index)
    }
}

impl StepCursor {
    /// Create a cursor, clamping `initial` into `[0, total - 1]`
    pub fn new(total: usize, initial: usize) -> Result<Self> {
        if total < 1 {
            return Err(DiagramError::InvalidStageCount { total });
        }
        Ok(Self {
            index: initial.min(total - 1),
            total,
        })
    }

    /// Cursor at the first stage
    pub fn at_start(total: usize) -> Result<Self> {
        Self::new(total, 0)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Index of the last stage
    pub fn last_index(&self) -> usize {
        self.total - 1
    }

    /// Move forward one stage (no-op at the last stage)
    pub fn advance(&mut self) -> usize {
        if self.index < self.last_index() {
            self.index += 1;
        }
        self.index
    }

    /// Move back one stage (no-op at the first stage)
    pub fn retreat(&mut self) -> usize {
        if self.index > 0 {
            self.index -= 1;
        }
        self.index
    }

    /// Jump to a stage, clamped into range
    pub fn seek(&mut self, index: usize) -> usize {
        self.index = index.min(self.last_index());
        self.index
    }

    /// Visibility predicate: a stage is shown once the cursor reaches it
    pub fn is_at_or_after(&self, target: usize) -> bool {
        self.index >= target
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index == self.last_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stages_rejected() {
        assert_eq!(
            StepCursor::new(0, 0),
            Err(DiagramError::InvalidStageCount { total: 0 })
        );
    }

    #[test]
    fn test_initial_index_clamped() {
        let cursor = StepCursor::new(3, 10).unwrap();
        assert_eq!(cursor.index(), 2);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_advance_saturates() {
        let mut cursor = StepCursor::at_start(5).unwrap();
        for _ in 0..6 {
            cursor.advance();
        }
        assert_eq!(cursor.index(), 4); // Not 5, not wrapped to 0
    }

    #[test]
    fn test_retreat_at_zero_is_noop() {
        let mut cursor = StepCursor::at_start(3).unwrap();
        assert_eq!(cursor.retreat(), 0);
        assert!(cursor.is_at_start());
    }

    #[test]
    fn test_single_stage_cursor() {
        let mut cursor = StepCursor::at_start(1).unwrap();
        assert_eq!(cursor.advance(), 0);
        assert_eq!(cursor.retreat(), 0);
        assert!(cursor.is_at_start() && cursor.is_at_end());
    }

    #[test]
    fn test_visibility_follows_current_index() {
        let mut cursor = StepCursor::at_start(4).unwrap();
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_or_after(1));
        assert!(cursor.is_at_or_after(2));
        assert!(!cursor.is_at_or_after(3));

        // Retreating hides the stage again
        cursor.retreat();
        assert!(!cursor.is_at_or_after(2));
    }

    #[test]
    fn test_deserialize_rejects_zero_stages() {
        let cursor: std::result::Result<StepCursor, _> =
            serde_json::from_str(r#"{"index": 7, "total": 0}"#);
        assert!(cursor.is_err());
    }

    #[test]
    fn test_deserialize_clamps_index() {
        let mut cursor: StepCursor = serde_json::from_str(r#"{"index": 7, "total": 3}"#).unwrap();
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.advance(), 2);
    }

    #[test]
    fn test_seek_clamps() {
        let mut cursor = StepCursor::at_start(4).unwrap();
        assert_eq!(cursor.seek(99), 3);
        assert_eq!(cursor.seek(1), 1);
    }
}
