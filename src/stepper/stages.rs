//! Named stage lists
//!
//! Every diagram reveals itself in named stages ("setup", "divide_1", ...).
//! `StageList` keeps the ordered ids together with the cursor that walks
//! them, so components ask `is_visible("multiply")` instead of comparing
//! raw indices.

use serde::{Deserialize, Serialize};
use crate::error::{DiagramError, Result};
use super::cursor::StepCursor;

/// Builder for an ordered list of unique stage ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageListBuilder {
    ids: Vec<String>,
}

impl StageListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage; duplicate ids are ignored
    pub fn push(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
        self
    }

    /// Append a stage only when `condition` holds
    pub fn push_if(self, condition: bool, id: impl Into<String>) -> Self {
        if condition {
            self.push(id)
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Finish the list with the cursor on the first stage
    pub fn build(self) -> Result<StageList> {
        StageList::new(self.ids, 0)
    }
}

/// Ordered stage ids plus the cursor walking them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StageListInput")]
pub struct StageList {
    ids: Vec<String>,
    cursor: StepCursor,
}

/// Wire form of a stage list; the cursor total always follows `ids`
#[derive(Deserialize)]
struct StageListInput {
    ids: Vec<String>,
    #[serde(default)]
    cursor: Option<CursorIndex>,
}

#[derive(Deserialize)]
struct CursorIndex {
    #[serde(default)]
    index: usize,
}

impl TryFrom<StageListInput> for StageList {
    type Error = DiagramError;

    fn try_from(input: StageListInput) -> Result<Self> {
        let index = input.cursor.map(|c| c.index).unwrap_or(0);
        StageList::new(input.ids, index)
    }
}

impl StageList {
    /// Fails with `InvalidStageCount` when `ids` is empty
    pub fn new(ids: Vec<String>, initial: usize) -> Result<Self> {
        let cursor = StepCursor::new(ids.len(), initial)?;
        Ok(Self { ids, cursor })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn cursor(&self) -> &StepCursor {
        &self.cursor
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn current_id(&self) -> &str {
        &self.ids[self.cursor.index()]
    }

    /// True once the cursor has reached `id` (unknown ids are never visible)
    pub fn is_visible(&self, id: &str) -> bool {
        self.index_of(id)
            .map(|idx| self.cursor.is_at_or_after(idx))
            .unwrap_or(false)
    }

    /// True only while the cursor sits exactly on `id`
    pub fn is_current(&self, id: &str) -> bool {
        self.index_of(id) == Some(self.cursor.index())
    }

    pub fn advance(&mut self) -> usize {
        self.cursor.advance()
    }

    pub fn retreat(&mut self) -> usize {
        self.cursor.retreat()
    }

    pub fn seek(&mut self, index: usize) -> usize {
        self.cursor.seek(index)
    }

    /// Back to the first stage
    pub fn reset(&mut self) {
        self.cursor.seek(0);
    }
}
