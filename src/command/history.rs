use std::collections::VecDeque;

use log::debug;

use crate::document::Document;
use crate::element::ElementType;
use crate::object_table::ObjectTable;
use crate::renderer::CanvasRenderer;
use crate::transform::GridView;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Full copy of a document's objects, without textures.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub objects: ObjectTable<ElementType>,
    pub next_upload_order: i64,
    /// View at capture time, used to re-project zoom levels on restore.
    pub view: GridView,
}

/// Undo/redo stacks of document snapshots.
///
/// Callers push the state *before* a mutation; undo swaps the current state
/// with the most recent snapshot.
#[derive(Debug)]
pub struct History {
    /// Oldest snapshots at the front
    undo_stack: VecDeque<HistorySnapshot>,
    redo_stack: Vec<HistorySnapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Creates an empty history keeping at most `limit` undo steps
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records a pre-mutation state. Clears the redo stack and drops the
    /// oldest entry once the limit is exceeded.
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.undo_stack.push_back(snapshot);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Shorthand for pushing the document's current state.
    pub fn record(&mut self, document: &Document) {
        self.push(document.snapshot());
    }

    /// Restores the previous state. Returns false if there was nothing to undo.
    pub fn undo(&mut self, document: &mut Document, renderer: &mut dyn CanvasRenderer) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(document.snapshot());
        document.restore(snapshot, renderer);
        debug!(
            "Undo: {} undo / {} redo left",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Re-applies the last undone state. Returns false if there was nothing to redo.
    pub fn redo(&mut self, document: &mut Document, renderer: &mut dyn CanvasRenderer) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push_back(document.snapshot());
        document.restore(snapshot, renderer);
        debug!(
            "Redo: {} undo / {} redo left",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Returns true if there are states that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are states that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }
}
