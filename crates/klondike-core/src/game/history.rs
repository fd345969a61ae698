use crate::model::table::Table;

/// Full copy of the position as it was before one successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub table: Table,
    pub last_move: Option<String>,
}

/// Undo history. Unbounded; there is no redo.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    entries: Vec<Snapshot>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
