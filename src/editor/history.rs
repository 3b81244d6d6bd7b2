//! Bounded, cursor-based snapshot history for undo/redo.
//!
//! Snapshots hold `Arc`s to bricks. The live collection edits bricks
//! copy-on-write, so a stored snapshot never changes after it is recorded
//! and unchanged bricks are shared between snapshots.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::format::EditorBrick;

/// Immutable copy of the whole brick collection
pub type Snapshot = Arc<[Arc<EditorBrick>]>;

/// Linear history with a cursor at the current state
#[derive(Debug)]
pub struct History {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    max_entries: usize,
}

impl History {
    /// Start a history whose only entry is `initial`
    pub fn new(max_entries: usize, initial: Snapshot) -> Self {
        let max_entries = max_entries.max(1);
        let mut entries = VecDeque::with_capacity(max_entries);
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            max_entries,
        }
    }

    /// Drop everything after the cursor, append, evict the oldest past the cap
    pub fn record(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
            self.cursor -= 1;
        }
    }

    /// Step back, returning the snapshot now under the cursor
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward, returning the snapshot now under the cursor
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
