//! Snapshot-based undo/redo over the stroke model
//!
//! Each entry is a full copy of the committed stroke list. Index 0 is always
//! the post-load baseline with no strokes; the background image never changes
//! within one history, so it is not part of the snapshot.

use crate::domain::Stroke;

/// A captured copy of drawable state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub strokes: Vec<Stroke>,
}

/// Ordered snapshots with a cursor
///
/// Empty until [`History::reset`] is called for a loaded image; afterwards the
/// cursor always stays within `0..len`.
///
/// Once `limit` is reached the oldest edit after the baseline is dropped, so
/// undoing past the oldest kept edit jumps straight back to the baseline and
/// removes every stroke that edit held.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Create an empty history keeping at most `limit` snapshots (minimum 2)
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(2),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Cursor position, `None` while empty
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    /// Drop everything and start over from a single baseline entry
    pub fn reset(&mut self, baseline: Snapshot) {
        self.entries.clear();
        self.entries.push(baseline);
        self.cursor = 0;
    }

    /// Record a new state after the cursor, discarding any redo-able future
    pub fn snapshot(&mut self, entry: Snapshot) {
        if self.entries.is_empty() {
            log::warn!("Snapshot taken before a baseline exists, ignoring");
            return;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);

        // Evict the oldest edits but never the baseline
        while self.entries.len() > self.limit {
            self.entries.remove(1);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one snapshot; `None` at the baseline
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("History undo -> {}/{}", self.cursor, self.entries.len() - 1);
        self.entries.get(self.cursor)
    }

    /// Step forward one snapshot; `None` at the newest entry
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("History redo -> {}/{}", self.cursor, self.entries.len() - 1);
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
