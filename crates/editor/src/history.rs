//! Undo History
//!
//! Every change is recorded as "at `location`, `old` was replaced by
//! `new`". Runs of single-char typing or backspacing are merged into one
//! record through a pending change that is committed when the run ends.
//! A backspace run followed by typing at the same spot stays one record,
//! a replacement of the erased text.

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::cursor::Cursor;

/// One undoable replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    pub location: usize,
    pub old: String,
    pub new: String,
    /// Cursor as it was before the change, restored on undo
    pub cursor_before: Cursor,
}

impl UndoRecord {
    pub fn new(
        location: usize,
        old: impl Into<String>,
        new: impl Into<String>,
        cursor_before: Cursor,
    ) -> Self {
        Self {
            location,
            old: old.into(),
            new: new.into(),
            cursor_before,
        }
    }

    fn old_len(&self) -> usize {
        self.old.chars().count()
    }

    fn new_len(&self) -> usize {
        self.new.chars().count()
    }
}

/// Where an undo or redo touched the buffer and where the cursor goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedEdit {
    pub location: usize,
    pub cursor: Cursor,
}

/// Kind of micro-edit being coalesced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
}

/// A coalescing run that has not been committed yet
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingChange {
    kind: EditKind,
    record: UndoRecord,
}

impl PendingChange {
    /// Offset right after the last typed char
    fn insert_end(&self) -> usize {
        self.record.location + self.record.new_len()
    }
}

/// Undo/redo stacks plus the pending coalescing run
#[derive(Debug, Clone)]
pub struct UndoEngine {
    undo_stack: Vec<UndoRecord>,
    redo_stack: Vec<UndoRecord>,
    pending: Option<PendingChange>,
    max_history: usize,
}

impl UndoEngine {
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending: None,
            max_history: max_history.max(1),
        }
    }

    /// Record a structural edit as its own step
    pub fn record(&mut self, record: UndoRecord) {
        self.commit();
        self.redo_stack.clear();
        debug!(
            "Recording edit at {}: {:?} -> {:?}",
            record.location, record.old, record.new
        );
        self.push_undo(record);
    }

    /// Record one typed char at `location`, which replaced `replaced`
    pub fn record_insert_char(
        &mut self,
        location: usize,
        replaced: &str,
        ch: char,
        cursor_before: Cursor,
    ) {
        self.redo_stack.clear();

        match self.pending.as_mut() {
            Some(p)
                if replaced.is_empty()
                    && p.kind == EditKind::Insert
                    && p.insert_end() == location => {}
            // retyping where a backspace run stopped turns the run into a replacement
            Some(p)
                if replaced.is_empty()
                    && p.kind == EditKind::Delete
                    && p.record.location == location =>
            {
                p.kind = EditKind::Insert;
            }
            _ => {
                self.commit();
                self.pending = Some(PendingChange {
                    kind: EditKind::Insert,
                    record: UndoRecord::new(location, replaced, String::new(), cursor_before),
                });
            }
        }

        if let Some(pending) = self.pending.as_mut() {
            pending.record.new.push(ch);
        }
    }

    /// Record one char removed by backspace; `location` is where it was
    pub fn record_backspace(&mut self, location: usize, removed: char, cursor_before: Cursor) {
        self.redo_stack.clear();

        let continues = matches!(
            &self.pending,
            Some(p) if p.kind == EditKind::Delete && p.record.location == location + 1
        );
        if !continues {
            self.commit();
            self.pending = Some(PendingChange {
                kind: EditKind::Delete,
                record: UndoRecord::new(location, String::new(), String::new(), cursor_before),
            });
        }

        if let Some(pending) = self.pending.as_mut() {
            pending.record.old.insert(0, removed);
            pending.record.location = location;
        }
    }

    /// Move the pending run onto the undo stack
    pub fn commit(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(
                "Committing {:?} run at {}: {:?} -> {:?}",
                pending.kind, pending.record.location, pending.record.old, pending.record.new
            );
            self.push_undo(pending.record);
        }
    }

    fn push_undo(&mut self, record: UndoRecord) {
        self.undo_stack.push(record);

        // Trim undo history if needed
        if self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// Revert the latest step; the cursor is the one from before the edit
    pub fn undo(&mut self, buffer: &mut TextBuffer) -> Option<AppliedEdit> {
        self.commit();
        let record = self.undo_stack.pop()?;

        buffer.replace(record.location, record.new_len(), &record.old);
        debug!("Undo at {}", record.location);

        let cursor = if record.cursor_before.max() <= buffer.len_chars() {
            record.cursor_before
        } else {
            Cursor::at(record.location)
        };
        let location = record.location;
        self.redo_stack.push(record);
        Some(AppliedEdit { location, cursor })
    }

    /// Reapply the latest undone step; the caret lands after the new text
    pub fn redo(&mut self, buffer: &mut TextBuffer) -> Option<AppliedEdit> {
        self.commit();
        let record = self.redo_stack.pop()?;

        buffer.replace(record.location, record.old_len(), &record.new);
        debug!("Redo at {}", record.location);

        let applied = AppliedEdit {
            location: record.location,
            cursor: Cursor::at(record.location + record.new_len()),
        };
        self.push_undo(record);
        Some(applied)
    }

    /// Drop all history, pending run included
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
    }

    /// Committed undo steps
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.pending.is_some() || !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new(1000)
    }
}
