//! Cursor Management
//!
//! The cursor is a pair of offsets: `start` is where edits happen, `end` is
//! the selection anchor. Visual coordinates are cached per caret in a
//! [`CaretCache`], which can only be read through a syncing accessor.

use serde::{Deserialize, Serialize};

use crate::buffer::TextBuffer;
use crate::layout::{CaretCoord, OffsetMapper};

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which of the two carets a notification refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaretKind {
    /// The edit point (`Cursor::start`)
    Active,
    /// The selection anchor (`Cursor::end`)
    Anchor,
}

/// Active point plus selection anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub start: usize,
    pub end: usize,
}

impl Cursor {
    /// Create a cursor with an explicit active point and anchor
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a collapsed cursor
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// No selection
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Lower bound of the selection
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// Upper bound of the selection
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Move the active point, dragging the anchor along unless extending
    pub fn move_to(&mut self, offset: usize, extend: bool) {
        self.start = offset;
        if !extend {
            self.end = offset;
        }
    }

    /// Collapse both ends onto an offset
    pub fn collapse_to(&mut self, offset: usize) {
        self.start = offset;
        self.end = offset;
    }

    /// Clamp both ends into `[0, len]`
    pub fn clamped(&self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

/// Cached visual coordinates of one caret
///
/// The coordinate is only meaningful relative to the offset it was last
/// synced to, so the sole accessor takes the target offset and walks the
/// delta before answering.
#[derive(Debug, Clone, Default)]
pub struct CaretCache {
    coord: CaretCoord,
    synced_offset: usize,
}

impl CaretCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync to `target` and return its coordinates
    pub fn locate(
        &mut self,
        mapper: &OffsetMapper,
        buffer: &TextBuffer,
        target: usize,
    ) -> CaretCoord {
        self.coord = mapper.sync_offset(buffer, target, self.synced_offset, self.coord);
        self.synced_offset = buffer.clamp(target);
        self.coord
    }

    /// Forget the cache if text before the synced offset changed
    pub fn invalidate_from(&mut self, offset: usize) {
        if offset < self.synced_offset {
            self.reset();
        }
    }

    /// Return to the document origin
    pub fn reset(&mut self) {
        self.coord = CaretCoord::default();
        self.synced_offset = 0;
    }

    pub fn synced_offset(&self) -> usize {
        self.synced_offset
    }
}
