//! Layout Arithmetic
//!
//! Maps char offsets to visual (column, row) cells and back. Every char is
//! one cell wide except tabs, which take a fixed number of cells. Pixel
//! conversion is a separate concern handled by [`Metrics`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use scriptpad_core::EditorConfig;

use crate::buffer::TextBuffer;

/// Visual position of a boundary: `x` is the tab-expanded column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaretCoord {
    pub x: usize,
    pub y: usize,
}

impl CaretCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle handed to the host for selection highlighting
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Pixel metrics of the monospace grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub line_height: f32,
    pub char_width: f32,
    pub text_left: f32,
}

impl Metrics {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            line_height: config.line_height,
            char_width: config.char_width,
            text_left: config.text_left(),
        }
    }

    /// Top-left pixel of a cell
    pub fn to_pixel(&self, coord: CaretCoord) -> (f32, f32) {
        (
            (coord.x as f32 * self.char_width + self.text_left).floor(),
            (coord.y as f32 * self.line_height).floor(),
        )
    }

    /// Fractional column and whole row under a pixel; left of the text clamps to column 0
    pub fn from_pixel(&self, x: f32, y: f32) -> (f32, usize) {
        let column = ((x - self.text_left) / self.char_width).max(0.0);
        let row = (y / self.line_height).floor().max(0.0) as usize;
        (column, row)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Offset <-> cell conversions over a [`TextBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMapper {
    tab_width: usize,
}

impl OffsetMapper {
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Cells occupied by a char
    pub fn char_width(&self, ch: char) -> usize {
        if ch == '\t' {
            self.tab_width
        } else {
            1
        }
    }

    /// Visual width of the chars between the previous newline (or start) and `offset`
    pub fn line_width_before(&self, buffer: &TextBuffer, offset: usize) -> usize {
        let mut chars = buffer.chars_at(offset);
        let mut width = 0;
        while let Some(ch) = chars.prev() {
            if ch == '\n' {
                break;
            }
            width += self.char_width(ch);
        }
        width
    }

    /// Walk from `from` (whose cell is `coord`) to `target`, returning the cell of `target`
    pub fn sync_offset(
        &self,
        buffer: &TextBuffer,
        target: usize,
        from: usize,
        coord: CaretCoord,
    ) -> CaretCoord {
        let target = buffer.clamp(target);
        let from = buffer.clamp(from);
        let mut coord = coord;

        if target > from {
            for ch in buffer.chars_at(from).take(target - from) {
                if ch == '\n' {
                    coord.y += 1;
                    coord.x = 0;
                } else {
                    coord.x += self.char_width(ch);
                }
            }
        } else if target < from {
            let mut chars = buffer.chars_at(from);
            let mut pos = from;
            while pos > target {
                let Some(ch) = chars.prev() else { break };
                pos -= 1;
                if ch == '\n' {
                    coord.y = coord.y.saturating_sub(1);
                    coord.x = self.line_width_before(buffer, pos);
                } else {
                    coord.x = coord.x.saturating_sub(self.char_width(ch));
                }
            }
        }

        trace!("Synced offset {} -> {} at {:?}", from, target, coord);
        coord
    }

    /// Cell of an offset, walked from the document start
    pub fn offset_to_point(&self, buffer: &TextBuffer, offset: usize) -> CaretCoord {
        self.sync_offset(buffer, offset, 0, CaretCoord::default())
    }

    /// Nearest boundary to a (column, row) hit; ties round toward the larger offset
    pub fn point_to_offset(&self, buffer: &TextBuffer, column: f32, row: usize) -> usize {
        let column = column.max(0.0);
        let mut x = 0usize;
        let mut y = 0usize;
        let mut offset = 0usize;

        for ch in buffer.chars_at(0) {
            if ch == '\n' {
                // Hit is past the end of this row
                if y >= row {
                    break;
                }
                x = 0;
                y += 1;
            } else {
                let width = self.char_width(ch);
                if y == row && (x + width) as f32 > column {
                    let fraction = (column - x as f32) / width as f32;
                    return offset + (fraction + 0.5).floor() as usize;
                }
                x += width;
            }
            offset += 1;
        }

        offset
    }

    /// Last boundary on the previous line whose column is at most `column`
    pub fn offset_above(&self, buffer: &TextBuffer, offset: usize, column: usize) -> usize {
        let line = buffer.char_to_line(offset);
        if line == 0 {
            return 0;
        }

        let start = buffer.line_to_char(line - 1);
        let text = buffer.line(line - 1).unwrap_or_default();
        let mut best = start;
        let mut x = 0;
        for (i, ch) in text.chars().enumerate() {
            x += self.char_width(ch);
            if x > column {
                break;
            }
            best = start + i + 1;
        }
        best
    }

    /// First boundary on the next line whose column is at least `column`, else that line's end
    pub fn offset_below(&self, buffer: &TextBuffer, offset: usize, column: usize) -> usize {
        let line = buffer.char_to_line(offset);
        if line + 1 >= buffer.line_count() {
            return buffer.len_chars();
        }

        let start = buffer.line_to_char(line + 1);
        if column == 0 {
            return start;
        }

        let text = buffer.line(line + 1).unwrap_or_default();
        let mut x = 0;
        for (i, ch) in text.chars().enumerate() {
            x += self.char_width(ch);
            if x >= column {
                return start + i + 1;
            }
        }
        start + text.chars().count()
    }

    /// One pixel rectangle per row touched by `[min, max)`; `start` is the cell of `min`
    pub fn selection_rects(
        &self,
        buffer: &TextBuffer,
        min: usize,
        max: usize,
        start: CaretCoord,
        metrics: &Metrics,
    ) -> Vec<Rect> {
        let mut rects = Vec::new();
        if min >= max {
            return rects;
        }

        let row_rect = |row: usize, from_x: usize, to_x: usize| Rect {
            top: row as f32 * metrics.line_height,
            left: from_x as f32 * metrics.char_width + metrics.text_left,
            width: (to_x - from_x) as f32 * metrics.char_width,
            height: metrics.line_height,
        };

        let mut row = start.y;
        let mut row_start = start.x;
        let mut x = start.x;
        for ch in buffer.chars_at(min).take(max - min) {
            if ch == '\n' {
                rects.push(row_rect(row, row_start, x));
                row += 1;
                row_start = 0;
                x = 0;
            } else {
                x += self.char_width(ch);
            }
        }
        rects.push(row_rect(row, row_start, x));

        rects
    }
}

impl Default for OffsetMapper {
    fn default() -> Self {
        Self::new(EditorConfig::default().tab_width)
    }
}
