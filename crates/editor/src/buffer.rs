//! Text Buffer
//!
//! Rope-backed document storage. All offsets are char indices and only
//! `\n` separates lines.

use ropey::Rope;
use std::ops::Range;
use tracing::warn;

/// Replace every `\r\n` pair with `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// The document being edited
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer from a string
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get the full text content
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Get the total character count
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Character at an offset, `None` past the end
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.rope.len_chars() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }

    /// Text in a char range; the range is clamped to the document
    pub fn slice(&self, range: Range<usize>) -> String {
        let end = self.clamp(range.end);
        let start = self.clamp(range.start).min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Iterate characters starting at an offset
    pub fn chars_at(&self, offset: usize) -> ropey::iter::Chars<'_> {
        self.rope.chars_at(self.clamp(offset))
    }

    /// Get the number of logical lines (an empty document has one)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get line content without its trailing newline
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line_idx).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// Offset of the first character of a line
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        self.rope.line_to_char(line_idx.min(self.rope.len_lines()))
    }

    /// Line containing an offset
    pub fn char_to_line(&self, offset: usize) -> usize {
        self.rope.char_to_line(self.clamp(offset))
    }

    /// Insert text at a char offset
    pub fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = self.clamp(offset);
        self.rope.insert(offset, text);
    }

    /// Remove `[min(start, end), max(start, end))`
    pub fn delete(&mut self, start: usize, end: usize) {
        if start == end {
            return;
        }
        let (lo, hi) = if start < end { (start, end) } else { (end, start) };
        let hi = self.clamp(hi);
        let lo = self.clamp(lo).min(hi);
        self.rope.remove(lo..hi);
    }

    /// Replace `remove_len` chars at `location` with `text`
    pub fn replace(&mut self, location: usize, remove_len: usize, text: &str) {
        let location = self.clamp(location);
        self.delete(location, location + remove_len);
        self.insert(location, text);
    }

    /// Replace the whole document
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Clamp an offset into `[0, len]`, logging contract violations
    pub fn clamp(&self, offset: usize) -> usize {
        let len = self.rope.len_chars();
        if offset > len {
            warn!("Offset {} out of range, clamping to {}", offset, len);
            len
        } else {
            offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::from_str("local x = 1\nprint(x)");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.len_chars(), 20);
        assert_eq!(buffer.line(1).as_deref(), Some("print(x)"));
        assert_eq!(buffer.line(2), None);
    }

    #[test]
    fn test_insert() {
        let mut buffer = TextBuffer::from_str("print()");
        buffer.insert(6, "\"hi\"");
        assert_eq!(buffer.text(), "print(\"hi\")");
    }

    #[test]
    fn test_delete_is_order_independent() {
        let mut buffer = TextBuffer::from_str("Hello, World!");
        buffer.delete(7, 0);
        assert_eq!(buffer.text(), "World!");
        buffer.delete(3, 3);
        assert_eq!(buffer.text(), "World!");
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let mut buffer = TextBuffer::from_str("abc");
        buffer.insert(99, "d");
        assert_eq!(buffer.text(), "abcd");
        buffer.delete(2, 99);
        assert_eq!(buffer.text(), "ab");
        assert_eq!(buffer.slice(1..50), "b");
    }

    #[test]
    fn test_trailing_newline_makes_empty_line() {
        let buffer = TextBuffer::from_str("a\n");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line(1).as_deref(), Some(""));
    }

    #[test]
    fn test_carriage_return_is_not_a_line_break() {
        let buffer = TextBuffer::from_str("a\rb");
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let mut buffer = TextBuffer::from_str("héllo");
        buffer.delete(1, 2);
        assert_eq!(buffer.text(), "hllo");
        assert_eq!(buffer.char_at(0), Some('h'));
    }

    #[test]
    fn test_replace() {
        let mut buffer = TextBuffer::from_str("x = old");
        buffer.replace(4, 3, "new_value");
        assert_eq!(buffer.text(), "x = new_value");
    }
}
