//! Selection Management
//!
//! Word boundaries are runs of chars sharing a [`CharClass`]. The same
//! runs drive double-click selection, word-wise caret travel and
//! word-wise backspace.

use std::time::{Duration, Instant};

use crate::buffer::TextBuffer;

/// Character class used for word boundaries, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII letters, either case
    Letter,
    Digit,
    /// Space, tab or newline
    Whitespace,
    /// A bracket or quote; each one is its own class
    Singleton(char),
    Other,
}

const SINGLETONS: [char; 8] = ['(', ')', '[', ']', '{', '}', '"', '\''];

impl CharClass {
    pub fn of(ch: char) -> Self {
        if ch.is_ascii_alphabetic() {
            CharClass::Letter
        } else if ch.is_ascii_digit() {
            CharClass::Digit
        } else if matches!(ch, ' ' | '\t' | '\n') {
            CharClass::Whitespace
        } else if SINGLETONS.contains(&ch) {
            CharClass::Singleton(ch)
        } else {
            CharClass::Other
        }
    }
}

/// Start of the run containing the char left of `offset`
pub fn word_start(buffer: &TextBuffer, offset: usize) -> usize {
    let offset = buffer.clamp(offset);
    let mut chars = buffer.chars_at(offset);
    let Some(pivot) = chars.prev() else {
        return 0;
    };
    let class = CharClass::of(pivot);
    let mut start = offset - 1;
    while let Some(ch) = chars.prev() {
        if CharClass::of(ch) != class {
            break;
        }
        start -= 1;
    }
    start
}

/// End of the run containing the char at `offset`
pub fn word_end(buffer: &TextBuffer, offset: usize) -> usize {
    let offset = buffer.clamp(offset);
    let mut chars = buffer.chars_at(offset);
    let Some(pivot) = chars.next() else {
        return offset;
    };
    let class = CharClass::of(pivot);
    offset + 1 + chars.take_while(|&ch| CharClass::of(ch) == class).count()
}

/// Run containing the char left of the caret (right of it at offset 0), as `(start, end)`
pub fn word_around(buffer: &TextBuffer, caret: usize) -> (usize, usize) {
    let caret = buffer.clamp(caret);
    if buffer.is_empty() {
        return (0, 0);
    }
    if caret == 0 {
        return (0, word_end(buffer, 0));
    }

    let Some(pivot) = buffer.char_at(caret - 1) else {
        return (caret, caret);
    };
    let class = CharClass::of(pivot);
    let end = caret
        + buffer
            .chars_at(caret)
            .take_while(|&ch| CharClass::of(ch) == class)
            .count();
    (word_start(buffer, caret), end)
}

/// Outcome of a pointer press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// Detects double-clicks: a second press at the same offset inside the window
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    last_press: Option<Instant>,
}

impl ClickTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_press: None,
        }
    }

    /// Record a press; `previous` is the caret before the press, `landed` where it resolved
    pub fn press(&mut self, now: Instant, previous: usize, landed: usize) -> ClickKind {
        let quick = self
            .last_press
            .is_some_and(|last| now.saturating_duration_since(last) < self.window);
        self.last_press = Some(now);

        if quick && previous == landed {
            ClickKind::Double
        } else {
            ClickKind::Single
        }
    }

    pub fn reset(&mut self) {
        self.last_press = None;
    }
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
