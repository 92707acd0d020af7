//! Line Projection
//!
//! Keeps one projected line per document line and reconciles it against
//! the buffer after every edit. Only lines whose text or incoming comment
//! state changed are retokenized and reported to the host, so an edit
//! that flips a block comment cascades exactly as far as it has to.

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::syntax::{StyledSpan, Tokenizer};
use crate::view::HostView;

/// What the host currently shows for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedLine {
    pub text: String,
    pub entry_in_comment: bool,
    pub exit_in_comment: bool,
    pub spans: Vec<StyledSpan>,
}

/// Counts from one reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    pub changed: usize,
    pub inserted: usize,
    pub removed: usize,
}

impl ReconcileStats {
    /// Nothing was reported to the host
    pub fn is_noop(&self) -> bool {
        self.changed == 0 && self.inserted == 0 && self.removed == 0
    }
}

/// Positional mirror of the host's line objects
#[derive(Debug, Clone, Default)]
pub struct LineProjection {
    lines: Vec<ProjectedLine>,
}

impl LineProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&ProjectedLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[ProjectedLine] {
        &self.lines
    }

    /// Bring the projection in line with `buffer`; lines before `from_line` are known unchanged
    pub fn reconcile<V: HostView>(
        &mut self,
        buffer: &TextBuffer,
        tokenizer: &Tokenizer,
        view: &mut V,
        from_line: usize,
    ) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        let count = buffer.line_count();
        let from = from_line.min(self.lines.len()).min(count);

        let mut entry = match from {
            0 => false,
            n => self.lines[n - 1].exit_in_comment,
        };

        for index in from..count {
            let text = buffer.line(index).unwrap_or_default();

            if let Some(existing) = self.lines.get(index) {
                if existing.text == text && existing.entry_in_comment == entry {
                    entry = existing.exit_in_comment;
                    continue;
                }
            }

            let tokens = tokenizer.tokenize_line(&text, entry);
            let line = ProjectedLine {
                text,
                entry_in_comment: entry,
                exit_in_comment: tokens.exit_in_comment,
                spans: tokens.spans,
            };
            entry = line.exit_in_comment;

            if index < self.lines.len() {
                stats.changed += 1;
            } else {
                view.on_line_inserted(index);
                stats.inserted += 1;
            }
            view.on_line_changed(index, &line.text, &line.spans, line.entry_in_comment);

            if index < self.lines.len() {
                self.lines[index] = line;
            } else {
                self.lines.push(line);
            }
        }

        for index in (count..self.lines.len()).rev() {
            view.on_line_removed(index);
            stats.removed += 1;
        }
        self.lines.truncate(count);

        if !stats.is_noop() {
            debug!(
                "Reconciled lines from {}: {} changed, {} inserted, {} removed",
                from, stats.changed, stats.inserted, stats.removed
            );
        }
        stats
    }

    /// Forget every line without notifying the host
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenKind;
    use crate::view::{EventBus, NullView, ViewEvent};
    use std::sync::Arc;

    fn project(text: &str) -> (TextBuffer, LineProjection) {
        let buffer = TextBuffer::from_str(text);
        let mut projection = LineProjection::new();
        projection.reconcile(&buffer, &Tokenizer::default(), &mut NullView, 0);
        (buffer, projection)
    }

    #[test]
    fn test_initial_projection_inserts_every_line() {
        let buffer = TextBuffer::from_str("local a = 1\n\nprint(a)");
        let mut projection = LineProjection::new();
        let mut bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();

        let stats = projection.reconcile(&buffer, &Tokenizer::default(), &mut bus, 0);
        assert_eq!(stats, ReconcileStats { changed: 0, inserted: 3, removed: 0 });

        let events = sub.drain();
        assert_eq!(events[0], ViewEvent::LineInserted { index: 0 });
        assert!(matches!(&events[1], ViewEvent::LineChanged { index: 0, .. }));
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn test_second_reconcile_is_a_fixed_point() {
        let (buffer, mut projection) = project("--[[ a\nb ]] x\ny");
        let before = projection.lines().to_vec();

        let stats = projection.reconcile(&buffer, &Tokenizer::default(), &mut NullView, 0);
        assert!(stats.is_noop());
        assert_eq!(projection.lines(), before.as_slice());
    }

    #[test]
    fn test_opening_comment_marks_next_line() {
        let (mut buffer, mut projection) = project("print(1)\nbody ]]\nx = 2");
        assert!(!projection.line(1).unwrap().entry_in_comment);

        buffer.insert(0, "--[[");
        let stats = projection.reconcile(&buffer, &Tokenizer::default(), &mut NullView, 0);

        // line 1 closes the comment, so line 2 keeps its state and is left alone
        assert_eq!(stats.changed, 2);
        assert!(projection.line(1).unwrap().entry_in_comment);
        assert_eq!(projection.line(1).unwrap().spans[0].kind, TokenKind::Comment);
        assert!(!projection.line(2).unwrap().entry_in_comment);
    }

    #[test]
    fn test_closing_comment_retokenizes_only_that_line() {
        let (mut buffer, mut projection) = project("--[[ open\nbody");
        assert!(projection.line(1).unwrap().entry_in_comment);
        assert!(projection.line(1).unwrap().exit_in_comment);

        buffer.insert(buffer.len_chars(), " ]]");
        let mut bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();
        let stats = projection.reconcile(&buffer, &Tokenizer::default(), &mut bus, 0);

        assert_eq!(stats, ReconcileStats { changed: 1, inserted: 0, removed: 0 });
        assert!(!projection.line(1).unwrap().exit_in_comment);
        assert!(matches!(
            sub.drain().as_slice(),
            [ViewEvent::LineChanged { index: 1, entry_in_comment: true, .. }]
        ));
    }

    #[test]
    fn test_removed_lines_go_highest_first() {
        let (mut buffer, mut projection) = project("a\nb\nc\nd");
        buffer.delete(1, buffer.len_chars());

        let mut bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();
        let stats = projection.reconcile(&buffer, &Tokenizer::default(), &mut bus, 0);

        assert_eq!(stats.removed, 3);
        assert_eq!(
            sub.drain(),
            vec![
                ViewEvent::LineRemoved { index: 3 },
                ViewEvent::LineRemoved { index: 2 },
                ViewEvent::LineRemoved { index: 1 },
            ]
        );
        assert_eq!(projection.len(), 1);
    }

    #[test]
    fn test_dirty_hint_skips_earlier_lines() {
        let (mut buffer, mut projection) = project("one\ntwo\nthree");
        let at = buffer.line_to_char(2);
        buffer.insert(at, "x");

        let stats = projection.reconcile(&buffer, &Tokenizer::default(), &mut NullView, 2);
        assert_eq!(stats.changed, 1);
        assert_eq!(projection.line(2).unwrap().text, "xthree");
    }
}
