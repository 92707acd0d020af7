//! Editor Controller
//!
//! Ties the buffer, carets, tokenizer, undo history and line projection
//! together behind the host-facing input operations. Every input ends in
//! [`Editor::refresh`], which reconciles dirty lines and reports both
//! carets, the selection rectangles and a scroll hint to the view.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use uuid::Uuid;

use scriptpad_core::{EditorConfig, Result, ScriptpadError};

use crate::buffer::{normalize_newlines, TextBuffer};
use crate::cursor::{CaretCache, CaretKind, Cursor, Direction};
use crate::history::{AppliedEdit, UndoEngine, UndoRecord};
use crate::layout::{CaretCoord, Metrics, OffsetMapper};
use crate::projection::{LineProjection, ProjectedLine};
use crate::selection::{self, ClickKind, ClickTracker};
use crate::syntax::Tokenizer;
use crate::view::HostView;

/// One editable document and the view it reports to
pub struct Editor<V: HostView> {
    id: Uuid,
    config: EditorConfig,
    buffer: TextBuffer,
    cursor: Cursor,
    active: CaretCache,
    anchor: CaretCache,
    mapper: OffsetMapper,
    metrics: Metrics,
    tokenizer: Tokenizer,
    history: UndoEngine,
    projection: LineProjection,
    clicks: ClickTracker,
    dragging: bool,
    /// Visual column kept across consecutive vertical moves
    preferred_column: Option<usize>,
    /// First line touched since the last refresh
    dirty_line: Option<usize>,
    view: V,
}

impl<V: HostView> Editor<V> {
    /// Create an empty editor; the view immediately receives line 0
    pub fn new(config: EditorConfig, tokenizer: Tokenizer, view: V) -> Self {
        let mut editor = Self {
            id: Uuid::new_v4(),
            mapper: OffsetMapper::new(config.tab_width),
            metrics: Metrics::from_config(&config),
            history: UndoEngine::new(config.max_undo_history),
            clicks: ClickTracker::new(Duration::from_millis(config.double_click_ms)),
            config,
            buffer: TextBuffer::new(),
            cursor: Cursor::default(),
            active: CaretCache::new(),
            anchor: CaretCache::new(),
            tokenizer,
            projection: LineProjection::new(),
            dragging: false,
            preferred_column: None,
            dirty_line: Some(0),
            view,
        };
        debug!("Created editor {}", editor.id);
        editor.refresh();
        editor
    }

    /// Default configuration and tokenizer
    pub fn with_view(view: V) -> Self {
        let config = EditorConfig::default();
        let tokenizer = Tokenizer::new(config.tab_width);
        Self::new(config, tokenizer, view)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn history(&self) -> &UndoEngine {
        &self.history
    }

    /// Lines as last reported to the view
    pub fn lines(&self) -> &[ProjectedLine] {
        self.projection.lines()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Get the full text content
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Selected text, `None` when the selection is empty
    pub fn selected_text(&self) -> Option<String> {
        if self.cursor.is_collapsed() {
            None
        } else {
            Some(self.buffer.slice(self.cursor.min()..self.cursor.max()))
        }
    }

    /// Grid cell of one of the carets
    pub fn caret_coord(&mut self, caret: CaretKind) -> CaretCoord {
        match caret {
            CaretKind::Active => self.active.locate(&self.mapper, &self.buffer, self.cursor.start),
            CaretKind::Anchor => self.anchor.locate(&self.mapper, &self.buffer, self.cursor.end),
        }
    }

    /// Commit any in-flight typing and hand the document to the script runner
    pub fn take_script(&mut self) -> String {
        self.history.commit();
        self.buffer.text()
    }

    // --- editing ---

    /// Typed or host-inserted text; a single ordinary char joins the typing run
    pub fn insert_text(&mut self, text: &str) {
        let text = normalize_newlines(text);
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {}
            (Some(ch), None) if ch != '\n' && ch != '\t' => self.type_char(ch),
            _ => self.replace_selection(&text),
        }
        self.refresh();
    }

    pub fn insert_newline(&mut self) {
        self.replace_selection("\n");
        self.refresh();
    }

    pub fn insert_tab(&mut self) {
        self.replace_selection("\t");
        self.refresh();
    }

    /// Backspace; with `word` the whole run left of the caret goes
    pub fn delete_backward(&mut self, word: bool) {
        let before = self.cursor;
        let caret = before.start;

        if !before.is_collapsed() {
            self.replace_selection("");
        } else if caret > 0 && word {
            let start = selection::word_start(&self.buffer, caret);
            self.replace_range(start, caret, "", before);
        } else if let Some(removed) = caret.checked_sub(1).and_then(|at| self.buffer.char_at(at)) {
            self.history.record_backspace(caret - 1, removed, before);
            self.splice(caret - 1, 1, "");
            self.cursor.collapse_to(caret - 1);
            self.preferred_column = None;
        }
        self.refresh();
    }

    pub fn delete_selection(&mut self) {
        self.replace_selection("");
        self.refresh();
    }

    /// Paste is always its own undo step
    pub fn paste(&mut self, text: &str) {
        let text = normalize_newlines(text);
        self.replace_selection(&text);
        self.refresh();
    }

    pub fn copy(&self) -> Option<String> {
        self.selected_text()
    }

    pub fn cut(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.replace_selection("");
        self.refresh();
        Some(text)
    }

    /// Replace the whole document; history and caret start over
    pub fn set_text(&mut self, text: &str) {
        let text = normalize_newlines(text);
        self.history.clear();
        self.mark_dirty(0);
        self.active.reset();
        self.anchor.reset();
        self.buffer.set_text(&text);
        self.cursor = Cursor::default();
        self.clicks.reset();
        self.dragging = false;
        self.preferred_column = None;
        debug!("Editor {} replaced document ({} chars)", self.id, self.buffer.len_chars());
        self.refresh();
    }

    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.buffer);
        self.apply_history(applied)
    }

    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.buffer);
        self.apply_history(applied)
    }

    fn apply_history(&mut self, applied: Option<AppliedEdit>) -> bool {
        let changed = applied.is_some();
        if let Some(applied) = applied {
            self.touch(applied.location);
            self.cursor = applied.cursor.clamped(self.buffer.len_chars());
        }
        self.preferred_column = None;
        self.refresh();
        changed
    }

    // --- navigation ---

    /// Arrow-key travel; `extend` keeps the anchor, `word` jumps whole runs
    pub fn move_caret(&mut self, direction: Direction, extend: bool, word: bool) {
        self.history.commit();
        let caret = self.cursor.start;

        let target = match direction {
            Direction::Left if word => selection::word_start(&self.buffer, caret),
            Direction::Left => caret.saturating_sub(1),
            Direction::Right if word => selection::word_end(&self.buffer, caret),
            Direction::Right => (caret + 1).min(self.buffer.len_chars()),
            Direction::Up | Direction::Down => {
                let column = match self.preferred_column {
                    Some(column) => column,
                    None => self.active.locate(&self.mapper, &self.buffer, caret).x,
                };
                self.preferred_column = Some(column);
                if direction == Direction::Up {
                    self.mapper.offset_above(&self.buffer, caret, column)
                } else {
                    self.mapper.offset_below(&self.buffer, caret, column)
                }
            }
        };
        if matches!(direction, Direction::Left | Direction::Right) {
            self.preferred_column = None;
        }

        self.cursor.move_to(target, extend);
        self.refresh();
    }

    pub fn select_all(&mut self) {
        self.history.commit();
        self.cursor = Cursor::new(0, self.buffer.len_chars());
        self.preferred_column = None;
        self.refresh();
    }

    // --- pointer ---

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer_down_at(x, y, Instant::now());
    }

    /// Press at pixel `(x, y)` at a given time; a quick second press on the same spot selects a word
    pub fn pointer_down_at(&mut self, x: f32, y: f32, now: Instant) {
        self.history.commit();
        self.preferred_column = None;

        let landed = self.hit_test(x, y);
        match self.clicks.press(now, self.cursor.start, landed) {
            ClickKind::Double => {
                let (start, end) = selection::word_around(&self.buffer, landed);
                debug!("Double click at {} selects {}..{}", landed, start, end);
                self.cursor = Cursor::new(end, start);
                self.dragging = false;
            }
            ClickKind::Single => {
                self.cursor.collapse_to(landed);
                self.dragging = true;
            }
        }
        self.refresh();
    }

    /// Extends the selection while a press is held
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let offset = self.hit_test(x, y);
        if offset != self.cursor.start {
            self.cursor.move_to(offset, true);
            self.refresh();
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn hit_test(&self, x: f32, y: f32) -> usize {
        let (column, row) = self.metrics.from_pixel(x, y);
        self.mapper.point_to_offset(&self.buffer, column, row)
    }

    // --- files ---

    /// Replace the document with a file's contents
    pub async fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        info!("Loaded script {}", path.display());
        self.set_text(&content);
        Ok(())
    }

    /// Write the document to `path`, adding the script extension when missing
    pub async fn save(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.script_path(path.as_ref())?;
        let text = self.take_script();
        tokio::fs::write(&path, text.as_bytes()).await?;
        info!("Saved script {}", path.display());
        Ok(path)
    }

    fn script_path(&self, path: &Path) -> Result<PathBuf> {
        let expected = self.config.script_extension.as_str();
        match path.extension() {
            None => Ok(path.with_extension(expected)),
            Some(ext) if ext.eq_ignore_ascii_case(expected) => Ok(path.to_path_buf()),
            Some(found) => Err(ScriptpadError::InvalidExtension {
                expected: expected.to_string(),
                found: found.to_string_lossy().into_owned(),
            }),
        }
    }

    // --- internals ---

    fn type_char(&mut self, ch: char) {
        let before = self.cursor;
        let (min, max) = (before.min(), before.max());
        let replaced = self.buffer.slice(min..max);

        self.history.record_insert_char(min, &replaced, ch, before);
        let mut utf8 = [0u8; 4];
        self.splice(min, max - min, ch.encode_utf8(&mut utf8));
        self.cursor.collapse_to(min + 1);
        self.preferred_column = None;
    }

    fn replace_selection(&mut self, text: &str) {
        let before = self.cursor;
        self.replace_range(before.min(), before.max(), text, before);
    }

    /// Swap `[min, max)` for `text` as one undo step
    fn replace_range(&mut self, min: usize, max: usize, text: &str, before: Cursor) {
        if min == max && text.is_empty() {
            return;
        }
        let old = self.buffer.slice(min..max);
        self.history.record(UndoRecord::new(min, old, text, before));
        self.splice(min, max - min, text);
        self.cursor.collapse_to(min + text.chars().count());
        self.preferred_column = None;
    }

    fn splice(&mut self, location: usize, remove_len: usize, text: &str) {
        self.touch(location);
        self.buffer.replace(location, remove_len, text);
    }

    /// The text from `location` on is about to change (or just did)
    fn touch(&mut self, location: usize) {
        self.mark_dirty(location);
        self.active.invalidate_from(location);
        self.anchor.invalidate_from(location);
    }

    fn mark_dirty(&mut self, offset: usize) {
        let line = self.buffer.char_to_line(offset);
        self.dirty_line = Some(self.dirty_line.map_or(line, |dirty| dirty.min(line)));
    }

    /// Push the current state to the view
    fn refresh(&mut self) {
        let from = self.dirty_line.take().unwrap_or(self.projection.len());
        self.projection
            .reconcile(&self.buffer, &self.tokenizer, &mut self.view, from);

        let cursor = self.cursor;
        let active = self.active.locate(&self.mapper, &self.buffer, cursor.start);
        let anchor = self.anchor.locate(&self.mapper, &self.buffer, cursor.end);

        let (x, y) = self.metrics.to_pixel(active);
        self.view.on_caret_moved(CaretKind::Active, x, y);
        let (x, y) = self.metrics.to_pixel(anchor);
        self.view.on_caret_moved(CaretKind::Anchor, x, y);

        let min_coord = if cursor.start <= cursor.end { active } else { anchor };
        let rects = self.mapper.selection_rects(
            &self.buffer,
            cursor.min(),
            cursor.max(),
            min_coord,
            &self.metrics,
        );
        self.view.on_selection_rects_changed(&rects);
        self.view.on_scroll_hint(cursor.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{EventBus, NullView, ViewEvent};
    use std::sync::Arc;

    fn editor(text: &str) -> Editor<NullView> {
        let mut editor = Editor::with_view(NullView);
        editor.set_text(text);
        editor
    }

    fn type_str<V: HostView>(editor: &mut Editor<V>, text: &str) {
        for ch in text.chars() {
            editor.insert_text(&ch.to_string());
        }
    }

    fn place<V: HostView>(editor: &mut Editor<V>, offset: usize) {
        for _ in 0..offset {
            editor.move_caret(Direction::Right, false, false);
        }
    }

    /// Pixel inside the cell of `(column, row)` with default metrics
    fn pixel(column: usize, row: usize) -> (f32, f32) {
        (42.0 + column as f32 * 8.0 + 1.0, row as f32 * 16.0 + 4.0)
    }

    #[test]
    fn test_typing_moves_caret() {
        let mut editor = editor("");
        type_str(&mut editor, "local x");
        assert_eq!(editor.text(), "local x");
        assert_eq!(editor.cursor(), Cursor::at(7));
        assert_eq!(editor.caret_coord(CaretKind::Active), CaretCoord::new(7, 0));
    }

    #[test]
    fn test_undo_roundtrip_restores_text_and_cursor() {
        let mut editor = editor("local x = 1");
        editor.insert_tab();
        editor.paste("foo");
        editor.insert_newline();
        editor.delete_backward(true);
        assert_eq!(editor.text(), "\tfoolocal x = 1");

        for _ in 0..4 {
            assert!(editor.undo());
        }
        assert_eq!(editor.text(), "local x = 1");
        assert_eq!(editor.cursor(), Cursor::at(0));
        assert!(!editor.undo());
    }

    #[test]
    fn test_redo_restores_post_edit_state() {
        let mut editor = editor("x = 1");
        place(&mut editor, 5);
        editor.paste("\nprint(x)");
        let (text, cursor) = (editor.text(), editor.cursor());

        editor.undo();
        assert_eq!(editor.text(), "x = 1");
        assert!(editor.redo());
        assert_eq!(editor.text(), text);
        assert_eq!(editor.cursor(), cursor);
        assert!(!editor.redo());
    }

    #[test]
    fn test_type_backspace_type_coalesces_into_two_steps() {
        let mut editor = editor("");
        type_str(&mut editor, "abc");
        editor.delete_backward(false);
        type_str(&mut editor, "d");
        assert_eq!(editor.take_script(), "abd");
        assert_eq!(editor.history().undo_depth(), 2);

        editor.undo();
        assert_eq!(editor.text(), "abc");
        editor.undo();
        assert_eq!(editor.text(), "");
        assert_eq!(editor.cursor(), Cursor::at(0));
    }

    #[test]
    fn test_select_all_delete_undo() {
        let mut editor = editor("hello\nworld");
        editor.select_all();
        assert_eq!(editor.selected_text().as_deref(), Some("hello\nworld"));

        editor.delete_selection();
        assert_eq!(editor.text(), "");
        assert_eq!(editor.lines().len(), 1);

        editor.undo();
        assert_eq!(editor.text(), "hello\nworld");
        assert_eq!(editor.cursor(), Cursor::new(0, 11));
        assert_eq!(editor.lines().len(), 2);
    }

    #[test]
    fn test_typing_over_selection_replaces_it() {
        let mut editor = editor("local a = 1");
        place(&mut editor, 6);
        editor.move_caret(Direction::Right, true, false);
        type_str(&mut editor, "bc");
        assert_eq!(editor.text(), "local bc = 1");

        editor.undo();
        assert_eq!(editor.text(), "local a = 1");
        assert_eq!(editor.cursor(), Cursor::new(7, 6));
    }

    #[test]
    fn test_word_backspace_and_navigation() {
        let mut editor = editor("local count = 10");
        editor.move_caret(Direction::Right, false, true);
        assert_eq!(editor.cursor(), Cursor::at(5));
        editor.move_caret(Direction::Right, true, true);
        assert_eq!(editor.cursor(), Cursor::new(6, 5));

        place(&mut editor, 6);
        assert_eq!(editor.cursor(), Cursor::at(12));
        editor.move_caret(Direction::Left, false, true);
        assert_eq!(editor.cursor(), Cursor::at(6));

        editor.move_caret(Direction::Right, false, true);
        editor.delete_backward(true);
        assert_eq!(editor.text(), "local  = 10");
        assert_eq!(editor.cursor(), Cursor::at(6));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = editor("abc");
        editor.delete_backward(false);
        editor.delete_backward(true);
        assert_eq!(editor.text(), "abc");
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_vertical_moves_keep_preferred_column() {
        let mut editor = editor("abcdef\nab\nabcdef");
        place(&mut editor, 5);

        editor.move_caret(Direction::Down, false, false);
        assert_eq!(editor.cursor(), Cursor::at(9));
        editor.move_caret(Direction::Down, false, false);
        assert_eq!(editor.cursor(), Cursor::at(15));
        editor.move_caret(Direction::Up, true, false);
        assert_eq!(editor.cursor(), Cursor::new(9, 15));
        editor.move_caret(Direction::Up, false, false);
        assert_eq!(editor.cursor(), Cursor::at(5));
    }

    #[test]
    fn test_double_click_selects_word() {
        let mut editor = editor("print(name)");
        let (x, y) = pixel(8, 0);
        let t0 = Instant::now();

        editor.pointer_down_at(x, y, t0);
        editor.pointer_up();
        assert_eq!(editor.cursor(), Cursor::at(8));

        editor.pointer_down_at(x, y, t0 + Duration::from_millis(120));
        assert_eq!(editor.cursor(), Cursor::new(10, 6));
        assert_eq!(editor.selected_text().as_deref(), Some("name"));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_double_click_at_document_start() {
        let mut editor = editor("print(1)");
        let (x, y) = pixel(0, 0);
        let t0 = Instant::now();
        editor.pointer_down_at(x - 4.0, y, t0);
        editor.pointer_down_at(x - 4.0, y, t0 + Duration::from_millis(50));
        assert_eq!(editor.cursor(), Cursor::new(5, 0));
    }

    #[test]
    fn test_drag_selects_until_release() {
        let mut editor = editor("first\nsecond");
        let (x, y) = pixel(1, 0);
        editor.pointer_down(x, y);
        assert!(editor.is_dragging());

        let (x, y) = pixel(3, 1);
        editor.pointer_move(x, y);
        assert_eq!(editor.cursor(), Cursor::new(9, 1));

        editor.pointer_up();
        let (x, y) = pixel(0, 0);
        editor.pointer_move(x, y);
        assert_eq!(editor.cursor(), Cursor::new(9, 1));
        assert_eq!(editor.text(), "first\nsecond");
    }

    #[test]
    fn test_click_past_end_of_line_lands_on_newline() {
        let mut editor = editor("ab\ncdef");
        let (x, y) = pixel(30, 0);
        editor.pointer_down(x, y);
        assert_eq!(editor.cursor(), Cursor::at(2));
        let (x, y) = pixel(1, 9);
        editor.pointer_down(x, y);
        assert_eq!(editor.cursor(), Cursor::at(7));
    }

    #[test]
    fn test_clipboard_operations() {
        let mut editor = editor("alpha beta");
        assert_eq!(editor.copy(), None);
        assert_eq!(editor.cut(), None);

        editor.move_caret(Direction::Right, true, true);
        assert_eq!(editor.copy().as_deref(), Some("alpha"));
        assert_eq!(editor.cut().as_deref(), Some("alpha"));
        assert_eq!(editor.text(), " beta");

        editor.move_caret(Direction::Right, false, true);
        editor.paste("gamma\r\n");
        assert_eq!(editor.text(), " gamma\nbeta");
        assert_eq!(editor.cursor(), Cursor::at(7));
    }

    #[test]
    fn test_set_text_normalizes_and_resets() {
        let mut editor = editor("old");
        type_str(&mut editor, "x");
        editor.set_text("a\r\nb\r\n");
        assert_eq!(editor.text(), "a\nb\n");
        assert_eq!(editor.cursor(), Cursor::at(0));
        assert!(!editor.history().can_undo());
        assert_eq!(editor.lines().len(), 3);
    }

    #[test]
    fn test_take_script_commits_pending_typing() {
        let mut editor = editor("");
        type_str(&mut editor, "ab");
        assert!(editor.history().has_pending());
        assert_eq!(editor.take_script(), "ab");
        assert!(!editor.history().has_pending());
        assert_eq!(editor.history().undo_depth(), 1);
    }

    #[test]
    fn test_editors_are_independent() {
        let mut first = editor("one");
        let second = editor("two");
        assert_ne!(first.id(), second.id());

        type_str(&mut first, "!");
        assert_eq!(first.text(), "!one");
        assert_eq!(second.text(), "two");
    }

    #[test]
    fn test_view_receives_lines_carets_and_scroll() {
        let bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();
        let mut editor = Editor::with_view(Arc::clone(&bus));
        sub.drain();

        editor.insert_text("a");
        let events = sub.drain();
        assert_eq!(
            events,
            vec![
                ViewEvent::LineChanged {
                    index: 0,
                    text: "a".into(),
                    spans: editor.lines()[0].spans.clone(),
                    entry_in_comment: false,
                },
                ViewEvent::CaretMoved {
                    caret: CaretKind::Active,
                    x: 50.0,
                    y: 0.0
                },
                ViewEvent::CaretMoved {
                    caret: CaretKind::Anchor,
                    x: 50.0,
                    y: 0.0
                },
                ViewEvent::SelectionRectsChanged { rects: vec![] },
                ViewEvent::ScrollHint { offset: 1 },
            ]
        );
    }

    #[test]
    fn test_newline_inserts_host_line() {
        let bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();
        let mut editor = Editor::with_view(Arc::clone(&bus));
        editor.set_text("ab");
        sub.drain();

        place(&mut editor, 1);
        sub.drain();
        editor.insert_newline();
        let events = sub.drain();
        assert!(events.contains(&ViewEvent::LineInserted { index: 1 }));
        assert!(matches!(&events[0], ViewEvent::LineChanged { index: 0, text, .. } if text == "a"));
    }

    #[test]
    fn test_selection_rects_reported() {
        let bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();
        let mut editor = Editor::with_view(Arc::clone(&bus));
        editor.set_text("ab\ncd");
        editor.select_all();

        let rects = sub
            .drain()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::SelectionRectsChanged { rects } => Some(rects),
                _ => None,
            })
            .last()
            .unwrap();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].left, 42.0);
        assert_eq!(rects[0].width, 16.0);
        assert_eq!(rects[1].top, 16.0);
    }

    #[tokio::test]
    async fn test_save_adds_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor("print(1)\n");
        type_str(&mut editor, "--");

        let saved = editor.save(dir.path().join("script")).await.unwrap();
        assert_eq!(saved, dir.path().join("script.lua"));
        let content = tokio::fs::read_to_string(&saved).await.unwrap();
        assert_eq!(content, "--print(1)\n");
        assert!(!editor.history().has_pending());
    }

    #[tokio::test]
    async fn test_save_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor("x = 1");

        let err = editor.save(dir.path().join("notes.txt")).await.unwrap_err();
        assert!(matches!(err, ScriptpadError::InvalidExtension { ref found, .. } if found == "txt"));
        assert!(editor.save(dir.path().join("main.lua")).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.lua");
        tokio::fs::write(&path, "--[[ header\n]]\r\nlocal t = {}\r\n").await.unwrap();

        let mut editor = editor("stale");
        type_str(&mut editor, "x");
        editor.load(&path).await.unwrap();

        assert_eq!(editor.text(), "--[[ header\n]]\nlocal t = {}\n");
        assert_eq!(editor.cursor(), Cursor::at(0));
        assert!(!editor.history().can_undo());
        assert!(editor.lines()[1].entry_in_comment);
        assert!(!editor.lines()[2].entry_in_comment);

        assert!(editor.load(dir.path().join("missing.lua")).await.is_err());
    }
}
