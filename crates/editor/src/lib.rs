//! Scriptpad Editor
//!
//! Text-editing engine for Lua scripts:
//! - Rope-backed buffer with char offsets
//! - Tab-aware layout arithmetic and caret caching
//! - Incremental per-line highlighting with block comment carry-over
//! - Coalescing undo/redo

pub mod buffer;
pub mod commands;
pub mod cursor;
pub mod editor;
pub mod history;
pub mod layout;
pub mod projection;
pub mod selection;
pub mod syntax;
pub mod view;

pub use buffer::TextBuffer;
pub use commands::{Command, CommandResult};
pub use cursor::{CaretKind, Cursor, Direction};
pub use editor::Editor;
pub use history::{UndoEngine, UndoRecord};
pub use layout::{CaretCoord, Metrics, OffsetMapper, Rect};
pub use projection::{LineProjection, ProjectedLine, ReconcileStats};
pub use syntax::{StyledSpan, TokenKind, Tokenizer};
pub use view::{EventBus, EventSubscription, HostView, NullView, ViewEvent};
