//! Scriptpad - embeddable Lua source editor engine
//!
//! The engine behind an in-page script editor: it owns the document,
//! carets, highlighting and undo history, and tells a host view what to
//! draw. The host supplies rendering, input events and the script runtime.
//!
//! ## Architecture
//!
//! - `scriptpad-core`: configuration and error types
//! - `scriptpad-editor`: buffer, layout, tokenizer, undo and the [`Editor`](editor::Editor) controller

#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use scriptpad_core as core;
pub use scriptpad_editor as editor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use scriptpad_core::{AppConfig, EditorConfig, Result, ScriptpadError, SyntaxPalette};
    pub use scriptpad_editor::{
        Command, CommandResult, Cursor, Direction, Editor, EventBus, HostView, NullView,
        Tokenizer, ViewEvent,
    };
}
