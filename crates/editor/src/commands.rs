//! Editor Commands
//!
//! The host's input vocabulary as data, for hosts that forward key and
//! pointer events as messages rather than calling [`Editor`] directly.

use serde::{Deserialize, Serialize};

use crate::cursor::Direction;
use crate::editor::Editor;
use crate::view::HostView;

/// Editor command type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // Edit commands
    InsertText { text: String },
    InsertNewline,
    InsertTab,
    DeleteBackward { word: bool },
    DeleteSelection,

    // Movement and selection
    MoveCaret {
        direction: Direction,
        extend: bool,
        word: bool,
    },
    SelectAll,

    // Pointer
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,

    // Clipboard commands
    Paste { text: String },
    Copy,
    Cut,

    // Undo/Redo
    Undo,
    Redo,

    SetText { text: String },
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    /// Text for the host clipboard after copy or cut
    pub clipboard: Option<String>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            clipboard: None,
        }
    }

    /// The command had nothing to act on
    pub fn noop() -> Self {
        Self {
            success: false,
            clipboard: None,
        }
    }

    fn from_success(success: bool) -> Self {
        if success {
            Self::ok()
        } else {
            Self::noop()
        }
    }

    fn from_clipboard(text: Option<String>) -> Self {
        Self {
            success: text.is_some(),
            clipboard: text,
        }
    }
}

impl<V: HostView> Editor<V> {
    /// Execute a command
    pub fn execute(&mut self, command: Command) -> CommandResult {
        match command {
            Command::InsertText { text } => self.insert_text(&text),
            Command::InsertNewline => self.insert_newline(),
            Command::InsertTab => self.insert_tab(),
            Command::DeleteBackward { word } => self.delete_backward(word),
            Command::DeleteSelection => self.delete_selection(),
            Command::MoveCaret {
                direction,
                extend,
                word,
            } => self.move_caret(direction, extend, word),
            Command::SelectAll => self.select_all(),
            Command::PointerDown { x, y } => self.pointer_down(x, y),
            Command::PointerMove { x, y } => self.pointer_move(x, y),
            Command::PointerUp => self.pointer_up(),
            Command::Paste { text } => self.paste(&text),
            Command::Copy => return CommandResult::from_clipboard(self.copy()),
            Command::Cut => return CommandResult::from_clipboard(self.cut()),
            Command::Undo => return CommandResult::from_success(self.undo()),
            Command::Redo => return CommandResult::from_success(self.redo()),
            Command::SetText { text } => self.set_text(&text),
        }
        CommandResult::ok()
    }
}
