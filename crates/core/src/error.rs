//! Error types for Scriptpad
//! 
//! Centralized error handling using thiserror. Editing itself never fails;
//! these errors come from file and configuration I/O.

use thiserror::Error;

/// Main error type for Scriptpad
#[derive(Error, Debug)]
pub enum ScriptpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported script extension: expected .{expected}, got .{found}")]
    InvalidExtension { expected: String, found: String },

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for Scriptpad operations
pub type Result<T> = std::result::Result<T, ScriptpadError>;

impl ScriptpadError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScriptpadError::NotFound(_) | ScriptpadError::InvalidExtension { .. }
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ScriptpadError::Io(e) => format!("File operation failed: {}", e),
            ScriptpadError::Config(msg) => format!("Configuration error: {}", msg),
            ScriptpadError::InvalidExtension { expected, .. } => {
                format!("Scripts must be saved as .{} files", expected)
            }
            ScriptpadError::NotFound(msg) => format!("Not found: {}", msg),
            _ => self.to_string(),
        }
    }
}
