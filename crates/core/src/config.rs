//! Application Configuration
//!
//! Manages all editor settings including:
//! - Layout metrics (tab width, line height, gutter)
//! - Input timing (double-click window)
//! - Undo history limits
//! - Syntax highlight palette

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{Result, ScriptpadError};

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Visual width of a tab character, in columns
    pub tab_width: usize,
    /// Maximum delay between two presses counted as a double-click
    pub double_click_ms: u64,
    /// Line height in pixels
    pub line_height: f32,
    /// Width of one monospace cell in pixels
    pub char_width: f32,
    /// Width of the line-number gutter in pixels
    pub gutter_width: f32,
    /// Padding to the right of the line numbers
    pub gutter_padding: f32,
    /// Margin between the gutter and the text
    pub gutter_margin: f32,
    /// Maximum number of undo records kept
    pub max_undo_history: usize,
    /// Extension used when saving scripts
    pub script_extension: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            double_click_ms: 500,
            line_height: 16.0,
            char_width: 8.0,
            gutter_width: 32.0,
            gutter_padding: 5.0,
            gutter_margin: 5.0,
            max_undo_history: 1000,
            script_extension: "lua".to_string(),
        }
    }
}

impl EditorConfig {
    /// Horizontal pixel offset where text starts
    pub fn text_left(&self) -> f32 {
        self.gutter_width + self.gutter_padding + self.gutter_margin
    }
}

/// Colors and emphasis for each highlight class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyntaxPalette {
    pub identifier: String,
    pub delimiter: String,
    pub number: String,
    pub string: String,
    pub comment: String,
    pub keyword: String,
}

impl Default for SyntaxPalette {
    fn default() -> Self {
        Self {
            identifier: "black".to_string(),
            delimiter: "navy".to_string(),
            number: "darkorange".to_string(),
            string: "green".to_string(),
            comment: "gray".to_string(),
            keyword: "blue".to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Editor settings
    pub editor: EditorConfig,
    /// Highlight colors
    pub palette: SyntaxPalette,
    /// Recently opened scripts
    pub recent_files: Vec<PathBuf>,
    /// Maximum recent files to store
    pub max_recent_files: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            editor: EditorConfig::default(),
            palette: SyntaxPalette::default(),
            recent_files: Vec::new(),
            max_recent_files: 10,
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "scriptpad", "Scriptpad")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the platform config file
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| ScriptpadError::Config("Cannot determine config path".into()))?;
        Self::load_from(&config_file).await
    }

    /// Load configuration from a specific file, falling back to defaults
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }

    /// Save configuration to the platform config file
    pub async fn save(&self) -> Result<()> {
        let config_file = Self::config_file()
            .ok_or_else(|| ScriptpadError::Config("Cannot determine config path".into()))?;
        self.save_to(&config_file).await
    }

    /// Save configuration to a specific file
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    /// Reject settings the layout arithmetic cannot work with
    pub fn validate(&self) -> Result<()> {
        let editor = &self.editor;
        if editor.tab_width == 0 {
            return Err(ScriptpadError::Config("tab_width must be at least 1".into()));
        }
        if editor.line_height <= 0.0 || editor.char_width <= 0.0 {
            return Err(ScriptpadError::Config(
                "line_height and char_width must be positive".into(),
            ));
        }
        if editor.script_extension.is_empty() || editor.script_extension.starts_with('.') {
            return Err(ScriptpadError::Config(
                "script_extension must be a bare extension such as \"lua\"".into(),
            ));
        }
        Ok(())
    }

    /// Add a recent file
    pub fn add_recent_file(&mut self, path: PathBuf) {
        // Remove if already exists
        self.recent_files.retain(|p| p != &path);

        // Add to front
        self.recent_files.insert(0, path);

        // Trim to max size
        self.recent_files.truncate(self.max_recent_files);
    }
}
