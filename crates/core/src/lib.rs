//! Scriptpad Core - shared configuration and error types
//! 
//! This crate holds what every other Scriptpad crate agrees on:
//! the application configuration and the error type used at I/O seams.

pub mod config;
pub mod error;

pub use config::{AppConfig, EditorConfig, SyntaxPalette};
pub use error::{Result, ScriptpadError};

/// Scriptpad version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Scriptpad";
