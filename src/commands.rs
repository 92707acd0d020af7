//! CLI commands for Scriptpad
//!
//! Headless uses of the editor engine: inspect how a script highlights
//! and push files through the editor's load/save path.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use scriptpad_core::AppConfig;
use scriptpad_editor::{Editor, NullView, StyledSpan, Tokenizer};

fn open_editor(config: &AppConfig) -> Editor<NullView> {
    let tokenizer = Tokenizer::new(config.editor.tab_width);
    Editor::new(config.editor.clone(), tokenizer, NullView)
}

/// Print each line's highlight spans
pub struct HighlightCommand {
    pub path: PathBuf,
}

impl HighlightCommand {
    pub async fn execute(&self, config: &AppConfig) -> Result<String> {
        let mut editor = open_editor(config);
        editor.load(&self.path).await?;

        let mut out = String::new();
        for (index, line) in editor.lines().iter().enumerate() {
            write!(out, "{:>4} ", index + 1)?;
            if line.entry_in_comment {
                out.push('+');
            } else {
                out.push(' ');
            }
            for span in &line.spans {
                let weight = if span.kind.is_emphasized() { "*" } else { "" };
                write!(
                    out,
                    " {}{}{}:{:?}",
                    weight,
                    span.kind.color(&config.palette),
                    weight,
                    span.text
                )?;
            }
            out.push('\n');
        }
        Ok(out)
    }
}

#[derive(Debug, Serialize)]
struct LineReport<'a> {
    line: usize,
    entry_in_comment: bool,
    exit_in_comment: bool,
    spans: &'a [StyledSpan],
}

/// Dump each line's spans as JSON
pub struct TokensCommand {
    pub path: PathBuf,
}

impl TokensCommand {
    pub async fn execute(&self, config: &AppConfig) -> Result<String> {
        let mut editor = open_editor(config);
        editor.load(&self.path).await?;

        let report: Vec<LineReport<'_>> = editor
            .lines()
            .iter()
            .enumerate()
            .map(|(line, projected)| LineReport {
                line,
                entry_in_comment: projected.entry_in_comment,
                exit_in_comment: projected.exit_in_comment,
                spans: &projected.spans,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

/// Load a script and save it again, normalizing line endings
pub struct NormalizeCommand {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl NormalizeCommand {
    pub async fn execute(&self, config: &AppConfig) -> Result<PathBuf> {
        let mut editor = open_editor(config);
        editor.load(&self.input).await?;
        let saved = editor.save(&self.output).await?;
        info!("Normalized {:?} -> {:?}", self.input, saved);
        Ok(saved)
    }
}
