//! Syntax Highlighting
//!
//! A per-line Lua lexer. Each line is scanned once, left to right, with
//! an explicit [`LexMode`]; the only state carried between lines is
//! whether the line starts inside a `--[[ ... ]]` block comment.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use scriptpad_core::SyntaxPalette;

/// Highlight class of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Delimiter,
    Number,
    String,
    Comment,
}

impl TokenKind {
    /// Rendered bold
    pub fn is_emphasized(&self) -> bool {
        matches!(self, TokenKind::Keyword | TokenKind::Delimiter)
    }

    /// Palette color for this class
    pub fn color<'a>(&self, palette: &'a SyntaxPalette) -> &'a str {
        match self {
            TokenKind::Identifier => palette.identifier.as_str(),
            TokenKind::Keyword => palette.keyword.as_str(),
            TokenKind::Delimiter => palette.delimiter.as_str(),
            TokenKind::Number => palette.number.as_str(),
            TokenKind::String => palette.string.as_str(),
            TokenKind::Comment => palette.comment.as_str(),
        }
    }
}

/// A classified run of text within one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub kind: TokenKind,
    pub text: String,
    /// Char index of the first char within the line
    pub start: usize,
    /// Tab-expanded column of the first char
    pub column: usize,
}

/// Result of lexing one line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineTokens {
    pub spans: Vec<StyledSpan>,
    /// The line ends inside an unclosed block comment
    pub exit_in_comment: bool,
}

/// Operators and delimiters, matched longest first
const LUA_DELIMITERS: &[&str] = &[
    "...", "..", "::", "//", "<<", ">>", ">=", "<=", "==", "~=", ".", ",", ";", ":", "[", "]",
    "{", "}", "(", ")", "%", "-", "+", "/", "*", "^", "#", "&", "|", "~", ">", "<", "=",
];

const LUA_KEYWORDS: &[&str] = &[
    // reserved words
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
    // globals and libraries highlighted like keywords
    "self", "print", "assert", "tostring", "tonumber", "onupdate", "_G", "_VERSION",
    "collectgarbage", "error", "getmetatable", "ipairs", "next", "pairs", "pcall", "rawequal",
    "rawget", "rawlen", "rawset", "require", "select", "setmetatable", "time", "type", "utf8",
    "warn", "xpcall", "math", "string", "table", "os", "io", "user", "canvas", "coroutine",
    "debug", "package",
];

const BLOCK_COMMENT_OPEN: &str = "--[[";
const BLOCK_COMMENT_CLOSE: &str = "]]";
const LINE_COMMENT_OPEN: &str = "--";

/// Lexer mode within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexMode {
    Code,
    Number,
    Str(char),
    LineComment,
    BlockComment,
}

/// Stateless-per-document Lua tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    tab_width: usize,
    keywords: HashSet<&'static str>,
}

impl Tokenizer {
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
            keywords: LUA_KEYWORDS.iter().copied().collect(),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Lex one line; `in_comment` is whether it starts inside a block comment
    pub fn tokenize_line(&self, text: &str, in_comment: bool) -> LineTokens {
        let chars: Vec<char> = text.chars().collect();
        let mut lexer = LineLexer::new(self, &chars, in_comment);
        lexer.run();
        lexer.finish()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(4)
    }
}

/// In-pass state for a single line
struct LineLexer<'a> {
    tokenizer: &'a Tokenizer,
    chars: &'a [char],
    pos: usize,
    column: usize,
    mode: LexMode,
    pending: String,
    pending_start: usize,
    pending_column: usize,
    spans: Vec<StyledSpan>,
    exit_in_comment: bool,
}

impl<'a> LineLexer<'a> {
    fn new(tokenizer: &'a Tokenizer, chars: &'a [char], in_comment: bool) -> Self {
        Self {
            tokenizer,
            chars,
            pos: 0,
            column: 0,
            mode: if in_comment {
                LexMode::BlockComment
            } else {
                LexMode::Code
            },
            pending: String::new(),
            pending_start: 0,
            pending_column: 0,
            spans: Vec::new(),
            exit_in_comment: false,
        }
    }

    fn run(&mut self) {
        while self.pos < self.chars.len() {
            match self.mode {
                LexMode::BlockComment => self.step_block_comment(),
                LexMode::Str(delim) => self.step_string(delim),
                LexMode::LineComment => self.step_line_comment(),
                LexMode::Code | LexMode::Number => self.step_code(),
            }
        }

        // virtual trailing position
        self.exit_in_comment = self.mode == LexMode::BlockComment;
        self.flush();
    }

    fn finish(self) -> LineTokens {
        LineTokens {
            spans: self.spans,
            exit_in_comment: self.exit_in_comment,
        }
    }

    fn step_block_comment(&mut self) {
        self.take();
        if self.pending.ends_with(BLOCK_COMMENT_CLOSE) {
            self.flush();
        }
    }

    fn step_string(&mut self, delim: char) {
        let escaped = self.pos > 0 && self.chars[self.pos - 1] == '\\';
        let ch = self.take();
        if ch == delim && !escaped {
            self.flush();
        }
    }

    fn step_line_comment(&mut self) {
        while self.pos < self.chars.len() {
            self.take();
        }
    }

    fn step_code(&mut self) {
        let ch = self.chars[self.pos];

        if self.starts_with(BLOCK_COMMENT_OPEN) {
            self.flush();
            self.mode = LexMode::BlockComment;
            self.take_n(BLOCK_COMMENT_OPEN.len());
        } else if self.starts_with(LINE_COMMENT_OPEN) {
            self.flush();
            self.mode = LexMode::LineComment;
            self.take_n(LINE_COMMENT_OPEN.len());
        } else if ch == '"' || ch == '\'' {
            self.flush();
            self.mode = LexMode::Str(ch);
            self.take();
        } else if (self.mode == LexMode::Number && ch == '.')
            || (self.pending.is_empty() && ch.is_ascii_digit())
        {
            self.mode = LexMode::Number;
            self.take();
        } else if let Some(op) = self.match_delimiter() {
            self.flush();
            let (start, column) = (self.pos, self.column);
            self.advance(op.len());
            self.spans.push(StyledSpan {
                kind: TokenKind::Delimiter,
                text: op.to_string(),
                start,
                column,
            });
        } else if ch.is_whitespace() {
            self.flush();
            self.advance(1);
        } else {
            self.take();
        }
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let rest = &self.chars[self.pos..];
        pattern.chars().count() <= rest.len() && pattern.chars().zip(rest).all(|(p, &c)| p == c)
    }

    fn match_delimiter(&self) -> Option<&'static str> {
        LUA_DELIMITERS
            .iter()
            .copied()
            .filter(|op| self.starts_with(op))
            .max_by_key(|op| op.len())
    }

    /// Move the current char into the pending buffer
    fn take(&mut self) -> char {
        let ch = self.chars[self.pos];
        if self.pending.is_empty() {
            self.pending_start = self.pos;
            self.pending_column = self.column;
        }
        self.pending.push(ch);
        self.advance(1);
        ch
    }

    fn take_n(&mut self, count: usize) {
        for _ in 0..count {
            self.take();
        }
    }

    /// Skip chars without buffering them
    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            let ch = self.chars[self.pos];
            self.column += if ch == '\t' { self.tokenizer.tab_width } else { 1 };
            self.pos += 1;
        }
    }

    /// Emit the pending buffer as one span and return to code mode
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            let kind = match self.mode {
                LexMode::BlockComment | LexMode::LineComment => TokenKind::Comment,
                LexMode::Str(_) => TokenKind::String,
                LexMode::Number => TokenKind::Number,
                LexMode::Code if self.tokenizer.is_keyword(&text) => TokenKind::Keyword,
                LexMode::Code => TokenKind::Identifier,
            };
            self.spans.push(StyledSpan {
                kind,
                text,
                start: self.pending_start,
                column: self.pending_column,
            });
        }
        self.mode = LexMode::Code;
    }
}
