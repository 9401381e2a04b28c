//! Token definitions

use serde::Serialize;
use std::fmt;

/// Token kinds produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Comment,
    String,
    FString,
    Keyword,
    Identifier,
    Number,
    Operator,
    Delimiter,
    Dot,
    Newline,
    Indent,
    Dedent,
    /// Discarded by the tokenizer, never emitted
    Whitespace,
    /// Unrecognized character, passed through to the parser
    Error,
    /// Synthetic, only returned by out-of-range lookahead
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::String => "STRING",
            TokenKind::FString => "FSTRING",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Dot => "DOT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (kind, text) pair tagged with the line it starts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }

    /// True if the token has this kind and exactly this text
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Eof => write!(f, "EOF"),
            _ => write!(f, "{} '{}'", self.kind, self.text),
        }
    }
}
