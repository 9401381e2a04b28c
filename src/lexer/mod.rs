//! Lexer module - Tokenization
//!
//! Matches the remaining input against the ordered pattern table in
//! `patterns.pest` and synthesizes `INDENT`/`DEDENT` tokens from leading
//! whitespace. Never fails: unmatched characters become `ERROR` tokens.

mod token;

pub use token::*;

use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "lexer/patterns.pest"]
struct PatternTable;

/// Tokenize a whole program, with indentation tracking
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source, 1, true).run()
}

/// Tokenize the text of an interpolation placeholder (no block structure)
pub fn tokenize_expression(source: &str) -> Vec<Token> {
    tokenize_expression_at(source, 1)
}

pub(crate) fn tokenize_expression_at(source: &str, line: usize) -> Vec<Token> {
    Lexer::new(source, line, false).run()
}

/// Result of matching one pattern at the head of the input
struct Matched<'a> {
    kind: TokenKind,
    text: &'a str,
    len: usize,
}

fn match_pattern(input: &str) -> Option<Matched<'_>> {
    let token = PatternTable::parse(Rule::token, input).ok()?.next()?;
    let len = token.as_str().len();
    let inner = token.into_inner().next()?;

    let matched = match inner.as_rule() {
        Rule::string => {
            let mut is_fstring = false;
            let mut body = "";
            for part in inner.into_inner() {
                match part.as_rule() {
                    Rule::prefix => is_fstring = true,
                    Rule::dq_body | Rule::sq_body => body = part.as_str(),
                    _ => {}
                }
            }
            let kind = if is_fstring {
                TokenKind::FString
            } else {
                TokenKind::String
            };
            Matched { kind, text: body, len }
        }
        rule => {
            let kind = match rule {
                Rule::comment => TokenKind::Comment,
                Rule::keyword => TokenKind::Keyword,
                Rule::identifier => TokenKind::Identifier,
                Rule::number => TokenKind::Number,
                Rule::operator => TokenKind::Operator,
                Rule::delimiter => TokenKind::Delimiter,
                Rule::dot => TokenKind::Dot,
                Rule::newline => TokenKind::Newline,
                Rule::whitespace => TokenKind::Whitespace,
                _ => return None,
            };
            Matched {
                kind,
                text: inner.as_str(),
                len,
            }
        }
    };
    Some(matched)
}

struct Lexer<'a> {
    rest: &'a str,
    line: usize,
    track_indent: bool,
    indent_stack: Vec<usize>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, line: usize, track_indent: bool) -> Self {
        Self {
            rest: source,
            line,
            track_indent,
            indent_stack: vec![0],
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.rest.chars().next() {
            match match_pattern(self.rest) {
                Some(m) => {
                    self.rest = &self.rest[m.len..];
                    self.accept(m.kind, m.text);
                }
                None => {
                    self.tokens
                        .push(Token::new(TokenKind::Error, c.to_string(), self.line));
                    self.rest = &self.rest[c.len_utf8()..];
                }
            }
        }

        if self.track_indent {
            while self.indent_stack.len() > 1 {
                if let Some(level) = self.indent_stack.pop() {
                    self.tokens
                        .push(Token::new(TokenKind::Dedent, level.to_string(), self.line));
                }
            }
        }
        self.tokens
    }

    fn accept(&mut self, kind: TokenKind, text: &str) {
        match kind {
            TokenKind::Comment | TokenKind::Whitespace => {}
            TokenKind::Newline => {
                if self.track_indent {
                    self.tokens
                        .push(Token::new(TokenKind::Newline, "\n", self.line));
                }
                self.line += 1;
                if self.track_indent {
                    self.measure_indent();
                }
            }
            _ => self.tokens.push(Token::new(kind, text, self.line)),
        }
    }

    /// Compare the next line's leading whitespace against the indent stack.
    /// Blank and comment-only lines leave the stack untouched.
    fn measure_indent(&mut self) {
        let indent_len = self
            .rest
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(self.rest.len());
        let (indent, after) = self.rest.split_at(indent_len);
        self.rest = after;

        if after.is_empty() || after.starts_with(['\n', '\r', '#']) {
            return;
        }

        let column = indent.chars().count();
        let top = self.indent_stack.last().copied().unwrap_or(0);
        if column > top {
            self.indent_stack.push(column);
            self.tokens
                .push(Token::new(TokenKind::Indent, column.to_string(), self.line));
        } else if column < top {
            while self.indent_stack.len() > 1 {
                match self.indent_stack.last() {
                    Some(&level) if level > column => {
                        self.indent_stack.pop();
                        self.tokens
                            .push(Token::new(TokenKind::Dedent, level.to_string(), self.line));
                    }
                    _ => break,
                }
            }
        }
    }
}
