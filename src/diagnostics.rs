//! KcnDiagnostics - translation diagnostics collection and output

use serde::Serialize;
use std::path::Path;

use crate::emitter::Degradation;
use crate::error::TranslateError;
use crate::lexer::{Token, TokenKind};
use crate::unsupported_features::UnsupportedFeatureRegistry;

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticSpan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct KcnDiagnostic {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub span: DiagnosticSpan,
    pub phase: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct KcnDiagnostics {
    pub diagnostics: Vec<KcnDiagnostic>,
}

impl KcnDiagnostics {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn add(&mut self, diag: KcnDiagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn extend(&mut self, other: KcnDiagnostics) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            let file = diag.span.file.as_deref().unwrap_or("<input>");
            out.push_str(&format!(
                "[{}] {}:{} {}\n",
                diag.code, file, diag.span.line, diag.message
            ));
        }
        out
    }
}

pub fn span_for_line(file: Option<&Path>, line: usize) -> DiagnosticSpan {
    DiagnosticSpan {
        file: file.map(|p| p.display().to_string()),
        line,
    }
}

pub fn error_diag(code: &str, message: String, span: DiagnosticSpan, phase: &str) -> KcnDiagnostic {
    KcnDiagnostic {
        code: code.to_string(),
        message,
        severity: DiagnosticSeverity::Error,
        span,
        phase: phase.to_string(),
    }
}

pub fn warning_diag(
    code: &str,
    message: String,
    span: DiagnosticSpan,
    phase: &str,
) -> KcnDiagnostic {
    KcnDiagnostic {
        severity: DiagnosticSeverity::Warning,
        ..error_diag(code, message, span, phase)
    }
}

pub fn from_error(err: &TranslateError, file: Option<&Path>) -> KcnDiagnostics {
    let mut diags = KcnDiagnostics::new();
    let (code, message, phase) = match err {
        TranslateError::ParseError { message, .. } => ("KCN-PARSE-ERROR", message.clone(), "parse"),
        TranslateError::FStringError { message, .. } => {
            ("KCN-FSTRING-ERROR", message.clone(), "parse")
        }
        TranslateError::DivisionByZero { .. } => (
            "KCN-DIVISION-BY-ZERO",
            "Division by zero".to_string(),
            "semantic",
        ),
        TranslateError::TypeMismatch { message, .. } => {
            ("KCN-TYPE-MISMATCH", message.clone(), "semantic")
        }
        TranslateError::IoError(_) => ("KCN-IO-ERROR", format!("{err}"), "io"),
    };
    let span = span_for_line(file, err.line().unwrap_or(1));
    diags.add(error_diag(code, message, span, phase));
    diags
}

/// Warnings for every inert marker the emitter left in the output.
/// Degradations carry no position, so they point at line 1.
pub fn from_degradations(degradations: &[Degradation], file: Option<&Path>) -> KcnDiagnostics {
    let mut diags = KcnDiagnostics::new();
    for degradation in degradations {
        diags.add(warning_diag(
            "KCN-UNSUPPORTED-SYNTAX",
            format!(
                "{} left untranslated: {}",
                degradation.node, degradation.detail
            ),
            span_for_line(file, 1),
            "emit",
        ));
    }
    diags
}

/// Report every unsupported construct and stray character before parsing.
///
/// The parser stops at the first problem; this pass reports all of them
/// with a message naming the construct instead of "Unexpected token".
pub fn scan_unsupported_tokens(
    tokens: &[Token],
    file: Option<&Path>,
    registry: &UnsupportedFeatureRegistry,
) -> KcnDiagnostics {
    let mut diags = KcnDiagnostics::new();
    // closing braces of an already reported dict/set literal
    let mut open_braces = 0usize;

    for token in tokens {
        let span = || span_for_line(file, token.line);
        match token.kind {
            TokenKind::Keyword | TokenKind::Identifier => {
                if let Some(feature) = registry.lookup_word(&token.text) {
                    diags.add(error_diag(
                        "KCN-UNSUPPORTED-SYNTAX",
                        format!("Unsupported syntax: {}", feature.message()),
                        span(),
                        "lex",
                    ));
                }
            }
            TokenKind::Error => {
                let Some(c) = token.text.chars().next() else {
                    continue;
                };
                if c == '}' && open_braces > 0 {
                    open_braces -= 1;
                    continue;
                }
                if let Some(feature) = registry.lookup_char(c) {
                    if c == '{' {
                        open_braces += 1;
                    }
                    diags.add(error_diag(
                        "KCN-UNSUPPORTED-SYNTAX",
                        format!("Unsupported syntax: {}", feature.message()),
                        span(),
                        "lex",
                    ));
                } else if c == '"' || c == '\'' {
                    diags.add(error_diag(
                        "KCN-LEX-ERROR",
                        "Unterminated string literal".to_string(),
                        span(),
                        "lex",
                    ));
                } else {
                    diags.add(error_diag(
                        "KCN-LEX-ERROR",
                        format!("Unrecognized character '{}'", token.text),
                        span(),
                        "lex",
                    ));
                }
            }
            _ => {}
        }
    }
    diags
}
