//! Error types for Kuchinawa transpiler

use thiserror::Error;

/// Main error type for Kuchinawa
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("f-string error at line {line}: {message}")]
    FStringError { line: usize, message: String },

    #[error("Division by zero detected at line {line}")]
    DivisionByZero { line: usize },

    #[error("Type error at line {line}: {message}")]
    TypeMismatch { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TranslateError {
    /// Source line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            TranslateError::ParseError { line, .. }
            | TranslateError::FStringError { line, .. }
            | TranslateError::DivisionByZero { line }
            | TranslateError::TypeMismatch { line, .. } => Some(*line),
            TranslateError::IoError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
