//! Kuchinawa - Python subset to JavaScript Transpiler
//!
//! # Overview
//! Translates a small, indentation-structured Python subset (assignments,
//! functions, classes, conditionals, loops with `else`, f-strings) into
//! JavaScript source text. The pipeline is lexer -> parser -> literal checks
//! -> emitter, each stage a pure function of its input.

pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod unsupported_features;

pub use emitter::{Degradation, EmitOptions, Translation};
pub use error::{Result, TranslateError};

use std::path::Path;
use tracing::{debug, info, info_span, warn};

/// Translate Python source with default rendering options
///
/// Floor division `//` is emitted as plain `/` and is not floored; see
/// [`emitter::generate`].
pub fn translate(source: &str) -> Result<Translation> {
    translate_with_options(source, &EmitOptions::default())
}

/// Translate Python source, reporting any degraded constructs
pub fn translate_with_options(source: &str, options: &EmitOptions) -> Result<Translation> {
    let span = info_span!("translate", bytes = source.len());
    let _guard = span.enter();

    match run_pipeline(source, options) {
        Ok(translation) => {
            info!(
                lines = translation.code.lines().count(),
                degradations = translation.degradations.len(),
                "translation succeeded"
            );
            Ok(translation)
        }
        Err(err) => {
            warn!("{err}");
            Err(err)
        }
    }
}

fn run_pipeline(source: &str, options: &EmitOptions) -> Result<Translation> {
    // 1. Tokenize
    let tokens = lexer::tokenize(source);
    debug!(tokens = tokens.len(), "tokenized");

    // 2. Parse tokens to AST
    let program = parser::parse(&tokens)?;
    debug!(statements = program.statements.len(), "parsed");

    // 3. Literal checks + emit
    let translation = emitter::generate(&program, options)?;
    debug!(degradations = translation.degradations.len(), "generated");

    Ok(translation)
}

/// Transpile Python source code to JavaScript source code
///
/// The translation is lossy for floor division: `a // b` becomes `a / b`.
pub fn transpile(source: &str) -> Result<String> {
    Ok(translate(source)?.code)
}

/// Transpile Python source code, collecting diagnostics instead of stopping
/// at the first error.
///
/// Unsupported constructs and stray characters are all reported before
/// parsing. On success the translation may still carry degradations; use
/// [`diagnostics::from_degradations`] to turn them into warnings.
pub fn transpile_with_diagnostics(
    source: &str,
    file: Option<&Path>,
    options: &EmitOptions,
) -> std::result::Result<Translation, diagnostics::KcnDiagnostics> {
    let span = info_span!("transpile_with_diagnostics");
    let _guard = span.enter();

    let registry = unsupported_features::UnsupportedFeatureRegistry::default();
    let tokens = lexer::tokenize(source);
    let mut diags = diagnostics::scan_unsupported_tokens(&tokens, file, &registry);
    if diags.has_errors() {
        warn!(count = diags.diagnostics.len(), "unsupported syntax found");
        return Err(diags);
    }

    let program = match parser::parse(&tokens) {
        Ok(p) => p,
        Err(err) => {
            warn!("{err}");
            diags.extend(diagnostics::from_error(&err, file));
            return Err(diags);
        }
    };

    match emitter::generate(&program, options) {
        Ok(translation) => {
            info!(
                degradations = translation.degradations.len(),
                "translation succeeded"
            );
            Ok(translation)
        }
        Err(err) => {
            warn!("{err}");
            diags.extend(diagnostics::from_error(&err, file));
            Err(diags)
        }
    }
}

/// Transpile a Python file to a JavaScript file
pub fn transpile_file(input: &Path, output: &Path) -> Result<()> {
    let source = std::fs::read_to_string(input)?;
    let js_code = transpile(&source)?;
    std::fs::write(output, js_code)?;
    Ok(())
}
