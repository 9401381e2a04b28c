//! f-string splitting into quasis and embedded expressions

use super::utils::unescape;
use super::{Expr, Parser};
use crate::error::{Result, TranslateError};
use crate::lexer::tokenize_expression_at;

fn fstring_error<T>(line: usize, message: &str) -> Result<T> {
    Err(TranslateError::FStringError {
        line,
        message: message.to_string(),
    })
}

/// Split the raw body of an f-string into text segments and expressions.
///
/// `{{` and `}}` are literal braces. A single `{` opens an expression that
/// runs until brace depth returns to zero; its text is tokenized and parsed
/// on its own. The result always has one more quasi than expressions.
pub fn parse_fstring(content: &str, line: usize) -> Result<(Vec<String>, Vec<Expr>)> {
    let chars: Vec<char> = content.chars().collect();
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'{') => {
                current.push('{');
                i += 2;
            }
            '{' => {
                quasis.push(unescape(&current));
                current.clear();
                i += 1;

                let start = i;
                let mut depth = 1;
                while i < chars.len() {
                    match chars[i] {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                if depth != 0 {
                    return fstring_error(line, "Unclosed { in f-string");
                }

                let source: String = chars[start..i].iter().collect();
                expressions.push(parse_embedded(&source, line)?);
                i += 1;
            }
            '}' if chars.get(i + 1) == Some(&'}') => {
                current.push('}');
                i += 2;
            }
            '}' => return fstring_error(line, "Unmatched } in f-string"),
            c => {
                current.push(c);
                i += 1;
            }
        }
    }
    quasis.push(unescape(&current));

    Ok((quasis, expressions))
}

fn parse_embedded(source: &str, line: usize) -> Result<Expr> {
    let tokens = tokenize_expression_at(source, line);
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_expression(0)?;
    if !parser.is_at_end() {
        return fstring_error(
            line,
            &format!("Unexpected trailing input in f-string expression: {source}"),
        );
    }
    Ok(expr)
}
