//! Parser module - recursive descent with precedence climbing
//!
//! Consumes the token stream from [`crate::lexer`] with a single cursor and
//! one token of lookahead.

mod ast;
mod fstring;
mod utils;

pub use ast::*;
pub use fstring::parse_fstring;

use crate::error::{Result, TranslateError};
use crate::lexer::{tokenize, Token, TokenKind};

/// Parse a token stream into a program
pub fn parse(tokens: &[Token]) -> Result<Program> {
    Parser::new(tokens).parse_program()
}

/// Tokenize and parse source code
pub fn parse_source(source: &str) -> Result<Program> {
    parse(&tokenize(source))
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    eof: Token,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let last_line = tokens.last().map_or(1, |t| t.line);
        Self {
            tokens,
            pos: 0,
            eof: Token::eof(last_line),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_is(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is(kind, text)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token, failing unless it has `kind` (and `text`)
    fn expect(&mut self, kind: TokenKind, text: Option<&str>) -> Result<Token> {
        let token = self.advance();
        let matches = token.kind == kind && text.map_or(true, |t| token.text == t);
        if matches {
            return Ok(token);
        }
        let expected = match text {
            Some(t) => format!("{kind} '{t}'"),
            None => kind.to_string(),
        };
        Err(TranslateError::ParseError {
            line: token.line,
            message: format!("Expected {expected}, but got {token}"),
        })
    }

    fn error<T>(&self, message: String) -> Result<T> {
        Err(TranslateError::ParseError {
            line: self.peek().line,
            message,
        })
    }

    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if self.peek_kind() == TokenKind::Dedent {
                self.advance();
                continue;
            }
            if let Some(stmt) = self.parse_statement()? {
                statements.push(stmt);
            }
        }
        Ok(Program { statements })
    }

    /// Parse one statement; a bare NEWLINE yields `None`
    pub fn parse_statement(&mut self) -> Result<Option<Stmt>> {
        if self.peek_kind() == TokenKind::Newline {
            self.advance();
            return Ok(None);
        }

        if self.peek_kind() == TokenKind::Keyword {
            let compound = match self.peek().text.as_str() {
                "def" => Some(self.parse_function_def()?),
                "class" => Some(self.parse_class_def()?),
                "if" => Some(self.parse_if()?),
                "for" => Some(self.parse_for()?),
                "while" => Some(self.parse_while()?),
                _ => None,
            };
            if compound.is_some() {
                return Ok(compound);
            }
        }

        let stmt = self.parse_simple_statement()?;
        self.end_simple_statement()?;
        Ok(Some(stmt))
    }

    /// A simple statement ends the line: NEWLINE, `;`, DEDENT or EOF
    fn end_simple_statement(&mut self) -> Result<()> {
        match self.peek_kind() {
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof => Ok(()),
            TokenKind::Delimiter if self.peek().text == ";" => {
                self.advance();
                Ok(())
            }
            _ => self.error(format!(
                "Expected NEWLINE, but got {}",
                self.peek()
            )),
        }
    }

    fn parse_simple_statement(&mut self) -> Result<Stmt> {
        if self.peek_kind() == TokenKind::Keyword {
            match self.peek().text.as_str() {
                "return" => return self.parse_return(),
                "import" => return self.parse_import(),
                "break" => {
                    self.advance();
                    return Ok(Stmt::Break);
                }
                "continue" => {
                    self.advance();
                    return Ok(Stmt::Continue);
                }
                "pass" => {
                    self.advance();
                    return Ok(Stmt::Pass);
                }
                _ => {}
            }
        }

        let line = self.peek().line;
        let expr = self.parse_expression(0)?;

        if self.peek_kind() != TokenKind::Operator {
            return Ok(Stmt::Expr(expr));
        }
        let symbol = self.peek().text.clone();
        let aug_op = AugAssignOp::from_symbol(&symbol);
        if symbol != "=" && aug_op.is_none() {
            return Ok(Stmt::Expr(expr));
        }

        self.advance();
        let value = self.parse_expression(0)?;
        if !expr.is_assign_target() {
            return Err(TranslateError::ParseError {
                line,
                message: "Invalid assignment target".to_string(),
            });
        }
        let stmt = match aug_op {
            Some(op) => Stmt::AugAssign {
                target: expr,
                op,
                value,
            },
            None => Stmt::Assign {
                target: expr,
                value,
            },
        };
        Ok(stmt)
    }

    /// `:` NEWLINE INDENT statements DEDENT
    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect(TokenKind::Delimiter, Some(":"))?;
        self.expect(TokenKind::Newline, None)?;
        self.expect(TokenKind::Indent, None)?;

        let mut body = Vec::new();
        while self.peek_kind() != TokenKind::Dedent && !self.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }
        if self.peek_kind() == TokenKind::Dedent {
            self.advance();
        }
        Ok(body)
    }

    fn parse_function_def(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Keyword, Some("def"))?;
        let name = self.expect(TokenKind::Identifier, None)?.text;
        self.expect(TokenKind::Delimiter, Some("("))?;

        let mut params = Vec::new();
        if !self.peek_is(TokenKind::Delimiter, ")") {
            params.push(self.expect(TokenKind::Identifier, None)?.text);
            while self.peek_is(TokenKind::Delimiter, ",") {
                self.advance();
                params.push(self.expect(TokenKind::Identifier, None)?.text);
            }
        }
        self.expect(TokenKind::Delimiter, Some(")"))?;

        let body = self.parse_block()?;
        Ok(Stmt::FuncDef { name, params, body })
    }

    fn parse_class_def(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Keyword, Some("class"))?;
        let name = self.expect(TokenKind::Identifier, None)?.text;
        let body = self.parse_block()?;
        Ok(Stmt::ClassDef { name, body })
    }

    fn parse_return(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Keyword, Some("return"))?;
        let ends_statement = matches!(
            self.peek_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        );
        if ends_statement {
            return Ok(Stmt::Return(None));
        }
        Ok(Stmt::Return(Some(self.parse_expression(0)?)))
    }

    fn parse_import(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Keyword, Some("import"))?;
        let mut module = self.expect(TokenKind::Identifier, None)?.text;
        while self.peek_kind() == TokenKind::Dot {
            self.advance();
            module.push('.');
            module.push_str(&self.expect(TokenKind::Identifier, None)?.text);
        }
        Ok(Stmt::Import { module })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Keyword, Some("if"))?;
        let condition = self.parse_expression(0)?;
        let then_body = self.parse_block()?;

        let mut elifs = Vec::new();
        while self.peek_is(TokenKind::Keyword, "elif") {
            self.advance();
            let elif_condition = self.parse_expression(0)?;
            let elif_body = self.parse_block()?;
            elifs.push((elif_condition, elif_body));
        }

        let mut alternate = match self.parse_else()? {
            Some(body) => Alternate::Else(body),
            None => Alternate::None,
        };
        for (condition, then_body) in elifs.into_iter().rev() {
            alternate = Alternate::Elif(Box::new(IfStmt {
                condition,
                then_body,
                alternate,
            }));
        }

        Ok(Stmt::If(IfStmt {
            condition,
            then_body,
            alternate,
        }))
    }

    /// Optional trailing `else` block
    fn parse_else(&mut self) -> Result<Option<Vec<Stmt>>> {
        if !self.peek_is(TokenKind::Keyword, "else") {
            return Ok(None);
        }
        self.advance();
        Ok(Some(self.parse_block()?))
    }

    fn parse_for(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Keyword, Some("for"))?;
        let target = self.parse_primary()?;
        self.expect(TokenKind::Keyword, Some("in"))?;
        let iter = self.parse_expression(0)?;
        let body = self.parse_block()?;
        let orelse = self.parse_else()?.unwrap_or_default();
        Ok(Stmt::For {
            target,
            iter,
            body,
            orelse,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Keyword, Some("while"))?;
        let condition = self.parse_expression(0)?;
        let body = self.parse_block()?;
        let orelse = self.parse_else()?.unwrap_or_default();
        Ok(Stmt::While {
            condition,
            body,
            orelse,
        })
    }

    fn peek_binary_op(&self) -> Option<BinOp> {
        let token = self.peek();
        match token.kind {
            TokenKind::Operator => BinOp::from_symbol(&token.text),
            TokenKind::Keyword if token.text == "and" || token.text == "or" => {
                BinOp::from_symbol(&token.text)
            }
            _ => None,
        }
    }

    /// Precedence climbing; operands on the right recurse with `prec + 1`,
    /// so every operator is left-associative.
    pub fn parse_expression(&mut self, min_prec: u8) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            let line = self.advance().line;
            let right = self.parse_expression(prec + 1)?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
                line,
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = if self.peek_is(TokenKind::Operator, "-") {
            Some(UnaryOp::Neg)
        } else if self.peek_is(TokenKind::Operator, "+") {
            Some(UnaryOp::Pos)
        } else if self.peek_is(TokenKind::Keyword, "not") {
            Some(UnaryOp::Not)
        } else {
            None
        };

        match op {
            Some(op) => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::UnaryOp {
                    op,
                    operand: Box::new(operand),
                })
            }
            None => self.parse_primary(),
        }
    }

    /// Atom followed by any chain of `.name`, `(args)` and `[index]`
    fn parse_primary(&mut self) -> Result<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.peek_kind() == TokenKind::Dot {
                self.advance();
                let attr = self.expect(TokenKind::Identifier, None)?.text;
                expr = Expr::Attribute {
                    value: Box::new(expr),
                    attr,
                };
            } else if self.peek_is(TokenKind::Delimiter, "(") {
                self.advance();
                let mut args = Vec::new();
                if !self.peek_is(TokenKind::Delimiter, ")") {
                    args.push(self.parse_expression(0)?);
                    while self.peek_is(TokenKind::Delimiter, ",") {
                        self.advance();
                        args.push(self.parse_expression(0)?);
                    }
                }
                self.expect(TokenKind::Delimiter, Some(")"))?;
                expr = Expr::Call {
                    func: Box::new(expr),
                    args,
                };
            } else if self.peek_is(TokenKind::Delimiter, "[") {
                self.advance();
                let index = self.parse_expression(0)?;
                self.expect(TokenKind::Delimiter, Some("]"))?;
                expr = Expr::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token.text.parse::<f64>().map_err(|_| TranslateError::ParseError {
                    line: token.line,
                    message: format!("Invalid number literal: {}", token.text),
                })?;
                Ok(Expr::Literal(Literal::Number(value)))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Literal(Literal::String(utils::unescape(&token.text))))
            }
            TokenKind::FString => {
                self.advance();
                let (quasis, expressions) = parse_fstring(&token.text, token.line)?;
                Ok(Expr::FString {
                    quasis,
                    expressions,
                })
            }
            TokenKind::Keyword if token.text == "True" => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword if token.text == "False" => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword if token.text == "None" => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Ident(token.text))
            }
            TokenKind::Delimiter if token.text == "(" => {
                self.advance();
                let inner = self.parse_expression(0)?;
                self.expect(TokenKind::Delimiter, Some(")"))?;
                Ok(Expr::Group(Box::new(inner)))
            }
            TokenKind::Delimiter if token.text == "[" => {
                self.advance();
                self.parse_list()
            }
            _ => self.error(format!("Unexpected token: {token}")),
        }
    }

    /// Elements after `[`, tolerating a trailing comma
    fn parse_list(&mut self) -> Result<Expr> {
        let mut elements = Vec::new();
        if !self.peek_is(TokenKind::Delimiter, "]") {
            elements.push(self.parse_expression(0)?);
            while self.peek_is(TokenKind::Delimiter, ",") {
                self.advance();
                if self.peek_is(TokenKind::Delimiter, "]") {
                    break;
                }
                elements.push(self.parse_expression(0)?);
            }
        }
        self.expect(TokenKind::Delimiter, Some("]"))?;
        Ok(Expr::List(elements))
    }
}

#[cfg(test)]
mod tests;
