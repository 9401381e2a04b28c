//! Semantic module - literal checks and control-flow scans over the AST
//!
//! The two literal checks run as one pass before any code is emitted, so a
//! program either fails here or is rendered in full.

use crate::error::{Result, TranslateError};
use crate::parser::{Alternate, BinOp, Expr, IfStmt, Literal, LiteralKind, Program, Stmt};

/// Reject division by a literal zero and `+` between a string and a number literal
pub fn check_literals(program: &Program) -> Result<()> {
    check_block(&program.statements)
}

fn check_block(stmts: &[Stmt]) -> Result<()> {
    stmts.iter().try_for_each(check_stmt)
}

fn check_stmt(stmt: &Stmt) -> Result<()> {
    match stmt {
        Stmt::Assign { target, value } | Stmt::AugAssign { target, value, .. } => {
            check_expr(target)?;
            check_expr(value)
        }
        Stmt::Expr(expr) | Stmt::Return(Some(expr)) => check_expr(expr),
        Stmt::FuncDef { body, .. } | Stmt::ClassDef { body, .. } => check_block(body),
        Stmt::If(if_stmt) => check_if(if_stmt),
        Stmt::While {
            condition,
            body,
            orelse,
        } => {
            check_expr(condition)?;
            check_block(body)?;
            check_block(orelse)
        }
        Stmt::For {
            target,
            iter,
            body,
            orelse,
        } => {
            check_expr(target)?;
            check_expr(iter)?;
            check_block(body)?;
            check_block(orelse)
        }
        Stmt::Return(None)
        | Stmt::Import { .. }
        | Stmt::Break
        | Stmt::Continue
        | Stmt::Pass => Ok(()),
    }
}

fn check_if(if_stmt: &IfStmt) -> Result<()> {
    check_expr(&if_stmt.condition)?;
    check_block(&if_stmt.then_body)?;
    match &if_stmt.alternate {
        Alternate::None => Ok(()),
        Alternate::Elif(next) => check_if(next),
        Alternate::Else(body) => check_block(body),
    }
}

fn check_expr(expr: &Expr) -> Result<()> {
    match expr {
        Expr::BinOp {
            left,
            op,
            right,
            line,
        } => {
            check_binary(left, *op, right, *line)?;
            check_expr(left)?;
            check_expr(right)
        }
        Expr::UnaryOp { operand, .. } => check_expr(operand),
        Expr::Attribute { value, .. } => check_expr(value),
        Expr::Call { func, args } => {
            check_expr(func)?;
            args.iter().try_for_each(check_expr)
        }
        Expr::Index { target, index } => {
            check_expr(target)?;
            check_expr(index)
        }
        Expr::List(items) => items.iter().try_for_each(check_expr),
        Expr::FString { expressions, .. } => expressions.iter().try_for_each(check_expr),
        Expr::Group(inner) => check_expr(inner),
        Expr::Ident(_) | Expr::Literal(_) => Ok(()),
    }
}

fn check_binary(left: &Expr, op: BinOp, right: &Expr, line: usize) -> Result<()> {
    match op {
        BinOp::Div | BinOp::FloorDiv => {
            if let Expr::Literal(Literal::Number(value)) = right {
                if *value == 0.0 {
                    return Err(TranslateError::DivisionByZero { line });
                }
            }
            Ok(())
        }
        BinOp::Add => {
            let kinds = (left.literal_kind(), right.literal_kind());
            match kinds {
                (Some(LiteralKind::String), Some(LiteralKind::Number))
                | (Some(LiteralKind::Number), Some(LiteralKind::String)) => {
                    Err(TranslateError::TypeMismatch {
                        line,
                        message: "Addition of string and number detected".to_string(),
                    })
                }
                _ => Ok(()),
            }
        }
        _ => Ok(()),
    }
}

/// True if a `break` is reachable in `stmts` without entering a nested
/// function or class body.
pub fn contains_break(stmts: &[Stmt]) -> bool {
    stmts.iter().any(stmt_contains_break)
}

fn stmt_contains_break(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Break => true,
        Stmt::If(if_stmt) => if_contains_break(if_stmt),
        Stmt::While { body, orelse, .. } | Stmt::For { body, orelse, .. } => {
            contains_break(body) || contains_break(orelse)
        }
        // function and class bodies have their own control flow
        _ => false,
    }
}

fn if_contains_break(if_stmt: &IfStmt) -> bool {
    contains_break(&if_stmt.then_body)
        || match &if_stmt.alternate {
            Alternate::None => false,
            Alternate::Elif(next) => if_contains_break(next),
            Alternate::Else(body) => contains_break(body),
        }
}
