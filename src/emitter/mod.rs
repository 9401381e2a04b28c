//! Emitter module - JavaScript code generation
//!
//! Walks the AST and renders host-language source. Python-only control flow
//! is lowered here: `for`/`while` with `else`, `range()` loops, class bodies
//! and builtin calls.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::Result;
use crate::parser::{
    Alternate, AugAssignOp, BinOp, Expr, IfStmt, Literal, Program, Stmt, UnaryOp,
};
use crate::semantic::{check_literals, contains_break};

/// Builtins rewritten to host intrinsics
static BUILTINS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("print", "console.log"),
        ("input", "prompt"),
        ("int", "parseInt"),
        ("float", "parseFloat"),
        ("str", "String"),
    ])
});

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces per indentation level
    pub indent_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

/// Per-scope rendering state, copied with overrides and never mutated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationContext {
    /// Inside a class body: assignments become static fields, defs become methods
    pub is_class: bool,
    /// Completion flag of the innermost enclosing loop, if it needs one
    pub loop_flag: Option<String>,
}

impl GenerationContext {
    fn class_body() -> Self {
        Self {
            is_class: true,
            loop_flag: None,
        }
    }

    fn function_body() -> Self {
        Self::default()
    }

    /// Loop bodies track their own flag, or none
    fn loop_body(&self, flag: Option<String>) -> Self {
        Self {
            is_class: false,
            loop_flag: flag,
        }
    }

    /// Branch bodies are no longer top level of a class but keep the
    /// enclosing loop's flag
    fn branch_body(&self) -> Self {
        Self {
            is_class: false,
            loop_flag: self.loop_flag.clone(),
        }
    }
}

/// A construct that was rendered as an inert comment instead of code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    pub node: &'static str,
    pub detail: String,
}

/// Output of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub code: String,
    pub degradations: Vec<Degradation>,
}

impl Translation {
    /// True when nothing was degraded to a comment marker
    pub fn is_complete(&self) -> bool {
        self.degradations.is_empty()
    }
}

/// Check literals, then render the whole program.
///
/// Floor division (`//`, `//=`) is rendered as plain `/`, so the result is
/// not floored: `7 // 2` yields `3.5`.
pub fn generate(program: &Program, options: &EmitOptions) -> Result<Translation> {
    check_literals(program)?;
    let mut emitter = JsEmitter::new(options.clone());
    let code = emitter.emit_program(program);
    Ok(Translation {
        code,
        degradations: emitter.degradations,
    })
}

/// JavaScript code emitter
///
/// Owns the counter for loop-completion flag names, so names are unique
/// within one output and restart for every translation.
pub struct JsEmitter {
    options: EmitOptions,
    flag_counter: usize,
    degradations: Vec<Degradation>,
}

impl JsEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            options,
            flag_counter: 0,
            degradations: Vec::new(),
        }
    }

    pub fn emit_program(&mut self, program: &Program) -> String {
        self.emit_block(&program.statements, 0, &GenerationContext::default())
    }

    fn pad(&self, indent: usize) -> String {
        " ".repeat(indent * self.options.indent_width)
    }

    fn next_loop_flag(&mut self) -> String {
        self.flag_counter += 1;
        format!("_loop_completed_{}", self.flag_counter)
    }

    fn degrade(&mut self, node: &'static str, detail: String, indent: usize) -> String {
        let marker = format!("{}/* Unsupported {detail} */", self.pad(indent));
        self.degradations.push(Degradation { node, detail });
        marker
    }

    fn emit_block(&mut self, stmts: &[Stmt], indent: usize, ctx: &GenerationContext) -> String {
        stmts
            .iter()
            .map(|s| self.emit_stmt(s, indent, ctx))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn emit_stmt(&mut self, stmt: &Stmt, indent: usize, ctx: &GenerationContext) -> String {
        let pad = self.pad(indent);
        match stmt {
            Stmt::Assign { target, value } => {
                let target_str = self.emit_expr(target);
                let value_str = self.emit_expr(value);
                if ctx.is_class && matches!(target, Expr::Ident(_)) {
                    format!("{pad}static {target_str} = {value_str};")
                } else {
                    format!("{pad}{target_str} = {value_str};")
                }
            }
            Stmt::AugAssign { target, op, value } => {
                let op_str = match op {
                    AugAssignOp::Add => "+",
                    AugAssignOp::Sub => "-",
                    AugAssignOp::Mul => "*",
                    // No floor: same approximation as `//`
                    AugAssignOp::Div | AugAssignOp::FloorDiv => "/",
                    AugAssignOp::Mod => "%",
                    AugAssignOp::Pow => "**",
                };
                format!(
                    "{pad}{} {op_str}= {};",
                    self.emit_expr(target),
                    self.emit_expr(value)
                )
            }
            Stmt::Expr(expr) => format!("{pad}{};", self.emit_expr(expr)),
            Stmt::Return(Some(expr)) => format!("{pad}return {};", self.emit_expr(expr)),
            Stmt::Return(None) => format!("{pad}return;"),
            Stmt::FuncDef { name, params, body } => {
                let body_str = self.emit_block(body, indent + 1, &GenerationContext::function_body());
                let params = params.join(", ");
                let header = if ctx.is_class {
                    format!("{name}({params}) {{")
                } else {
                    format!("function {name}({params}) {{")
                };
                format!("{pad}{header}\n{body_str}\n{pad}}}")
            }
            Stmt::If(if_stmt) => self.emit_if(if_stmt, indent, ctx),
            Stmt::While {
                condition,
                body,
                orelse,
            } => {
                let flag = self.flag_for(body, orelse);
                let body_str = self.emit_block(body, indent + 1, &ctx.loop_body(flag.clone()));
                let header = format!("while ({})", self.emit_expr(condition));
                self.emit_loop(header, body_str, orelse, flag, indent, ctx)
            }
            Stmt::For {
                target,
                iter,
                body,
                orelse,
            } => self.emit_for(target, iter, body, orelse, indent, ctx),
            Stmt::ClassDef { name, body } => {
                let body_str = self.emit_block(body, indent + 1, &GenerationContext::class_body());
                format!("{pad}class {name} {{\n{body_str}\n{pad}}}")
            }
            Stmt::Import { module } => format!("{pad}// import {module}"),
            Stmt::Break => match &ctx.loop_flag {
                Some(flag) => format!("{pad}{flag} = false;\n{pad}break;"),
                None => format!("{pad}break;"),
            },
            Stmt::Continue => format!("{pad}continue;"),
            Stmt::Pass => format!("{pad};"),
        }
    }

    fn emit_if(&mut self, if_stmt: &IfStmt, indent: usize, ctx: &GenerationContext) -> String {
        let pad = self.pad(indent);
        let ctx = &ctx.branch_body();
        let mut code = format!(
            "{pad}if ({}) {{\n{}\n{pad}}}",
            self.emit_expr(&if_stmt.condition),
            self.emit_block(&if_stmt.then_body, indent + 1, ctx)
        );

        let mut alternate = &if_stmt.alternate;
        loop {
            match alternate {
                Alternate::None => break,
                Alternate::Elif(elif) => {
                    code.push_str(&format!(
                        " else if ({}) {{\n{}\n{pad}}}",
                        self.emit_expr(&elif.condition),
                        self.emit_block(&elif.then_body, indent + 1, ctx)
                    ));
                    alternate = &elif.alternate;
                }
                Alternate::Else(body) => {
                    if !body.is_empty() {
                        code.push_str(&format!(
                            " else {{\n{}\n{pad}}}",
                            self.emit_block(body, indent + 1, ctx)
                        ));
                    }
                    break;
                }
            }
        }
        code
    }

    /// A completion flag is needed only for a loop with `else` that can `break`
    fn flag_for(&mut self, body: &[Stmt], orelse: &[Stmt]) -> Option<String> {
        if !orelse.is_empty() && contains_break(body) {
            Some(self.next_loop_flag())
        } else {
            None
        }
    }

    fn emit_for(
        &mut self,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        indent: usize,
        ctx: &GenerationContext,
    ) -> String {
        let target_str = self.emit_expr(target);

        let range_args = match iter {
            Expr::Call { func, args } if matches!(func.as_ref(), Expr::Ident(n) if n == "range") => {
                Some(args)
            }
            _ => None,
        };

        let header = match range_args {
            Some(args) => {
                let rendered: Vec<String> = args.iter().map(|a| self.emit_expr(a)).collect();
                let (start, stop, step) = match rendered.as_slice() {
                    [stop] => ("0".to_string(), stop.clone(), "1".to_string()),
                    [start, stop] => (start.clone(), stop.clone(), "1".to_string()),
                    [start, stop, step] => (start.clone(), stop.clone(), step.clone()),
                    _ => {
                        let detail = format!("range arguments ({} given)", args.len());
                        return self.degrade("ForStatement", detail, indent);
                    }
                };
                counted_loop_header(&target_str, &start, &stop, &step)
            }
            None => format!("for (var {target_str} of {})", self.emit_expr(iter)),
        };

        let flag = self.flag_for(body, orelse);
        let body_str = self.emit_block(body, indent + 1, &ctx.loop_body(flag.clone()));
        self.emit_loop(header, body_str, orelse, flag, indent, ctx)
    }

    /// Flag initialization, the loop itself, then the `else` body: guarded by
    /// the flag when there is one, unconditional otherwise.
    fn emit_loop(
        &mut self,
        header: String,
        body_str: String,
        orelse: &[Stmt],
        flag: Option<String>,
        indent: usize,
        ctx: &GenerationContext,
    ) -> String {
        let pad = self.pad(indent);
        let mut parts = Vec::new();
        if let Some(flag) = &flag {
            parts.push(format!("{pad}let {flag} = true;"));
        }
        parts.push(format!("{pad}{header} {{\n{body_str}\n{pad}}}"));

        if !orelse.is_empty() {
            match &flag {
                Some(flag) => {
                    let else_str = self.emit_block(orelse, indent + 1, &ctx.branch_body());
                    parts.push(format!("{pad}if ({flag}) {{\n{else_str}\n{pad}}}"));
                }
                None => parts.push(self.emit_block(orelse, indent, &ctx.branch_body())),
            }
        }
        parts.join("\n")
    }

    pub fn emit_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::Literal(lit) => emit_literal(lit),
            Expr::FString {
                quasis,
                expressions,
            } => {
                let mut code = String::from("`");
                for (i, quasi) in quasis.iter().enumerate() {
                    code.push_str(&escape_template(quasi));
                    if let Some(expr) = expressions.get(i) {
                        code.push_str("${");
                        code.push_str(&self.emit_expr(expr));
                        code.push('}');
                    }
                }
                code.push('`');
                code
            }
            Expr::BinOp {
                left, op, right, ..
            } => {
                let op_str = match op {
                    BinOp::Add => "+",
                    BinOp::Sub => "-",
                    BinOp::Mul => "*",
                    // Not floor division: `7 // 2` yields 3.5
                    BinOp::Div | BinOp::FloorDiv => "/",
                    BinOp::Mod => "%",
                    BinOp::Pow => "**",
                    BinOp::Eq => "==",
                    BinOp::NotEq => "!=",
                    BinOp::Lt => "<",
                    BinOp::Gt => ">",
                    BinOp::LtEq => "<=",
                    BinOp::GtEq => ">=",
                    BinOp::And => "&&",
                    BinOp::Or => "||",
                };
                let left_str = self.emit_expr(left);
                // JS `**` is right-associative and rejects a bare unary base
                let left_str = match (op, left.as_ref()) {
                    (BinOp::Pow, Expr::UnaryOp { .. })
                    | (BinOp::Pow, Expr::BinOp { op: BinOp::Pow, .. }) => format!("({left_str})"),
                    _ => left_str,
                };
                format!("{left_str} {op_str} {}", self.emit_expr(right))
            }
            Expr::UnaryOp { op, operand } => {
                let operand_str = self.emit_expr(operand);
                match op {
                    UnaryOp::Not => format!("!{operand_str}"),
                    UnaryOp::Neg | UnaryOp::Pos => {
                        let sign = if *op == UnaryOp::Neg { "-" } else { "+" };
                        if operand_str.starts_with(['-', '+']) {
                            format!("{sign}({operand_str})")
                        } else {
                            format!("{sign}{operand_str}")
                        }
                    }
                }
            }
            Expr::Attribute { value, attr } => format!("{}.{attr}", self.emit_expr(value)),
            Expr::Call { func, args } => {
                let callee = self.emit_expr(func);
                let args_str: Vec<_> = args.iter().map(|a| self.emit_expr(a)).collect();
                let callee = BUILTINS
                    .get(callee.as_str())
                    .map_or(callee.clone(), |intrinsic| intrinsic.to_string());
                format!("{callee}({})", args_str.join(", "))
            }
            Expr::Index { target, index } => {
                format!("{}[{}]", self.emit_expr(target), self.emit_expr(index))
            }
            Expr::List(items) => {
                let items_str: Vec<_> = items.iter().map(|e| self.emit_expr(e)).collect();
                format!("[{}]", items_str.join(", "))
            }
            Expr::Group(inner) => format!("({})", self.emit_expr(inner)),
        }
    }
}

/// `for (var i = start; i < stop; i += step)`, descending when the rendered
/// step starts with a minus sign
fn counted_loop_header(target: &str, start: &str, stop: &str, step: &str) -> String {
    let step: String = step.chars().filter(|c| !c.is_whitespace()).collect();
    let (cmp, update) = match step.strip_prefix('-') {
        Some(magnitude) => (">", format!("-= {magnitude}")),
        None => ("<", format!("+= {step}")),
    };
    format!("for (var {target} = {start}; {target} {cmp} {stop}; {target} {update})")
}

fn emit_literal(lit: &Literal) -> String {
    match lit {
        Literal::Number(n) => n.to_string(),
        Literal::String(s) => serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\"")),
        Literal::Boolean(b) => b.to_string(),
        Literal::Null => "null".to_string(),
    }
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
mod tests;
