//! AST definitions

use serde::Serialize;

/// Type tag of a literal, the only type information the checks rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
    Null,
}

/// Literal value together with its kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Number(_) => LiteralKind::Number,
            Literal::String(_) => LiteralKind::String,
            Literal::Boolean(_) => LiteralKind::Boolean,
            Literal::Null => LiteralKind::Null,
        }
    }
}

/// Expression types
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Identifier
    Ident(String),
    /// Number, string, boolean or None literal
    Literal(Literal),
    /// f-string: `quasis.len() == expressions.len() + 1`
    FString {
        quasis: Vec<String>,
        expressions: Vec<Expr>,
    },
    /// Binary operation
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        line: usize,
    },
    /// Unary operation
    UnaryOp { op: UnaryOp, operand: Box<Expr> },
    /// Attribute access (obj.attr)
    Attribute { value: Box<Expr>, attr: String },
    /// Function call
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// Index access (target[index])
    Index { target: Box<Expr>, index: Box<Expr> },
    /// List literal
    List(Vec<Expr>),
    /// Parenthesized expression
    Group(Box<Expr>),
}

impl Expr {
    /// Identifier, attribute and index expressions can be assigned to
    pub fn is_assign_target(&self) -> bool {
        matches!(
            self,
            Expr::Ident(_) | Expr::Attribute { .. } | Expr::Index { .. }
        )
    }

    pub fn literal_kind(&self) -> Option<LiteralKind> {
        match self {
            Expr::Literal(lit) => Some(lit.kind()),
            _ => None,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

impl BinOp {
    /// Operator for a token text (`and`/`or` come from keywords)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "//" => BinOp::FloorDiv,
            "%" => BinOp::Mod,
            "**" => BinOp::Pow,
            "==" => BinOp::Eq,
            "!=" => BinOp::NotEq,
            "<" => BinOp::Lt,
            ">" => BinOp::Gt,
            "<=" => BinOp::LtEq,
            ">=" => BinOp::GtEq,
            "and" => BinOp::And,
            "or" => BinOp::Or,
            _ => return None,
        };
        Some(op)
    }

    /// Binding power, higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            BinOp::Pow => 10,
            BinOp::Mul | BinOp::Div | BinOp::FloorDiv | BinOp::Mod => 9,
            BinOp::Add | BinOp::Sub => 8,
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => 7,
            BinOp::And => 6,
            BinOp::Or => 5,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

/// Augmented assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AugAssignOp {
    Add,      // +=
    Sub,      // -=
    Mul,      // *=
    Div,      // /=
    FloorDiv, // //=
    Mod,      // %=
    Pow,      // **=
}

impl AugAssignOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+=" => AugAssignOp::Add,
            "-=" => AugAssignOp::Sub,
            "*=" => AugAssignOp::Mul,
            "/=" => AugAssignOp::Div,
            "//=" => AugAssignOp::FloorDiv,
            "%=" => AugAssignOp::Mod,
            "**=" => AugAssignOp::Pow,
            _ => return None,
        };
        Some(op)
    }
}

/// What follows an `if` block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Alternate {
    None,
    /// `elif`, chained through its own `alternate`
    Elif(Box<IfStmt>),
    /// Terminal `else` block
    Else(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub alternate: Alternate,
}

/// Statement types
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Assignment to an identifier, attribute or index target
    Assign { target: Expr, value: Expr },
    /// Augmented assignment (x += 1, x -= 1, etc.)
    AugAssign {
        target: Expr,
        op: AugAssignOp,
        value: Expr,
    },
    /// Expression statement
    Expr(Expr),
    /// Return statement
    Return(Option<Expr>),
    /// Function definition
    FuncDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// If statement with its elif/else chain
    If(IfStmt),
    /// While loop, `orelse` runs when the loop ends without `break`
    While {
        condition: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    /// For loop, `orelse` runs when the loop ends without `break`
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    /// Class definition
    ClassDef { name: String, body: Vec<Stmt> },
    /// Import statement (import x, import x.y)
    Import { module: String },
    /// Break statement
    Break,
    /// Continue statement
    Continue,
    /// Pass statement
    Pass,
}

/// Program (collection of statements)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}
