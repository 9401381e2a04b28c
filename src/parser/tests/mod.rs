//! parser module tests
//!
//! Kept out of mod.rs for better code organization.

use super::*;
use pretty_assertions::assert_eq;

fn num(v: f64) -> Expr {
    Expr::Literal(Literal::Number(v))
}

fn ident(name: &str) -> Expr {
    Expr::Ident(name.to_string())
}

fn parse_str(source: &str) -> Program {
    parse_source(source).unwrap()
}

fn parse_expr(source: &str) -> Expr {
    match parse_str(source).statements.into_iter().next() {
        Some(Stmt::Expr(expr)) => expr,
        other => panic!("Expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_parse_simple_assignment() {
    let result = parse_str("x = 10");
    assert_eq!(
        result.statements,
        vec![Stmt::Assign {
            target: ident("x"),
            value: num(10.0),
        }]
    );
}

#[test]
fn test_parse_aug_assign() {
    let result = parse_str("total += 2");
    assert_eq!(
        result.statements,
        vec![Stmt::AugAssign {
            target: ident("total"),
            op: AugAssignOp::Add,
            value: num(2.0),
        }]
    );
}

#[test]
fn test_parse_attribute_and_index_targets() {
    let result = parse_str("self.x = 1\nitems[0] = 2");
    assert_eq!(result.statements.len(), 2);
    assert!(matches!(
        &result.statements[0],
        Stmt::Assign { target: Expr::Attribute { attr, .. }, .. } if attr == "x"
    ));
    assert!(matches!(
        &result.statements[1],
        Stmt::Assign { target: Expr::Index { .. }, .. }
    ));
}

#[test]
fn test_invalid_assignment_target() {
    let err = parse_source("f() = 1").unwrap_err();
    assert!(err.to_string().contains("Invalid assignment target"));
    assert!(parse_source("(x) = 1").is_err());
}

#[test]
fn test_parse_function_def() {
    let code = r#"
def add(a, b):
    return a + b
"#;
    let result = parse_str(code);
    assert_eq!(result.statements.len(), 1);
    if let Stmt::FuncDef { name, params, body } = &result.statements[0] {
        assert_eq!(name, "add");
        assert_eq!(params, &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(body.len(), 1);
    } else {
        panic!("Expected FuncDef");
    }
}

#[test]
fn test_parse_bare_return() {
    let result = parse_str("def f():\n    return\n");
    if let Stmt::FuncDef { body, .. } = &result.statements[0] {
        assert_eq!(body, &vec![Stmt::Return(None)]);
    } else {
        panic!("Expected FuncDef");
    }
}

#[test]
fn test_parse_class_def() {
    let code = "class Point:\n    x = 0\n    def norm(self):\n        return self.x\n";
    let result = parse_str(code);
    if let Stmt::ClassDef { name, body } = &result.statements[0] {
        assert_eq!(name, "Point");
        assert_eq!(body.len(), 2);
    } else {
        panic!("Expected ClassDef");
    }
}

#[test]
fn test_parse_if_elif_else_chain() {
    let code = r#"
if x > 0:
    y = 1
elif x < 0:
    y = -1
elif x == 0:
    y = 0
else:
    y = 2
"#;
    let result = parse_str(code);
    assert_eq!(result.statements.len(), 1);
    let Stmt::If(first) = &result.statements[0] else {
        panic!("Expected If");
    };
    let Alternate::Elif(second) = &first.alternate else {
        panic!("Expected first elif");
    };
    let Alternate::Elif(third) = &second.alternate else {
        panic!("Expected second elif");
    };
    assert!(matches!(&third.alternate, Alternate::Else(body) if body.len() == 1));
}

#[test]
fn test_parse_if_without_else() {
    let result = parse_str("if ok:\n    pass\n");
    let Stmt::If(stmt) = &result.statements[0] else {
        panic!("Expected If");
    };
    assert_eq!(stmt.alternate, Alternate::None);
    assert_eq!(stmt.then_body, vec![Stmt::Pass]);
}

#[test]
fn test_parse_for_loop_with_else() {
    let code = r#"
for i in range(10):
    print(i)
else:
    done = True
"#;
    let result = parse_str(code);
    if let Stmt::For {
        target,
        iter,
        body,
        orelse,
    } = &result.statements[0]
    {
        assert_eq!(target, &ident("i"));
        assert!(matches!(iter, Expr::Call { args, .. } if args.len() == 1));
        assert_eq!(body.len(), 1);
        assert_eq!(orelse.len(), 1);
    } else {
        panic!("Expected For");
    }
}

#[test]
fn test_parse_while_loop() {
    let code = r#"
while x > 0:
    x = x - 1
    if x == 3:
        break
"#;
    let result = parse_str(code);
    if let Stmt::While { body, orelse, .. } = &result.statements[0] {
        assert_eq!(body.len(), 2);
        assert!(orelse.is_empty());
    } else {
        panic!("Expected While");
    }
}

#[test]
fn test_parse_import() {
    let result = parse_str("import math\nimport os.path");
    assert_eq!(
        result.statements,
        vec![
            Stmt::Import {
                module: "math".to_string()
            },
            Stmt::Import {
                module: "os.path".to_string()
            },
        ]
    );
}

#[test]
fn test_precedence_mul_over_add() {
    let expr = parse_expr("1 + 2 * 3");
    let Expr::BinOp { op, right, .. } = expr else {
        panic!("Expected BinOp");
    };
    assert_eq!(op, BinOp::Add);
    assert!(matches!(*right, Expr::BinOp { op: BinOp::Mul, .. }));
}

#[test]
fn test_left_associative_subtraction() {
    let expr = parse_expr("a - b - c");
    let Expr::BinOp { op, left, right, .. } = expr else {
        panic!("Expected BinOp");
    };
    assert_eq!(op, BinOp::Sub);
    assert!(matches!(*left, Expr::BinOp { op: BinOp::Sub, .. }));
    assert_eq!(*right, ident("c"));
}

#[test]
fn test_logical_operators_bind_loosest() {
    let expr = parse_expr("a < b and c or d");
    let Expr::BinOp { op, left, .. } = expr else {
        panic!("Expected BinOp");
    };
    assert_eq!(op, BinOp::Or);
    assert!(matches!(*left, Expr::BinOp { op: BinOp::And, .. }));
}

#[test]
fn test_floor_division_parses_as_multiplicative() {
    let expr = parse_expr("a + b // c");
    let Expr::BinOp { right, .. } = expr else {
        panic!("Expected BinOp");
    };
    assert!(matches!(*right, Expr::BinOp { op: BinOp::FloorDiv, .. }));
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let expr = parse_expr("-a * b");
    let Expr::BinOp { op, left, .. } = expr else {
        panic!("Expected BinOp");
    };
    assert_eq!(op, BinOp::Mul);
    assert!(matches!(*left, Expr::UnaryOp { op: UnaryOp::Neg, .. }));
    assert!(matches!(parse_expr("not done"), Expr::UnaryOp { op: UnaryOp::Not, .. }));
}

#[test]
fn test_postfix_chain() {
    let expr = parse_expr("a.b(c)[d]");
    let Expr::Index { target, index } = expr else {
        panic!("Expected Index");
    };
    assert_eq!(*index, ident("d"));
    let Expr::Call { func, args } = *target else {
        panic!("Expected Call");
    };
    assert_eq!(args, vec![ident("c")]);
    assert_eq!(
        *func,
        Expr::Attribute {
            value: Box::new(ident("a")),
            attr: "b".to_string(),
        }
    );
}

#[test]
fn test_group_is_preserved() {
    let expr = parse_expr("(a + b) * c");
    let Expr::BinOp { left, .. } = expr else {
        panic!("Expected BinOp");
    };
    assert!(matches!(*left, Expr::Group(_)));
}

#[test]
fn test_literals() {
    assert_eq!(parse_expr("3.5"), num(3.5));
    assert_eq!(
        parse_expr(r#""a\tb""#),
        Expr::Literal(Literal::String("a\tb".to_string()))
    );
    assert_eq!(parse_expr("True"), Expr::Literal(Literal::Boolean(true)));
    assert_eq!(parse_expr("False"), Expr::Literal(Literal::Boolean(false)));
    assert_eq!(parse_expr("None"), Expr::Literal(Literal::Null));
}

#[test]
fn test_list_literal_with_trailing_comma() {
    assert_eq!(
        parse_expr("[1, 2,]"),
        Expr::List(vec![num(1.0), num(2.0)])
    );
    assert_eq!(parse_expr("[]"), Expr::List(vec![]));
}

#[test]
fn test_fstring_literal() {
    let expr = parse_expr(r#"f"sum={a+b}""#);
    let Expr::FString {
        quasis,
        expressions,
    } = expr
    else {
        panic!("Expected FString");
    };
    assert_eq!(quasis, vec!["sum=".to_string(), String::new()]);
    assert_eq!(expressions.len(), 1);
}

#[test]
fn test_fstring_double_braces() {
    let expr = parse_expr(r#"f"{{literal}}""#);
    assert_eq!(
        expr,
        Expr::FString {
            quasis: vec!["{literal}".to_string()],
            expressions: vec![],
        }
    );
}

#[test]
fn test_expect_error_message() {
    let err = parse_source("print(1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at line 1: Expected DELIMITER ')', but got EOF"
    );
}

#[test]
fn test_missing_block_colon() {
    let err = parse_source("if x\n    y = 1\n").unwrap_err();
    assert!(err.to_string().contains("Expected DELIMITER ':', but got NEWLINE"));
}

#[test]
fn test_error_token_reports_position() {
    let err = parse_source("x = 1\ny = {}\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at line 2: Unexpected token: ERROR '{'"
    );
}

#[test]
fn test_parse_is_deterministic() {
    let source = "for i in range(3):\n    if i:\n        break\nelse:\n    print(f\"{i}\")\n";
    assert_eq!(parse_str(source), parse_str(source));
}

#[test]
fn test_blank_lines_between_statements() {
    let result = parse_str("\n\nx = 1\n\n\ny = 2\n\n");
    assert_eq!(result.statements.len(), 2);
}

#[test]
fn test_simple_statement_needs_line_end() {
    let err = parse_source("x = 1e5").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at line 1: Expected NEWLINE, but got IDENTIFIER 'e5'"
    );
    assert!(parse_source("print(a) print(b)").is_err());
}

#[test]
fn test_semicolon_separates_statements() {
    let result = parse_str("x = 1; y = 2\nif x:\n    pass; z = 3\n");
    assert_eq!(result.statements.len(), 3);
    let Stmt::If(stmt) = &result.statements[2] else {
        panic!("Expected If");
    };
    assert_eq!(stmt.then_body.len(), 2);
}
