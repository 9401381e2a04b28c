//! emitter module tests
//!
//! Kept out of mod.rs for better code organization.

use super::*;
use crate::error::TranslateError;
use crate::parser::parse_source;
use pretty_assertions::assert_eq;

fn emit_source(source: &str) -> String {
    let program = parse_source(source).unwrap();
    generate(&program, &EmitOptions::default()).unwrap().code
}

fn emit_expr_source(source: &str) -> String {
    let program = parse_source(source).unwrap();
    let Some(Stmt::Expr(expr)) = program.statements.first() else {
        panic!("Expected expression statement");
    };
    JsEmitter::new(EmitOptions::default()).emit_expr(expr)
}

// --- literals ---
#[test]
fn test_emit_number_literals() {
    assert_eq!(emit_expr_source("42"), "42");
    assert_eq!(emit_expr_source("3.25"), "3.25");
}

#[test]
fn test_emit_string_literal_is_json_quoted() {
    assert_eq!(emit_expr_source(r#"'say "hi"'"#), r#""say \"hi\"""#);
    assert_eq!(emit_expr_source(r#""a\nb""#), r#""a\nb""#);
}

#[test]
fn test_emit_keyword_literals() {
    assert_eq!(emit_expr_source("True"), "true");
    assert_eq!(emit_expr_source("False"), "false");
    assert_eq!(emit_expr_source("None"), "null");
}

// --- expressions ---
#[test]
fn test_emit_logical_and_unary() {
    assert_eq!(emit_expr_source("a and not b or c"), "a && !b || c");
    assert_eq!(emit_expr_source("-x"), "-x");
    assert_eq!(emit_expr_source("- -x"), "-(-x)");
}

#[test]
fn test_emit_floor_division_is_plain_division() {
    assert_eq!(emit_expr_source("a // b"), "a / b");
    assert_eq!(emit_source("a //= 2"), "a /= 2;");
}

#[test]
fn test_emit_group_keeps_parentheses() {
    assert_eq!(emit_expr_source("(a + b) * c"), "(a + b) * c");
}

#[test]
fn test_emit_postfix_chain() {
    assert_eq!(emit_expr_source("a.b(c)[d]"), "a.b(c)[d]");
    assert_eq!(emit_expr_source("[1, x, 'y']"), r#"[1, x, "y"]"#);
}

#[test]
fn test_emit_builtin_calls() {
    assert_eq!(emit_expr_source("print(1, 2)"), "console.log(1, 2)");
    assert_eq!(emit_expr_source("input('name?')"), r#"prompt("name?")"#);
    assert_eq!(emit_expr_source("int(s)"), "parseInt(s)");
    assert_eq!(emit_expr_source("float(s)"), "parseFloat(s)");
    assert_eq!(emit_expr_source("str(n)"), "String(n)");
    assert_eq!(emit_expr_source("log.print(n)"), "log.print(n)");
    assert_eq!(emit_expr_source("len(xs)"), "len(xs)");
}

#[test]
fn test_emit_fstring() {
    assert_eq!(emit_expr_source(r#"f"sum={a+b}""#), "`sum=${a + b}`");
    assert_eq!(emit_expr_source(r#"f"{{x}} `q`""#), "`{x} \\`q\\``");
    assert_eq!(emit_expr_source(r#"f"cost: ${n}""#), "`cost: $${n}`");
    assert_eq!(emit_expr_source(r#"f"${{n}}""#), "`\\${n}`");
}

// --- statements ---
#[test]
fn test_emit_assignments() {
    assert_eq!(
        emit_source("x = 1\ny = 2\nprint(x + y)"),
        "x = 1;\ny = 2;\nconsole.log(x + y);"
    );
    assert_eq!(emit_source("self.total -= n"), "self.total -= n;");
    assert_eq!(emit_source("p **= 2"), "p **= 2;");
}

#[test]
fn test_emit_function() {
    let code = emit_source("def add(a, b):\n    return a + b\n");
    assert_eq!(code, "function add(a, b) {\n    return a + b;\n}");
}

#[test]
fn test_emit_if_elif_else() {
    let source = "if x > 0:\n    y = 1\nelif x < 0:\n    y = 2\nelse:\n    y = 3\n";
    let expected = "\
if (x > 0) {
    y = 1;
} else if (x < 0) {
    y = 2;
} else {
    y = 3;
}";
    assert_eq!(emit_source(source), expected);
}

#[test]
fn test_emit_class_body() {
    let source = "\
class Counter:
    count = 0
    def bump(self, n):
        total = n
        def helper():
            pass
        return total
";
    let expected = "\
class Counter {
    static count = 0;
    bump(self, n) {
        total = n;
        function helper() {
            ;
        }
        return total;
    }
}";
    assert_eq!(emit_source(source), expected);
}

#[test]
fn test_emit_import_is_inert() {
    assert_eq!(emit_source("import math"), "// import math");
}

#[test]
fn test_emit_pass_and_continue() {
    let code = emit_source("while x:\n    continue\n");
    assert_eq!(code, "while (x) {\n    continue;\n}");
}

// --- range lowering ---
#[test]
fn test_emit_range_one_arg() {
    let code = emit_source("for i in range(5):\n    print(i)\n");
    assert_eq!(
        code,
        "for (var i = 0; i < 5; i += 1) {\n    console.log(i);\n}"
    );
}

#[test]
fn test_emit_range_two_args() {
    let code = emit_source("for i in range(2, n):\n    pass\n");
    assert!(code.starts_with("for (var i = 2; i < n; i += 1) {"));
}

#[test]
fn test_emit_range_descending() {
    let code = emit_source("for i in range(10, 0, -1):\n    print(i)\n");
    assert!(code.starts_with("for (var i = 10; i > 0; i -= 1) {"));
}

#[test]
fn test_emit_range_symbolic_step_is_ascending() {
    let code = emit_source("for i in range(0, 10, k):\n    pass\n");
    assert!(code.starts_with("for (var i = 0; i < 10; i += k) {"));
}

#[test]
fn test_emit_range_bad_arity_degrades() {
    let program = parse_source("for i in range():\n    pass\n").unwrap();
    let translation = generate(&program, &EmitOptions::default()).unwrap();
    assert_eq!(translation.code, "/* Unsupported range arguments (0 given) */");
    assert!(!translation.is_complete());
    assert_eq!(translation.degradations[0].node, "ForStatement");
}

#[test]
fn test_emit_for_of() {
    let code = emit_source("for item in items:\n    print(item)\n");
    assert_eq!(code, "for (var item of items) {\n    console.log(item);\n}");
}

// --- loop else ---
#[test]
fn test_while_else_with_break() {
    let source = "\
while n > 0:
    if n == 3:
        break
    n -= 1
else:
    print(\"done\")
";
    let expected = "\
let _loop_completed_1 = true;
while (n > 0) {
    if (n == 3) {
        _loop_completed_1 = false;
        break;
    }
    n -= 1;
}
if (_loop_completed_1) {
    console.log(\"done\");
}";
    assert_eq!(emit_source(source), expected);
}

#[test]
fn test_while_else_without_break() {
    let source = "while n > 0:\n    n -= 1\nelse:\n    print(n)\n";
    let expected = "while (n > 0) {\n    n -= 1;\n}\nconsole.log(n);";
    assert_eq!(emit_source(source), expected);
}

#[test]
fn test_for_else_with_break() {
    let source = "for x in xs:\n    if x:\n        break\nelse:\n    y = 1\n";
    let code = emit_source(source);
    assert!(code.starts_with("let _loop_completed_1 = true;\nfor (var x of xs) {"));
    assert!(code.ends_with("if (_loop_completed_1) {\n    y = 1;\n}"));
}

#[test]
fn test_flags_are_unique_within_output_and_restart_per_translation() {
    let source = "\
for a in xs:
    break
else:
    pass
while b:
    break
else:
    pass
";
    let code = emit_source(source);
    assert!(code.contains("_loop_completed_1"));
    assert!(code.contains("_loop_completed_2"));
    assert_eq!(emit_source(source), code);
}

#[test]
fn test_inner_loop_break_does_not_clear_outer_flag() {
    let source = "\
for a in xs:
    for b in ys:
        break
    if a:
        break
else:
    pass
";
    let expected = "\
let _loop_completed_1 = true;
for (var a of xs) {
    for (var b of ys) {
        break;
    }
    if (a) {
        _loop_completed_1 = false;
        break;
    }
}
if (_loop_completed_1) {
    ;
}";
    assert_eq!(emit_source(source), expected);
}

#[test]
fn test_break_without_else_has_no_flag() {
    let code = emit_source("while True:\n    break\n");
    assert_eq!(code, "while (true) {\n    break;\n}");
}

// --- literal checks ---
#[test]
fn test_generate_rejects_literal_errors() {
    let program = parse_source("print(\"x\" + 5)").unwrap();
    assert!(matches!(
        generate(&program, &EmitOptions::default()),
        Err(TranslateError::TypeMismatch { .. })
    ));
    let program = parse_source("y = 1 // 0").unwrap();
    assert!(matches!(
        generate(&program, &EmitOptions::default()),
        Err(TranslateError::DivisionByZero { .. })
    ));
}

#[test]
fn test_custom_indent_width() {
    let program = parse_source("if a:\n    b()\n").unwrap();
    let options = EmitOptions { indent_width: 2 };
    let code = generate(&program, &options).unwrap().code;
    assert_eq!(code, "if (a) {\n  b();\n}");
}

#[test]
fn test_emit_power_with_unary_base() {
    assert_eq!(emit_source("y = -x ** 2"), "y = (-x) ** 2;");
    assert_eq!(emit_source("y = not a ** b"), "y = (!a) ** b;");
    assert_eq!(emit_source("y = 2 ** -1"), "y = 2 ** -1;");
}

#[test]
fn test_emit_power_keeps_left_grouping() {
    assert_eq!(emit_source("y = 2 ** 3 ** 2"), "y = (2 ** 3) ** 2;");
    assert_eq!(emit_source("y = 2 ** (3 ** 2)"), "y = 2 ** (3 ** 2);");
    assert_eq!(emit_source("y = a * b ** c"), "y = a * b ** c;");
}

#[test]
fn test_class_control_flow_bodies_are_not_static() {
    let source = "\
class Config:
    debug = False
    if debug:
        level = 1
    else:
        level = 2
";
    let expected = "\
class Config {
    static debug = false;
    if (debug) {
        level = 1;
    } else {
        level = 2;
    }
}";
    assert_eq!(emit_source(source), expected);
}
