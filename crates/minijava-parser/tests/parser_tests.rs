//! Parser integration tests.
//!
//! Each test lexes + parses a MiniJava source program and asserts on the
//! AST shape or on the error code of the first syntax error.

use minijava_lexer::Lexer;
use minijava_parser::Parser;
use minijava_types::ast::*;
use minijava_types::{ErrorCode, MjError};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn parse(source: &str) -> Result<Program, MjError> {
    let tokens = Lexer::new(source).lex()?;
    Parser::new(tokens).parse()
}

fn parse_ok(source: &str) -> Program {
    parse(source).unwrap_or_else(|e| panic!("expected parse success, got: {e}"))
}

fn parse_err(source: &str) -> MjError {
    match parse(source) {
        Ok(_) => panic!("expected parse failure, but the program was accepted"),
        Err(e) => e,
    }
}

/// Wrap statements (and optional leading declarations) in a main method.
fn in_main(body: &str) -> String {
    format!("class Main {{ public static void main(String[] args) {{ {body} }} }}")
}

/// Parse statements in a main wrapper and return the first one.
fn first_stmt(body: &str) -> Stmt {
    let program = parse_ok(&in_main(body));
    program.main.stmts.into_iter().next().expect("one statement")
}

/// Parse `x = <expr>;` and return the right-hand side.
fn expr(text: &str) -> Expr {
    match first_stmt(&format!("x = {text};")).kind {
        StmtKind::Assign { rhs, .. } => rhs,
        other => panic!("expected assignment, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Program structure
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn minimal_program() {
    let program = parse_ok("class Main { public static void main(String[] args) { } }");
    assert_eq!(program.main.name.name, "Main");
    assert_eq!(program.main.args_name.name, "args");
    assert!(program.main.locals.is_empty());
    assert!(program.main.stmts.is_empty());
    assert!(program.classes.is_empty());
}

#[test]
fn class_with_extends() {
    let program = parse_ok(
        "class Main { public static void main(String[] a) { } }
         class A { }
         class B extends A { }",
    );
    assert_eq!(program.classes.len(), 2);
    assert_eq!(program.classes[0].name.name, "A");
    assert!(program.classes[0].superclass.is_none());
    assert_eq!(
        program.classes[1].superclass.as_ref().map(|s| s.name.as_str()),
        Some("A")
    );
}

#[test]
fn class_fields_then_methods() {
    let program = parse_ok(
        "class Main { public static void main(String[] a) { } }
         class A {
             int x;
             boolean flag;
             A other;
             public int get(int which, boolean dummy) {
                 int tmp;
                 tmp = which;
                 return tmp;
             }
         }",
    );
    let class = &program.classes[0];
    assert_eq!(class.fields.len(), 3);
    assert_eq!(class.fields[2].name.name, "other");
    assert!(matches!(class.fields[2].ty.kind, TypeKind::Class(ref n) if n == "A"));

    let method = &class.methods[0];
    assert_eq!(method.name.name, "get");
    assert_eq!(method.params.len(), 2);
    assert_eq!(method.locals.len(), 1);
    assert_eq!(method.stmts.len(), 1);
    assert!(matches!(method.ret_exp.kind, ExprKind::Identifier(_)));
}

#[test]
fn main_locals_before_statements() {
    let program = parse_ok(&in_main("int x; int[] ys; x = 1; ys = new int[x];"));
    assert_eq!(program.main.locals.len(), 2);
    assert!(matches!(program.main.locals[1].ty.kind, TypeKind::IntArray));
    assert_eq!(program.main.stmts.len(), 2);
}

#[test]
fn class_typed_local_vs_assignment_lookahead() {
    // `A a;` is a declaration, `a = ...;` and `a[0] = ...;` are statements
    let program = parse_ok(
        "class Main { public static void main(String[] args) {
             A a;
             int[] arr;
             a = new A();
             arr[0] = 1;
         } }
         class A { }",
    );
    assert_eq!(program.main.locals.len(), 2);
    assert_eq!(program.main.stmts.len(), 2);
}

#[test]
fn node_ids_are_unique() {
    let program = parse_ok(&in_main("int x; x = 1 + 2; while (x < 10) x = x + 1;"));
    let mut ids = Vec::new();
    ids.push(program.main.id);
    for local in &program.main.locals {
        ids.push(local.id);
    }
    fn collect_stmt(stmt: &Stmt, ids: &mut Vec<NodeId>) {
        ids.push(stmt.id);
        match &stmt.kind {
            StmtKind::Block(stmts) => stmts.iter().for_each(|s| collect_stmt(s, ids)),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                collect_expr(cond, ids);
                collect_stmt(then_branch, ids);
                collect_stmt(else_branch, ids);
            }
            StmtKind::While { cond, body } => {
                collect_expr(cond, ids);
                collect_stmt(body, ids);
            }
            StmtKind::Assign { lhs, rhs } => {
                collect_expr(lhs, ids);
                collect_expr(rhs, ids);
            }
            StmtKind::Call(e) => collect_expr(e, ids),
        }
    }
    fn collect_expr(expr: &Expr, ids: &mut Vec<NodeId>) {
        ids.push(expr.id);
        match &expr.kind {
            ExprKind::Binary { left, right, .. } => {
                collect_expr(left, ids);
                collect_expr(right, ids);
            }
            ExprKind::Not(e) | ExprKind::Neg(e) => collect_expr(e, ids),
            ExprKind::NewArray { size } => collect_expr(size, ids),
            ExprKind::ArrayLookup { array, index } => {
                collect_expr(array, ids);
                collect_expr(index, ids);
            }
            ExprKind::FieldAccess { object, .. } => collect_expr(object, ids),
            ExprKind::MethodCall { object, args, .. } => {
                collect_expr(object, ids);
                args.iter().for_each(|a| collect_expr(a, ids));
            }
            _ => {}
        }
    }
    for stmt in &program.main.stmts {
        collect_stmt(stmt, &mut ids);
    }
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len(), "node ids must be unique");
}

// ══════════════════════════════════════════════════════════════════════════════
// Expression precedence & shape
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn multiplication_binds_tighter_than_addition() {
    let ExprKind::Binary { op, right, .. } = expr("1 + 2 * 3").kind else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn comparison_binds_tighter_than_and() {
    let ExprKind::Binary { op, left, right } = expr("1 < 2 && b").kind else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(
        left.kind,
        ExprKind::Binary {
            op: BinaryOp::Less,
            ..
        }
    ));
    assert!(matches!(right.kind, ExprKind::Identifier(_)));
}

#[test]
fn subtraction_is_left_associative() {
    let ExprKind::Binary { op, left, .. } = expr("10 - 4 - 3").kind else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinaryOp::Sub);
    assert!(matches!(
        left.kind,
        ExprKind::Binary {
            op: BinaryOp::Sub,
            ..
        }
    ));
}

#[test]
fn unary_binds_tighter_than_multiplication() {
    let ExprKind::Binary { op, left, .. } = expr("-1 * 2").kind else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(left.kind, ExprKind::Neg(_)));
}

#[test]
fn postfix_chains() {
    let e = expr("this.grid[i].length");
    let ExprKind::FieldAccess { object, field } = e.kind else {
        panic!("expected field access");
    };
    assert_eq!(field.name, "length");
    let ExprKind::ArrayLookup { array, .. } = object.kind else {
        panic!("expected array lookup");
    };
    assert!(matches!(array.kind, ExprKind::FieldAccess { .. }));
}

#[test]
fn method_call_with_arguments() {
    let e = expr("o.combine(1, x, new A())");
    let ExprKind::MethodCall { method, args, .. } = e.kind else {
        panic!("expected method call");
    };
    assert_eq!(method.name, "combine");
    assert_eq!(args.len(), 3);
    assert!(matches!(args[2].kind, ExprKind::NewObject { .. }));
}

#[test]
fn parentheses_leave_no_node() {
    assert_eq!(expr("x").kind, expr("((x))").kind);
}

#[test]
fn nested_unary_operators() {
    let e = expr("!!flag");
    let ExprKind::Not(inner) = e.kind else {
        panic!("expected not");
    };
    assert!(matches!(inner.kind, ExprKind::Not(_)));
}

// ══════════════════════════════════════════════════════════════════════════════
// Syntax errors
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn else_branch_is_mandatory() {
    let err = parse_err(&in_main("if (true) x = 1;"));
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
}

#[test]
fn missing_semicolon() {
    let err = parse_err(&in_main("x = 1"));
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
}

#[test]
fn missing_return_in_method() {
    let err = parse_err(
        "class Main { public static void main(String[] a) { } }
         class A { public int f() { x = 1; } }",
    );
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
}

#[test]
fn main_signature_is_fixed() {
    let err = parse_err("class Main { public static void main(int[] args) { } }");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
}

#[test]
fn error_spans_point_at_the_offending_token() {
    let err = parse_err("class Main {\n  public static void main(String[] args) {\n    x = ;\n  }\n}");
    assert_eq!(err.line(), 3);
}
