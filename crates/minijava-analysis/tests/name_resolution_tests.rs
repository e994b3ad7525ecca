//! Name resolution integration tests.
//!
//! Each test runs the full front end via `check_source` (or `analyze`
//! for map-level assertions) and asserts on the error code of the first
//! name error, or on which declaration a use resolves to.

use minijava_analysis::{analyze, check_source, VarKind};
use minijava_lexer::Lexer;
use minijava_parser::Parser;
use minijava_types::ast::{ExprKind, Program, StmtKind};
use minijava_types::ErrorCode;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn parse(source: &str) -> Program {
    let tokens = Lexer::new(source).lex().expect("lexing should succeed");
    Parser::new(tokens)
        .parse()
        .unwrap_or_else(|e| panic!("parsing should succeed, got: {e}"))
}

fn assert_ok(source: &str) {
    if let Err(e) = check_source(source) {
        panic!("expected acceptance, got: {e}");
    }
}

fn assert_error(source: &str, expected_code: ErrorCode) {
    match check_source(source) {
        Ok(_) => panic!("expected error {expected_code}, but the program was accepted"),
        Err(e) => assert_eq!(e.code, expected_code, "wrong error code, message: {e}"),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Scope chain
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn local_variable_lookup() {
    assert_ok(
        "class Main { public static void main(String[] args) {
             int x;
             x = 5;
             System.out.println(x);
         } }",
    );
}

#[test]
fn unknown_variable_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) {
             x = 5;
         } }",
        ErrorCode::UNKNOWN_VARIABLE,
    );
}

#[test]
fn local_shadows_field() {
    // `x` inside get() must resolve to the boolean local, so returning
    // it as int is a type error — proof the field did not win.
    assert_error(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A {
             int x;
             public int get() {
                 boolean x;
                 x = true;
                 return x;
             }
         }",
        ErrorCode::TYPE_MISMATCH,
    );
}

#[test]
fn this_bypasses_local_shadowing() {
    // `this.x` reaches the int field even though a boolean local shadows it.
    assert_ok(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A {
             int x;
             public int get() {
                 boolean x;
                 x = true;
                 this.x = 3;
                 return this.x;
             }
         }",
    );
}

#[test]
fn parameter_is_in_scope() {
    assert_ok(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A { public int id(int value) { return value; } }",
    );
}

#[test]
fn fields_visible_without_this() {
    assert_ok(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class Counter {
             int count;
             public int bump() {
                 count = count + 1;
                 return count;
             }
         }",
    );
}

#[test]
fn inherited_fields_visible_in_subclass() {
    assert_ok(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A { int x; }
         class B extends A { public int get() { return x; } }",
    );
}

#[test]
fn main_locals_do_not_leak_into_classes() {
    assert_error(
        "class Main { public static void main(String[] args) {
             int hidden;
             hidden = 1;
             System.out.println(hidden);
         } }
         class A { public int peek() { return hidden; } }",
        ErrorCode::UNKNOWN_VARIABLE,
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Fields and methods are separate namespaces
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn field_and_method_may_share_a_name() {
    assert_ok(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A {
             int value;
             public int value() {
                 return value;
             }
             public int both(A other) {
                 value = other.value;
                 return other.value();
             }
         }",
    );
}

#[test]
fn unknown_field_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A { public int get(A other) { return other.missing; } }",
        ErrorCode::UNKNOWN_FIELD,
    );
}

#[test]
fn unknown_method_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A { public int get(A other) { return other.missing(); } }",
        ErrorCode::UNKNOWN_METHOD,
    );
}

#[test]
fn inherited_method_call_resolves() {
    assert_ok(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A { public int base() { return 1; } }
         class B extends A { public int call() { return this.base(); } }",
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Classes
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn unknown_class_in_annotation_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) {
             Ghost g;
             g = g;
             System.out.println(1);
         } }",
        ErrorCode::UNKNOWN_CLASS,
    );
}

#[test]
fn unknown_class_in_allocation_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) {
             int x;
             x = new Ghost();
         } }",
        ErrorCode::UNKNOWN_CLASS,
    );
}

#[test]
fn method_call_on_unknown_class_rejected() {
    // the receiver never acquires a class type, so the call site stays
    // unresolved and fails as an unknown method
    assert_error(
        "class Main { public static void main(String[] args) {
             int x;
             x = new Ghost().get();
         } }",
        ErrorCode::UNKNOWN_METHOD,
    );
}

#[test]
fn unknown_superclass_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class B extends Ghost { }",
        ErrorCode::UNKNOWN_CLASS,
    );
}

#[test]
fn inheritance_cycle_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A extends C { }
         class B extends A { }
         class C extends B { }",
        ErrorCode::INHERITANCE_CYCLE,
    );
}

#[test]
fn this_in_main_rejected() {
    assert_error(
        "class Main { public static void main(String[] args) {
             System.out.println(this);
         } }",
        ErrorCode::THIS_OUTSIDE_CLASS,
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Query-time semantics
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn println_receiver_chain_needs_no_declarations() {
    // `System` and `out` resolve to nothing, and nothing ever asks.
    assert_ok(
        "class Main { public static void main(String[] args) {
             System.out.println(42);
         } }",
    );
}

#[test]
fn allocation_statement_is_never_queried() {
    // A bare `new Ghost();` statement type-checks: no rule ever asks for
    // the expression's type, so the unknown class goes unnoticed.
    assert_ok(
        "class Main { public static void main(String[] args) {
             new Ghost();
             System.out.println(1);
         } }",
    );
}

#[test]
fn resolver_reports_against_the_use_site() {
    let err = check_source(
        "class Main { public static void main(String[] args) {
             System.out.println(1);
         } }
         class A {
             public int get() {
                 return missing;
             }
         }",
    )
    .expect_err("expected an unknown-variable error");
    assert_eq!(err.code, ErrorCode::UNKNOWN_VARIABLE);
    assert_eq!(err.line(), 6);
    assert_eq!(
        err.message,
        "no suitable variable declaration for 'missing' found"
    );
}

#[test]
fn resolved_use_points_at_the_right_declaration_kind() {
    let program = parse(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class A {
             int field;
             public int get(int param) {
                 int local;
                 local = param + field;
                 return local;
             }
         }",
    );
    let analysis = analyze(&program).expect("analysis should succeed");
    let resolver = analysis.resolver();

    let method = &program.classes[0].methods[0];
    let StmtKind::Assign { lhs, rhs } = &method.stmts[0].kind else {
        panic!("expected assignment");
    };
    let ExprKind::Binary { left, right, .. } = &rhs.kind else {
        panic!("expected binary rhs");
    };
    let ExprKind::Identifier(param_name) = &left.kind else {
        panic!("expected identifier");
    };
    let ExprKind::Identifier(field_name) = &right.kind else {
        panic!("expected identifier");
    };
    let ExprKind::Identifier(local_name) = &lhs.kind else {
        panic!("expected identifier");
    };

    let param = resolver.variable_use(left.id, param_name).unwrap();
    let field = resolver.variable_use(right.id, field_name).unwrap();
    let local = resolver.variable_use(lhs.id, local_name).unwrap();
    assert!(matches!(param.kind, VarKind::Param(_)));
    assert!(matches!(field.kind, VarKind::Field(_)));
    assert!(matches!(local.kind, VarKind::Local(_)));
}
