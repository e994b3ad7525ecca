//! Printer round-trip tests.
//!
//! The printed form of a parsed program must itself parse, and printing
//! that second parse must reproduce the first printed text byte for byte.

use minijava_lexer::Lexer;
use minijava_parser::Parser;
use minijava_printer::print;
use minijava_types::ast::Program;

fn parse(source: &str) -> Program {
    let tokens = Lexer::new(source).lex().expect("lexing should succeed");
    Parser::new(tokens)
        .parse()
        .unwrap_or_else(|e| panic!("parsing should succeed, got: {e}"))
}

fn assert_roundtrip(source: &str) {
    let first = print(&parse(source));
    let second = print(&parse(&first));
    assert_eq!(first, second, "printed output must be a fixed point");
}

const FACTORIAL: &str = "\
class Factorial {
    public static void main(String[] args) {
        System.out.println(new Fac().computeFac(10));
    }
}

class Fac {
    public int computeFac(int num) {
        int num_aux;
        if (num < 1)
            num_aux = 1;
        else
            num_aux = num * this.computeFac(num - 1);
        return num_aux;
    }
}
";

#[test]
fn factorial_roundtrip() {
    assert_roundtrip(FACTORIAL);
}

#[test]
fn factorial_printed_shape() {
    let printed = print(&parse(FACTORIAL));
    // tabs indent, binaries parenthesised, members separated
    assert!(printed.starts_with("class Factorial {\n\tpublic static void main(String[] args) {\n"));
    assert!(printed.contains("(num < 1)"));
    assert!(printed.contains("(num * this.computeFac((num - 1)))"));
    assert!(printed.ends_with("}\n"));
}

#[test]
fn whitespace_and_comments_are_normalised_away() {
    let noisy = "class   Main{public static void main(String[] args){/* noise */int x;\n\n\nx=1;// trailing\n}}";
    let clean = "class Main { public static void main(String[] args) { int x; x = 1; } }";
    assert_eq!(print(&parse(noisy)), print(&parse(clean)));
}

#[test]
fn printing_is_deterministic() {
    let program = parse(FACTORIAL);
    let first = print(&program);
    for _ in 0..10 {
        assert_eq!(first, print(&program));
    }
}

#[test]
fn inheritance_and_fields_roundtrip() {
    assert_roundtrip(
        "class Main { public static void main(String[] args) { System.out.println(1); } }
         class Shape { int area; public int getArea() { return area; } }
         class Square extends Shape {
             int side;
             public int grow(int by) { side = side + by; return side; }
             public boolean isFlat() { return false; }
         }",
    );
}

#[test]
fn statements_roundtrip() {
    assert_roundtrip(
        "class Main { public static void main(String[] args) {
             int[] data;
             int i;
             data = new int[10];
             i = 0;
             while (i < data.length) {
                 data[i] = i * i;
                 i = i + 1;
             }
             if (0 < data[3] && !false) {
                 System.out.println(data[3]);
             } else {
                 System.out.println(0 - 1);
             }
         } }",
    );
}

#[test]
fn unary_minus_roundtrip() {
    assert_roundtrip(
        "class Main { public static void main(String[] args) {
             int x;
             x = --1;
             x = -x + -2;
             System.out.println(x);
         } }",
    );
}

#[test]
fn regrouped_parentheses_still_reach_a_fixed_point() {
    // `(-a)[i]` prints as `- a[i]`, which re-parses differently but
    // prints identically from then on.
    assert_roundtrip(
        "class Main { public static void main(String[] args) {
             int[] a;
             int x;
             a = new int[3];
             x = (-x) + 1;
             System.out.println(x);
         } }",
    );
}
