//! MiniJava semantic analysis: name resolution and type checking.
//!
//! Two passes over a parsed AST:
//!
//! ```text
//! AST ──► DeclarationIndex::build ──► TypeChecker::check ──► validated
//!         (collect declarations,       (post-order walk,
//!          resolve uses)                infer & validate types)
//! ```
//!
//! The first pass builds write-once lookup tables; the second reads them
//! through the [`NameResolver`] façade and raises the first error it
//! meets. [`check_source`] runs the whole front end on source text.

pub mod checker;
pub mod resolver;
pub mod symbols;
pub mod ty;

pub use checker::TypeChecker;
pub use resolver::NameResolver;
pub use symbols::{
    ClassId, ClassSymbol, DeclarationIndex, MethodId, MethodSymbol, VarId, VarKind, VarSymbol,
};
pub use ty::Type;

use minijava_types::ast::{Expr, Program};
use minijava_types::Result;

/// A successfully analysed program: the AST together with its index.
pub struct Analysis<'p> {
    program: &'p Program,
    index: DeclarationIndex,
}

/// Run both analysis passes over a parsed program.
pub fn analyze(program: &Program) -> Result<Analysis<'_>> {
    let index = DeclarationIndex::build(program)?;
    TypeChecker::new(program, &index).check()?;
    Ok(Analysis { program, index })
}

impl<'p> Analysis<'p> {
    /// The analysed program.
    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// The declaration index built for the program.
    pub fn index(&self) -> &DeclarationIndex {
        &self.index
    }

    /// Name resolution queries against the index.
    pub fn resolver(&self) -> NameResolver<'_> {
        NameResolver::new(&self.index)
    }

    /// Infer the type of an expression of the analysed program.
    pub fn type_of(&self, expr: &Expr) -> Result<Type> {
        TypeChecker::new(self.program, &self.index).type_of(expr)
    }
}

/// Front-end convenience: lex, parse, structure-check, and analyse.
pub fn check_source(source: &str) -> Result<Program> {
    let tokens = minijava_lexer::Lexer::new(source).lex()?;
    let program = minijava_parser::Parser::new(tokens).parse()?;
    minijava_parser::postcheck::check(&program)?;
    analyze(&program)?;
    Ok(program)
}
