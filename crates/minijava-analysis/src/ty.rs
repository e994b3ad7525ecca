//! Semantic types and the subtyping relation.
//!
//! [`Type`] is distinct from the syntactic [`minijava_types::ast::TypeAnn`]:
//! class types are identified by their declaration, not by name, so two
//! classes that happen to share a name never compare equal.

use crate::symbols::{ClassId, DeclarationIndex};

/// A semantic MiniJava type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    IntArray,
    Class(ClassId),
}

impl Type {
    /// Reflexive, transitive subtyping.
    ///
    /// Primitives and `int[]` are only subtypes of themselves. A class is
    /// a subtype of every class on its ancestor chain. The relation is
    /// antisymmetric because the index rejects inheritance cycles.
    pub fn is_subtype_of(&self, other: &Type, index: &DeclarationIndex) -> bool {
        match (self, other) {
            (Type::Int, Type::Int) | (Type::Bool, Type::Bool) | (Type::IntArray, Type::IntArray) => {
                true
            }
            (Type::Class(sub), Type::Class(sup)) => {
                let mut current = Some(*sub);
                while let Some(cid) = current {
                    if cid == *sup {
                        return true;
                    }
                    current = index.superclass_of(cid);
                }
                false
            }
            _ => false,
        }
    }

    /// The type's name as it appears in error messages.
    pub fn describe(&self, index: &DeclarationIndex) -> String {
        match self {
            Type::Int => "int".to_string(),
            Type::Bool => "boolean".to_string(),
            Type::IntArray => "int[]".to_string(),
            Type::Class(cid) => index.class(*cid).name.clone(),
        }
    }
}
