//! JSDoc annotation records attached to nodes.
//!
//! The pass only reads and rewrites annotations; it never parses comment
//! text. Upstream parsing attaches a `JsDocInfo` to the relevant node, and
//! the rewriters move, merge, and extend those records so downstream type
//! checking sees the same declarations it would have seen on the original
//! class or function.

use rustc_hash::FxHashSet;

/// A type annotation expression.
///
/// Only the shapes this pass synthesizes or compares are modeled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    /// The wildcard type `?`.
    Unknown,
    /// A (possibly dotted) type name: `number`, `foo.Bar`.
    Name(String),
    /// A rest-parameter annotation `...T`.
    Rest(Box<TypeExpr>),
    /// `!Array<T>`, the collected rest-arguments type.
    NonNullArray(Box<TypeExpr>),
}

impl TypeExpr {
    /// The element type of a `...T` annotation, if this is one.
    #[must_use]
    pub fn rest_inner(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Rest(inner) => Some(inner),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Unknown => write!(f, "?"),
            TypeExpr::Name(name) => write!(f, "{name}"),
            TypeExpr::Rest(inner) => write!(f, "...{inner}"),
            TypeExpr::NonNullArray(inner) => write!(f, "!Array<{inner}>"),
        }
    }
}

/// The annotation record attached to a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsDocInfo {
    /// Typed parameter info, in declaration order: `@param {T} name`.
    pub params: Vec<(String, TypeExpr)>,
    /// `@return {T}`
    pub return_type: Option<TypeExpr>,
    /// `@type {T}` (declarations and forward declarations)
    pub type_expr: Option<TypeExpr>,
    /// `@this {T}`
    pub this_type: Option<TypeExpr>,
    /// `@extends {T}`
    pub base_type: Option<TypeExpr>,
    /// `@extends` entries recorded on an `@interface`.
    pub extended_interfaces: Vec<TypeExpr>,

    // Modifier bits
    pub is_constructor: bool,
    pub is_interface: bool,
    pub is_struct: bool,
    pub is_dict: bool,
    pub is_unrestricted: bool,
    pub is_export: bool,
    pub is_override: bool,

    /// `@suppress {...}` names.
    pub suppressions: FxHashSet<String>,
}

impl JsDocInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record keyed to `@type` only, as used for accessor forward
    /// declarations.
    #[must_use]
    pub fn of_type(type_expr: TypeExpr) -> Self {
        JsDocInfo {
            type_expr: Some(type_expr),
            ..Self::default()
        }
    }

    /// Look up a declared parameter type by name.
    #[must_use]
    pub fn param_type(&self, name: &str) -> Option<&TypeExpr> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, ty)| ty)
    }

    /// The type of the sole declared parameter, if exactly one is declared.
    #[must_use]
    pub fn sole_param_type(&self) -> Option<&TypeExpr> {
        match self.params.as_slice() {
            [(_, ty)] => Some(ty),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/jsdoc_tests.rs"]
mod tests;
