//! Recursive scan helpers over node subtrees.

use crate::node::{Kind, Node};

/// Whether the subtree references `this`, without crossing into nested
/// functions (which rebind `this`).
#[must_use]
pub fn contains_this_reference(node: &Node) -> bool {
    match node.kind {
        Kind::This => true,
        Kind::Function => false,
        _ => node.children.iter().any(contains_this_reference),
    }
}

/// Conservative side-effect analysis: `true` unless the expression is
/// provably effect-free. Property reads are treated as effect-free; calls,
/// constructions, assignments, and increments are not.
#[must_use]
pub fn may_have_side_effects(node: &Node) -> bool {
    match node.kind {
        Kind::Name
        | Kind::This
        | Kind::Number
        | Kind::Str
        | Kind::True
        | Kind::False
        | Kind::Null
        | Kind::Empty
        | Kind::TemplateLit => false,

        // A function expression itself is a value; its body does not run.
        Kind::Function => false,

        Kind::GetProp
        | Kind::GetElem
        | Kind::ArrayLit
        | Kind::ObjectLit
        | Kind::StringKey
        | Kind::ComputedProp
        | Kind::Spread
        | Kind::Comma
        | Kind::Not
        | Kind::Lt
        | Kind::Sub => node.children.iter().any(may_have_side_effects),

        // Everything else (calls, new, assignments, increments, statements,
        // tagged templates) is assumed to have effects.
        _ => true,
    }
}

#[cfg(test)]
#[path = "tests/visit_tests.rs"]
mod tests;
