//! Object-literal shorthand lowering.
//!
//! - `{ m() { ... } }` → `{ m: function() { ... } }`
//! - `{ x }` → `{ x: x }`

use downlevel_ast::node::{Kind, Node};

use crate::transform_context::TransformContext;

/// Give a value-less string key its implied name child.
pub(crate) fn expand_shorthand(ctx: &mut TransformContext, key: &mut Node) {
    debug_assert_eq!(key.kind, Kind::StringKey);
    if key.has_children() {
        return;
    }
    let mut name = Node::name(&key.string);
    name.span = key.span;
    key.children.push(name);
    ctx.mark_code_changed();
}

/// Replace an object-literal method by a string key holding the function.
pub(crate) fn lower_member_function(ctx: &mut TransformContext, member: &mut Node) {
    debug_assert_eq!(member.kind, Kind::MemberFunctionDef);
    let Some(function) = member.children.pop() else {
        unreachable!("member function must carry its function");
    };
    let mut key = Node::string_key(member.string.clone(), function);
    key.span = member.span;
    key.jsdoc = member.jsdoc.take();
    *member = key;
    ctx.mark_code_changed();
}

#[cfg(test)]
#[path = "tests/object_shorthand_es5.rs"]
mod tests;
