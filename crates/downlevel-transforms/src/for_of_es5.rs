//! `for...of` lowering.
//!
//! `for (v of iterable) body` becomes a plain `for` loop driven by the
//! iterator protocol through the `$jscomp.makeIterator` runtime helper:
//!
//! ```text
//! for (var $jscomp$iter$N = $jscomp.makeIterator(iterable),
//!          $jscomp$key$v = $jscomp$iter$N.next();
//!      !$jscomp$key$v.done;
//!      $jscomp$key$v = $jscomp$iter$N.next()) {
//!   <decl-or-assign of v = $jscomp$key$v.value>
//!   body...
//! }
//! ```

use downlevel_ast::node::{Kind, Node};

use crate::transform_context::{ITER_VAR_PREFIX, KEY_VAR_PREFIX, MAKE_ITERATOR, TransformContext};

pub(crate) fn lower(ctx: &mut TransformContext, node: &mut Node) {
    debug_assert_eq!(node.kind, Kind::ForOf);
    let span = node.span;

    let mut parts = std::mem::take(&mut node.children).into_iter();
    let (Some(target), Some(iterable), Some(mut body)) =
        (parts.next(), parts.next(), parts.next())
    else {
        unreachable!("for-of must have a target, an iterable, and a body");
    };
    debug_assert_eq!(body.kind, Kind::Block);

    let iter_name = format!("{ITER_VAR_PREFIX}{}", ctx.next_unique_id());
    let var_name = if target.is_name() {
        target.string.clone()
    } else {
        debug_assert!(target.is_declaration());
        target.children[0].string.clone()
    };
    let key_name = format!("{KEY_VAR_PREFIX}{var_name}");

    let next_call = || Node::call(Node::getprop(Node::name(&iter_name), "next"), vec![]);

    // var $iter = makeIterator(iterable), $key = $iter.next();
    let mut init = Node::var_decl(
        &iter_name,
        Some(Node::call(Node::qualified_name(MAKE_ITERATOR), vec![iterable])),
    );
    let mut key_declarator = Node::name(&key_name);
    key_declarator.children.push(next_call());
    init.children.push(key_declarator);

    let cond = Node::not(Node::getprop(Node::name(&key_name), "done"));
    let incr = Node::assign(Node::name(&key_name), next_call());

    // v = $key.value (bare name) or <decl kind> v = $key.value
    let key_value = Node::getprop(Node::name(&key_name), "value");
    let body_first = if target.is_name() {
        Node::expr_result(Node::assign(target, key_value))
    } else {
        let mut decl = target;
        decl.children[0].children.push(key_value);
        decl
    };
    body.children.insert(0, body_first);

    let mut result = Node::for_stmt(init, cond, incr, body);
    result.use_span_if_missing_from_tree(span);

    tracing::debug!(iter = %iter_name, key = %key_name, "lowered for-of");
    ctx.set_needs_runtime();
    ctx.mark_code_changed();
    *node = result;
}

#[cfg(test)]
#[path = "tests/for_of_es5.rs"]
mod tests;
