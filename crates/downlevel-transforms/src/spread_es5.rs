//! Spread-element lowering.
//!
//! The argument sequence is partitioned into groups: consecutive non-spread
//! elements coalesce into a fresh array literal, each spread element stands
//! alone. The groups are joined with `[].concat(g1, g2, ...)`:
//!
//! - `[a, ...xs, b]` → `[].concat([a], xs, [b])`
//! - `f(...xs, 1, 2)` → `f.apply(null, [].concat(xs, [1, 2]))`
//! - `obj.m(...xs)` → `obj.m.apply(obj, [].concat(xs))`, hoisting `obj` into
//!   a temporary first when evaluating it twice could run effects
//! - `new F(...xs)` → `new (Function.prototype.bind.apply)(F,
//!   [].concat([].concat(xs)))`

use downlevel_ast::node::{Kind, Node};
use downlevel_ast::visit::may_have_side_effects;
use downlevel_common::span::Span;

use crate::lowering_pass::Splice;
use crate::transform_context::{FRESH_SPREAD_VAR, TransformContext};

pub(crate) fn lower(ctx: &mut TransformContext, node: &mut Node, splice: &mut Splice) {
    debug_assert!(node.has_spread_child());
    let span = node.span;

    let result = match node.kind {
        Kind::ArrayLit => join_groups(std::mem::take(&mut node.children)),
        Kind::Call => lower_call(ctx, node, span, splice),
        Kind::New => lower_new(std::mem::take(&mut node.children)),
        _ => unreachable!("spread may only appear in array literals, calls, and new"),
    };

    *node = result;
    node.use_span_if_missing_from_tree(span);
    ctx.mark_code_changed();
    tracing::trace!("lowered spread");
}

/// `[].concat(g1, g2, ...)` over the partitioned argument groups.
fn join_groups(elements: Vec<Node>) -> Node {
    let mut groups: Vec<Node> = Vec::new();
    let mut current: Vec<Node> = Vec::new();
    for element in elements {
        if element.is_spread() {
            if !current.is_empty() {
                groups.push(Node::array_lit(std::mem::take(&mut current)));
            }
            let Some(expr) = element.children.into_iter().next() else {
                unreachable!("spread must carry an expression");
            };
            groups.push(expr);
        } else {
            current.push(element);
        }
    }
    if !current.is_empty() {
        groups.push(Node::array_lit(current));
    }
    Node::call(Node::getprop(Node::array_lit(vec![]), "concat"), groups)
}

fn lower_call(
    ctx: &mut TransformContext,
    node: &mut Node,
    span: Span,
    splice: &mut Splice,
) -> Node {
    let mut children = std::mem::take(&mut node.children).into_iter();
    let Some(mut callee) = children.next() else {
        unreachable!("call must have a callee");
    };
    let joined = join_groups(children.collect());

    if callee.kind == Kind::GetProp {
        let receiver = callee.children.remove(0);
        if may_have_side_effects(&receiver) {
            // hoist the receiver: var $jscomp$spread$args$N; before the
            // statement, then (tmp = obj).m.apply(tmp, joined)
            let temp_name = format!("{FRESH_SPREAD_VAR}{}", ctx.next_unique_id());
            let mut temp_decl = Node::var_decl(&temp_name, None);
            temp_decl.use_span_if_missing_from_tree(span);
            splice.before.push(temp_decl);

            callee
                .children
                .insert(0, Node::assign(Node::name(&temp_name), receiver));
            Node::call(
                Node::getprop(callee, "apply"),
                vec![Node::name(&temp_name), joined],
            )
        } else {
            let receiver_clone = receiver.clone();
            callee.children.insert(0, receiver);
            Node::call(Node::getprop(callee, "apply"), vec![receiver_clone, joined])
        }
    } else {
        Node::call(
            Node::getprop(callee, "apply"),
            vec![Node::null_lit(), joined],
        )
    }
}

/// `new F(...)` constructs through bind-apply so the argument count stays
/// dynamic.
fn lower_new(children: Vec<Node>) -> Node {
    let mut children = children.into_iter();
    let Some(ctor) = children.next() else {
        unreachable!("new must have a constructor expression");
    };
    let joined = join_groups(children.collect());
    let args = Node::call(
        Node::getprop(Node::array_lit(vec![]), "concat"),
        vec![joined],
    );
    Node::new_expr(
        Node::qualified_name("Function.prototype.bind.apply"),
        vec![ctor, args],
    )
}

#[cfg(test)]
#[path = "tests/spread_es5.rs"]
mod tests;
