use downlevel_ast::node::{Kind, Node};
use downlevel_ast::printer::Printer;
use downlevel_common::span::Span;

use crate::lowering_pass::LoweringPass;
use crate::transform_context::TransformContext;

fn lower(mut script: Node) -> (String, TransformContext) {
    script.use_span_if_missing_from_tree(Span::new(0, 1));
    let mut ctx = TransformContext::es5();
    LoweringPass::new(&mut ctx).hot_swap_script(&mut script);
    (Printer::print(&script), ctx)
}

#[test]
fn test_array_literal_spread() {
    // [a, ...xs, b] -> [].concat([a], xs, [b])
    let script = Node::script(vec![Node::var_decl(
        "r",
        Some(Node::array_lit(vec![
            Node::name("a"),
            Node::spread(Node::name("xs")),
            Node::name("b"),
        ])),
    )]);
    let (out, ctx) = lower(script);
    assert_eq!(out, "var r = [].concat([a], xs, [b]);");
    assert!(ctx.code_changed());
}

#[test]
fn test_array_literal_spread_only() {
    let script = Node::script(vec![Node::var_decl(
        "r",
        Some(Node::array_lit(vec![Node::spread(Node::name("xs"))])),
    )]);
    let (out, _ctx) = lower(script);
    assert_eq!(out, "var r = [].concat(xs);");
}

#[test]
fn test_call_spread_free_function() {
    // g(...xs, 1, 2) -> g.apply(null, [].concat(xs, [1, 2]))
    let script = Node::script(vec![Node::expr_result(Node::call(
        Node::name("g"),
        vec![
            Node::spread(Node::name("xs")),
            Node::number("1"),
            Node::number("2"),
        ],
    ))]);
    let (out, _ctx) = lower(script);
    assert_eq!(out, "g.apply(null, [].concat(xs, [1, 2]));");
}

#[test]
fn test_call_spread_method_receiver_cloned() {
    // obj.m(...xs) -> obj.m.apply(obj, [].concat(xs))
    let script = Node::script(vec![Node::expr_result(Node::call(
        Node::getprop(Node::name("obj"), "m"),
        vec![Node::spread(Node::name("xs"))],
    ))]);
    let (out, _ctx) = lower(script);
    assert_eq!(out, "obj.m.apply(obj, [].concat(xs));");
}

#[test]
fn test_call_spread_effectful_receiver_hoisted() {
    // foo().m(...xs) hoists the receiver into a temporary declared before
    // the statement
    let script = Node::script(vec![Node::expr_result(Node::call(
        Node::getprop(Node::call(Node::name("foo"), vec![]), "m"),
        vec![Node::spread(Node::name("xs"))],
    ))]);
    let (out, _ctx) = lower(script);
    assert_eq!(
        out,
        "var $jscomp$spread$args0; \
         ($jscomp$spread$args0 = foo()).m.apply($jscomp$spread$args0, [].concat(xs));"
    );
}

#[test]
fn test_new_spread_binds_through_apply() {
    // new F(...xs) -> new (Function.prototype.bind.apply)(F, [].concat([].concat(xs)))
    let script = Node::script(vec![Node::expr_result(Node::new_expr(
        Node::name("F"),
        vec![Node::spread(Node::name("xs"))],
    ))]);
    let (out, _ctx) = lower(script);
    assert_eq!(
        out,
        "new (Function.prototype.bind.apply)(F, [].concat([].concat(xs)));"
    );
}

#[test]
fn test_spread_groups_preserve_order() {
    // f(1, ...a, 2, 3, ...b)
    let script = Node::script(vec![Node::expr_result(Node::call(
        Node::name("f"),
        vec![
            Node::number("1"),
            Node::spread(Node::name("a")),
            Node::number("2"),
            Node::number("3"),
            Node::spread(Node::name("b")),
        ],
    ))]);
    let (out, _ctx) = lower(script);
    assert_eq!(out, "f.apply(null, [].concat([1], a, [2, 3], b));");
}

#[test]
fn test_spread_output_has_no_spread_left() {
    let mut script = Node::script(vec![Node::expr_result(Node::call(
        Node::name("g"),
        vec![Node::spread(Node::name("xs"))],
    ))]);
    script.use_span_if_missing_from_tree(Span::new(0, 1));
    let mut ctx = TransformContext::es5();
    LoweringPass::new(&mut ctx).hot_swap_script(&mut script);
    assert!(!script.contains_kind(Kind::Spread));
    assert!(!script.has_dummy_span_in_tree());
}

#[test]
fn test_plain_calls_untouched() {
    let script = Node::script(vec![Node::expr_result(Node::call(
        Node::name("g"),
        vec![Node::number("1")],
    ))]);
    let (out, ctx) = lower(script);
    assert_eq!(out, "g(1);");
    assert!(!ctx.code_changed());
}
