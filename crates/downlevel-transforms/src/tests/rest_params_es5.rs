use downlevel_ast::jsdoc::{JsDocInfo, TypeExpr};
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

fn rest_function(params: Vec<Node>, body: Vec<Node>) -> Node {
    Node::script(vec![Node::expr_result(Node::function(
        "f",
        params,
        Node::block(body),
    ))])
}

#[test]
fn test_rest_parameter_collects_arguments() {
    let script = rest_function(
        vec![Node::name("a"), Node::rest("b")],
        vec![Node::ret(Some(Node::getelem(
            Node::name("b"),
            Node::number("0"),
        )))],
    );
    let (out, ctx) = lower(script);
    assert_eq!(
        out,
        "function f(a, b) { \
         var $jscomp$restParams = []; \
         for (var $jscomp$restIndex = 1; $jscomp$restIndex < arguments.length; ++$jscomp$restIndex) \
         { $jscomp$restParams[$jscomp$restIndex - 1] = arguments[$jscomp$restIndex]; } \
         { let b = $jscomp$restParams; return b[0]; } };"
    );
    assert!(ctx.code_changed());
}

#[test]
fn test_rest_parameter_stays_in_parameter_list() {
    let mut script = rest_function(vec![Node::rest("args")], vec![Node::ret(None)]);
    script.use_span_if_missing_from_tree(Span::new(0, 1));
    let mut ctx = TransformContext::es5();
    LoweringPass::new(&mut ctx).hot_swap_script(&mut script);

    // arity preserved: the formal is still there, now a var-args name
    let function = &script.children[0].children[0];
    let params = &function.children[1];
    assert_eq!(params.children.len(), 1);
    assert_eq!(params.children[0].kind, Kind::Name);
    assert_eq!(params.children[0].string, "args");
    assert!(params.children[0].is_var_args);
    assert!(!script.contains_kind(Kind::Rest));
}

#[test]
fn test_rest_parameter_empty_body_keeps_body_empty() {
    let script = rest_function(vec![Node::rest("xs")], vec![]);
    let (out, ctx) = lower(script);
    assert_eq!(out, "function f(xs) {};");
    // the parameter rewrite itself still counts as a change
    assert!(ctx.code_changed());
}

#[test]
fn test_rest_index_offset_matches_position() {
    let script = rest_function(
        vec![Node::name("a"), Node::name("b"), Node::rest("rest")],
        vec![Node::ret(Some(Node::name("rest")))],
    );
    let (out, _ctx) = lower(script);
    assert!(out.contains("$jscomp$restIndex = 2"), "{out}");
    assert!(out.contains("$jscomp$restIndex - 2"), "{out}");
}

#[test]
fn test_rest_annotation_type_flows_to_inner_declaration() {
    let mut function = Node::function(
        "f",
        vec![Node::rest("xs")],
        Node::block(vec![Node::ret(Some(Node::name("xs")))]),
    );
    let mut doc = JsDocInfo::new();
    doc.params.push((
        "xs".to_string(),
        TypeExpr::Rest(Box::new(TypeExpr::Name("number".to_string()))),
    ));
    function.jsdoc = Some(Box::new(doc));

    let mut script = Node::script(vec![Node::expr_result(function)]);
    script.use_span_if_missing_from_tree(Span::new(0, 1));
    let mut ctx = TransformContext::es5();
    LoweringPass::new(&mut ctx).hot_swap_script(&mut script);
    assert!(ctx.diagnostics.is_empty());

    // { let xs = $jscomp$restParams; ... } with @type {!Array<number>}
    let body = &script.children[0].children[0].children[2];
    let inner_block = body.children.last().expect("inner block");
    let declarator = &inner_block.children[0].children[0];
    let doc = declarator.jsdoc.as_deref().expect("declarator jsdoc");
    assert_eq!(
        doc.type_expr,
        Some(TypeExpr::NonNullArray(Box::new(TypeExpr::Name(
            "number".to_string()
        ))))
    );
}

#[test]
fn test_rest_annotation_without_ellipsis_warns() {
    let mut function = Node::function(
        "f",
        vec![Node::rest("xs")],
        Node::block(vec![Node::ret(Some(Node::name("xs")))]),
    );
    let mut doc = JsDocInfo::new();
    doc.params
        .push(("xs".to_string(), TypeExpr::Name("number".to_string())));
    function.jsdoc = Some(Box::new(doc));

    let (_, ctx) = lower(Node::script(vec![Node::expr_result(function)]));
    assert_eq!(ctx.diagnostics.len(), 1);
    assert_eq!(ctx.diagnostics[0].key, "BAD_REST_PARAMETER_ANNOTATION");
    assert!(!ctx.diagnostics[0].is_error());
}

#[test]
fn test_unannotated_rest_parameter_does_not_warn() {
    let script = rest_function(vec![Node::rest("xs")], vec![Node::ret(None)]);
    let (_, ctx) = lower(script);
    assert!(ctx.diagnostics.is_empty());
}
