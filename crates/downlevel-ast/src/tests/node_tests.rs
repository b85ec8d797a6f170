use super::*;
use downlevel_common::span::Span;

#[test]
fn test_builder_helpers() {
    let id = Node::name("foo");
    assert_eq!(id.kind, Kind::Name);
    assert_eq!(id.string, "foo");
    assert!(id.span.is_dummy());

    let num = Node::number("42");
    assert_eq!(num.kind, Kind::Number);
    assert_eq!(num.string, "42");

    let this = Node::this_ref();
    assert_eq!(this.kind, Kind::This);

    let t = Node::bool_lit(true);
    assert_eq!(t.kind, Kind::True);
}

#[test]
fn test_call_expr() {
    let call = Node::call(Node::name("foo"), vec![Node::number("1"), Node::string("bar")]);
    assert_eq!(call.kind, Kind::Call);
    assert_eq!(call.children.len(), 3);
    assert_eq!(call.children[0].string, "foo");
}

#[test]
fn test_property_access() {
    let prop = Node::getprop(Node::name("obj"), "prop");
    assert_eq!(prop.kind, Kind::GetProp);
    assert_eq!(prop.string, "prop");
    assert_eq!(prop.children.len(), 1);
    assert_eq!(prop.children[0].string, "obj");
}

#[test]
fn test_function_shape() {
    let func = Node::function(
        "add",
        vec![Node::name("x"), Node::name("y")],
        Node::block(vec![Node::ret(Some(Node::name("x")))]),
    );
    assert_eq!(func.children.len(), 3);
    assert_eq!(func.children[0].string, "add");
    assert_eq!(func.children[1].kind, Kind::ParamList);
    assert_eq!(func.children[2].kind, Kind::Block);
}

#[test]
fn test_class_shape() {
    let class = Node::class(
        Some(Node::name("A")),
        Some(Node::name("B")),
        vec![Node::member_function_def(
            "m",
            Node::function("", vec![], Node::block(vec![])),
        )],
    );
    assert_eq!(class.children.len(), 3);
    assert_eq!(class.children[0].string, "A");
    assert_eq!(class.children[1].string, "B");
    assert_eq!(class.children[2].kind, Kind::ClassMembers);
    assert_eq!(class.children[2].children.len(), 1);

    let anonymous = Node::class(None, None, vec![]);
    assert!(anonymous.children[0].is_empty_node());
    assert!(anonymous.children[1].is_empty_node());
}

#[test]
fn test_decl_shapes() {
    let var = Node::var_decl("x", Some(Node::number("1")));
    assert_eq!(var.kind, Kind::Var);
    assert_eq!(var.children.len(), 1);
    assert_eq!(var.children[0].string, "x");
    assert_eq!(var.children[0].children.len(), 1);

    let uninit = Node::let_decl("y", None);
    assert_eq!(uninit.kind, Kind::Let);
    assert!(!uninit.children[0].has_children());
    assert!(uninit.is_declaration());
}

#[test]
fn test_qualified_name_roundtrip() {
    let qname = Node::qualified_name("a.b.c");
    assert!(qname.is_qualified_name());
    assert_eq!(qname.qualified_name_string().as_deref(), Some("a.b.c"));
    assert!(qname.matches_qualified_name("a.b.c"));
    assert!(!qname.matches_qualified_name("a.b"));
    assert!(!qname.matches_qualified_name("x.b.c"));

    let simple = Node::qualified_name("foo");
    assert_eq!(simple.kind, Kind::Name);
    assert!(simple.matches_qualified_name("foo"));
}

#[test]
fn test_non_qualified_names() {
    let call = Node::call(Node::name("f"), vec![]);
    assert!(!call.is_qualified_name());
    assert!(call.qualified_name_string().is_none());

    // a getprop rooted in a call is not a qualified name
    let rooted_in_call = Node::getprop(Node::call(Node::name("f"), vec![]), "x");
    assert!(!rooted_in_call.is_qualified_name());
}

#[test]
fn test_spread_detection() {
    let arr = Node::array_lit(vec![Node::number("1"), Node::spread(Node::name("xs"))]);
    assert!(arr.has_spread_child());

    let plain = Node::array_lit(vec![Node::number("1")]);
    assert!(!plain.has_spread_child());
}

#[test]
fn test_span_fill_in() {
    let span = Span::new(10, 20);
    let mut synthesized = Node::assign(
        Node::getprop(Node::name("a"), "b"),
        Node::number("1").at(Span::new(3, 4)),
    );
    assert!(synthesized.has_dummy_span_in_tree());

    synthesized.use_span_if_missing_from_tree(span);
    assert!(!synthesized.has_dummy_span_in_tree());
    assert_eq!(synthesized.span, span);
    assert_eq!(synthesized.children[0].span, span);
    // an existing span is preserved by the fill-in
    assert_eq!(synthesized.children[1].span, Span::new(3, 4));
}

#[test]
fn test_deep_clone_keeps_spans() {
    let original = Node::getprop(Node::name("a").at(Span::new(0, 1)), "b").at(Span::new(0, 3));
    let clone = original.clone();
    assert_eq!(clone, original);
    assert_eq!(clone.children[0].span, Span::new(0, 1));
}

#[test]
fn test_contains_kind() {
    let tree = Node::script(vec![Node::expr_result(Node::call(
        Node::name("f"),
        vec![Node::spread(Node::name("xs"))],
    ))]);
    assert!(tree.contains_kind(Kind::Spread));
    assert!(!tree.contains_kind(Kind::Class));
}
