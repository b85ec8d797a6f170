//! Class lowering.
//!
//! A class becomes a constructor function plus companion statements inserted
//! after the statement that declared it, in order: the `$jscomp.inherits`
//! call (when there is an extends clause), one `ClassName[.prototype].m =
//! function ...` assignment per method, an `Object.defineProperties` call
//! per accessor-bearing side (prototype and static), and a bare
//! property-access forward declaration per accessor-derived member so
//! downstream type checking sees them.
//!
//! Only three syntactic contexts can be converted: a class statement, the
//! RHS of a simple assignment that is itself an expression statement, and a
//! variable-declarator initializer. Anything else is diagnosed and left in
//! place.

use downlevel_ast::jsdoc::{JsDocInfo, TypeExpr};
use downlevel_ast::node::{Kind, Node};
use downlevel_ast::visit::contains_this_reference;
use downlevel_common::diagnostics::{
    CANNOT_CONVERT, CLASS_REASSIGNMENT, CONFLICTING_GETTER_SETTER_TYPE, DYNAMIC_EXTENDS_TYPE,
};
use downlevel_common::span::Span;
use indexmap::IndexMap;

use crate::lowering_pass::Splice;
use crate::transform_context::{INHERITS, TransformContext};

pub(crate) const CLASS_POSITION_DETAIL: &str =
    "Can only convert classes that are declarations or the right hand side of a simple assignment.";

/// How a convertible class sits in the tree.
struct ClassMetadata {
    /// Canonical (possibly dotted) name the members are installed under.
    full_class_name: String,
    /// Whether the constructor function keeps its own name out of the
    /// output.
    anonymous: bool,
}

/// Entry point from the statement loop: recognize the three convertible
/// statement shapes and rewrite the class they carry.
pub(crate) fn maybe_lower_class_statement(
    ctx: &mut TransformContext,
    stmt: &mut Node,
    splice: &mut Splice,
) {
    match stmt.kind {
        Kind::Class => lower_class_declaration(ctx, stmt, splice),
        Kind::ExprResult => lower_class_assignment(ctx, stmt, splice),
        Kind::Var | Kind::Let | Kind::Const => lower_class_declarators(ctx, stmt, splice),
        _ => {}
    }
}

/// `class C { ... }` → `let C = function() { ... };` plus companions.
fn lower_class_declaration(ctx: &mut TransformContext, stmt: &mut Node, splice: &mut Splice) {
    let span = stmt.span;
    assert!(stmt.children[0].is_name(), "class statement must be named");
    let full_name = get_unique_class_name(&stmt.children[0].string, false);
    if !check_extends(ctx, stmt) {
        return;
    }

    let class = std::mem::replace(stmt, Node::empty());
    let metadata = ClassMetadata {
        full_class_name: full_name.clone(),
        anonymous: false,
    };
    let (mut ctor, info) = rewrite_class(ctx, class, &metadata, splice);
    // the declaration carries the name; the constructor function goes
    // unnamed
    ctor.children[0].string.clear();
    let mut decl = Node::decl(Kind::Let, &full_name, Some(ctor));
    decl.jsdoc = Some(Box::new(info));
    decl.use_span_if_missing_from_tree(span);
    *stmt = decl;
}

/// `ns.C = class { ... };` — the LHS must be a qualified name.
fn lower_class_assignment(ctx: &mut TransformContext, stmt: &mut Node, splice: &mut Splice) {
    let is_class_assign = stmt
        .first_child()
        .is_some_and(|e| e.kind == Kind::Assign && e.children[1].kind == Kind::Class);
    if !is_class_assign {
        return;
    }
    let span = stmt.span;
    let Some(lhs_name) = stmt.children[0].children[0].qualified_name_string() else {
        ctx.report(&CANNOT_CONVERT, span, &[CLASS_POSITION_DETAIL]);
        return;
    };
    if !check_extends(ctx, &stmt.children[0].children[1]) {
        return;
    }

    let metadata = ClassMetadata {
        full_class_name: get_unique_class_name(&lhs_name, false),
        anonymous: true,
    };
    let class = std::mem::replace(&mut stmt.children[0].children[1], Node::empty());
    let (ctor, info) = rewrite_class(ctx, class, &metadata, splice);
    stmt.children[0].children[1] = ctor;
    stmt.children[0].jsdoc = Some(Box::new(info));
    stmt.use_span_if_missing_from_tree(span);
}

/// `var C = class { ... };` — each declarator with a class initializer.
fn lower_class_declarators(ctx: &mut TransformContext, stmt: &mut Node, splice: &mut Splice) {
    let span = stmt.span;
    for idx in 0..stmt.children.len() {
        let declarator = &stmt.children[idx];
        if !declarator
            .first_child()
            .is_some_and(|init| init.kind == Kind::Class)
        {
            continue;
        }
        let full_name = get_unique_class_name(&declarator.string, false);
        if !check_extends(ctx, &declarator.children[0]) {
            continue;
        }

        let metadata = ClassMetadata {
            full_class_name: full_name,
            anonymous: true,
        };
        let class = std::mem::replace(&mut stmt.children[idx].children[0], Node::empty());
        let (ctor, info) = rewrite_class(ctx, class, &metadata, splice);
        stmt.children[idx].children[0] = ctor;
        stmt.children[idx].jsdoc = Some(Box::new(info));
    }
    stmt.use_span_if_missing_from_tree(span);
}

/// An extends clause must be a qualified name; anything dynamic is
/// diagnosed and the class is left alone.
fn check_extends(ctx: &mut TransformContext, class: &Node) -> bool {
    let superclass = &class.children[1];
    if !superclass.is_empty_node() && !superclass.is_qualified_name() {
        ctx.report(&DYNAMIC_EXTENDS_TYPE, superclass.span, &[]);
        return false;
    }
    true
}

/// A class defined inside a function must not be reassigned: the lowered
/// form installs members on the declared name, so reassignment would
/// silently detach them. Classes at script level are handled by upstream
/// var-check passes.
pub(crate) fn check_class_reassignment(ctx: &mut TransformContext, function: &Node) {
    debug_assert_eq!(function.kind, Kind::Function);
    let body = &function.children[2];
    let mut class_names = Vec::new();
    collect_enclosed_class_names(body, &mut class_names);
    for class_name in &class_names {
        scan_for_reassignment(ctx, body, class_name);
    }
}

/// Names of classes whose nearest enclosing function is the one being
/// entered (nested functions run their own check).
fn collect_enclosed_class_names(node: &Node, out: &mut Vec<String>) {
    for child in &node.children {
        if child.kind == Kind::Function {
            continue;
        }
        if child.kind == Kind::Class && child.children[0].is_name() {
            out.push(child.children[0].string.clone());
        }
        collect_enclosed_class_names(child, out);
    }
}

fn scan_for_reassignment(ctx: &mut TransformContext, node: &Node, class_name: &str) {
    for child in &node.children {
        if child.kind == Kind::Assign
            && child.children[0].matches_qualified_name(class_name)
            // the class's own defining site is not a reassignment
            && child.children[1].kind != Kind::Class
        {
            ctx.report(&CLASS_REASSIGNMENT, child.span, &[]);
        }
        scan_for_reassignment(ctx, child, class_name);
    }
}

/// Reserved extension point; currently a pass-through regardless of the
/// gate.
fn get_unique_class_name(full_class_name: &str, use_unique: bool) -> String {
    let _ = use_unique;
    full_class_name.to_string()
}

/// Rewrite a detached, validated class node. Returns the constructor
/// function and the combined JSDoc for the declaring statement; companion
/// statements are appended to `splice.after` in insertion order.
fn rewrite_class(
    ctx: &mut TransformContext,
    class: Node,
    metadata: &ClassMetadata,
    splice: &mut Splice,
) -> (Node, JsDocInfo) {
    debug_assert_eq!(class.kind, Kind::Class);
    let class_span = class.span;
    let class_name = &metadata.full_class_name;
    let class_jsdoc = class.jsdoc.map(|b| *b);
    let mut parts = class.children.into_iter();
    let (Some(_name), Some(superclass), Some(members)) =
        (parts.next(), parts.next(), parts.next())
    else {
        unreachable!("class must have name, superclass, and member slots");
    };

    let mut new_info = class_jsdoc.unwrap_or_default();
    let mut constructor: Option<Node> = None;
    let mut ctor_info: Option<JsDocInfo> = None;
    // accessor-derived members to forward-declare, in member order
    let mut prototype_members_to_declare: IndexMap<String, JsDocInfo> = IndexMap::new();
    let mut class_members_to_declare: IndexMap<String, JsDocInfo> = IndexMap::new();
    let mut define_props_prototype = Node::object_lit(vec![]);
    let mut define_props_class = Node::object_lit(vec![]);
    let mut companions: Vec<Node> = Vec::new();

    for mut member in members.children {
        if member.is_empty_node() {
            continue;
        }
        if member.kind == Kind::MemberFunctionDef && member.string == "constructor" {
            ctor_info = member.jsdoc.take().map(|b| *b);
            let Some(mut func) = member.children.pop() else {
                unreachable!("constructor member must carry its function");
            };
            if !metadata.anonymous {
                func.children[0].string = class_name.clone();
            }
            constructor = Some(func);
        } else if matches!(member.kind, Kind::GetterDef | Kind::SetterDef) {
            let (declared, define_props) = if member.is_static_member {
                (&mut class_members_to_declare, &mut define_props_class)
            } else {
                (&mut prototype_members_to_declare, &mut define_props_prototype)
            };
            lower_accessor(ctx, member, class_name, declared, define_props);
        } else {
            companions.push(lower_method(member, class_name));
        }
    }

    if !superclass.is_empty_node() {
        let super_name = superclass
            .qualified_name_string()
            .expect("extends clause was validated as a qualified name");
        let super_type = TypeExpr::Name(super_name);
        if new_info.is_interface {
            new_info.extended_interfaces.push(super_type);
        } else {
            let mut inherits_call = Node::expr_result(Node::call(
                Node::qualified_name(INHERITS),
                vec![Node::qualified_name(class_name), superclass],
            ));
            inherits_call.use_span_if_missing_from_tree(class_span);
            // inheritance wiring goes directly after the declaring
            // statement, before the member assignments
            companions.insert(0, inherits_call);
            new_info.base_type = Some(super_type);
            ctx.set_needs_runtime();
        }
    }

    if define_props_prototype.has_children() {
        companions.push(define_properties_call(
            prototype_access(class_name),
            define_props_prototype,
            class_span,
        ));
    }
    if define_props_class.has_children() {
        companions.push(define_properties_call(
            Node::qualified_name(class_name),
            define_props_class,
            class_span,
        ));
    }
    for (member_name, info) in prototype_members_to_declare {
        companions.push(forward_declaration(
            Node::getprop(prototype_access(class_name), member_name),
            info,
            class_span,
        ));
    }
    for (member_name, info) in class_members_to_declare {
        companions.push(forward_declaration(
            Node::getprop(Node::qualified_name(class_name), member_name),
            info,
            class_span,
        ));
    }

    let mut ctor = constructor.expect("class body must contain a constructor member");
    new_info.is_constructor = true;
    if !new_info.is_unrestricted && !new_info.is_dict {
        new_info.is_struct = true;
    }
    if let Some(info) = ctor_info {
        new_info.params = info.params;
        new_info.suppressions.extend(info.suppressions);
        new_info.is_export |= info.is_export;
        new_info.is_override |= info.is_override;
    }
    ctor.use_span_if_missing_from_tree(class_span);

    splice.after.extend(companions);
    ctx.mark_code_changed();
    tracing::debug!(class = %class_name, "lowered class");
    (ctor, new_info)
}

/// Getters and setters accumulate into the per-side `Object.defineProperties`
/// object and into the forward-declaration map.
fn lower_accessor(
    ctx: &mut TransformContext,
    mut member: Node,
    class_name: &str,
    declared: &mut IndexMap<String, JsDocInfo>,
    define_props: &mut Node,
) {
    let member_name = member.string.clone();
    let type_expr = accessor_type(&member);
    match declared.get(&member_name) {
        Some(existing) if existing.type_expr.as_ref() != Some(&type_expr) => {
            ctx.report(
                &CONFLICTING_GETTER_SETTER_TYPE,
                member.span,
                &[member_name.as_str()],
            );
        }
        Some(_) => {}
        None => {
            let mut info = JsDocInfo::of_type(type_expr);
            if member.jsdoc.as_deref().is_some_and(|doc| doc.is_export) {
                info.is_export = true;
            }
            declared.insert(member_name.clone(), info);
        }
    }

    let is_getter = member.kind == Kind::GetterDef;
    let Some(mut func) = member.children.pop() else {
        unreachable!("accessor member must carry its function");
    };
    let mut func_doc = func.jsdoc.take().map(|b| *b).unwrap_or_default();
    func_doc.this_type = Some(TypeExpr::Name(class_name.to_string()));
    func.jsdoc = Some(Box::new(func_doc));

    let descriptor = descriptor_for(define_props, &member_name);
    descriptor
        .children
        .push(Node::string_key(if is_getter { "get" } else { "set" }, func));
}

/// The accessor's declared type: a getter's return type, a setter's sole
/// parameter type, or the wildcard.
fn accessor_type(member: &Node) -> TypeExpr {
    let doc = member.jsdoc.as_deref();
    let declared = if member.kind == Kind::GetterDef {
        doc.and_then(|d| d.return_type.clone())
    } else {
        doc.and_then(|d| d.sole_param_type().cloned())
    };
    declared.unwrap_or(TypeExpr::Unknown)
}

/// Find or create the `{ configurable: true, enumerable: true }` descriptor
/// for a member, so a getter/setter pair shares one.
fn descriptor_for<'a>(define_props: &'a mut Node, member_name: &str) -> &'a mut Node {
    let idx = match define_props
        .children
        .iter()
        .position(|p| p.string == member_name)
    {
        Some(idx) => idx,
        None => {
            let descriptor = Node::object_lit(vec![
                Node::string_key("configurable", Node::bool_lit(true)),
                Node::string_key("enumerable", Node::bool_lit(true)),
            ]);
            define_props
                .children
                .push(Node::string_key(member_name, descriptor));
            define_props.children.len() - 1
        }
    };
    &mut define_props.children[idx].children[0]
}

/// A regular or computed method becomes a member assignment statement.
fn lower_method(mut member: Node, class_name: &str) -> Node {
    let member_span = member.span;
    let is_static = member.is_static_member;
    let mut info = member.jsdoc.take().map(|b| *b);
    let base = if is_static {
        Node::qualified_name(class_name)
    } else {
        prototype_access(class_name)
    };
    let (access, function) = match member.kind {
        Kind::ComputedProp => {
            let mut parts = member.children.into_iter();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                unreachable!("computed member must have a key and a value");
            };
            (Node::getelem(base, key), value)
        }
        Kind::MemberFunctionDef => {
            let Some(func) = member.children.pop() else {
                unreachable!("member function must carry its function");
            };
            (Node::getprop(base, member.string), func)
        }
        _ => unreachable!("unexpected class member kind"),
    };

    // a static method whose body uses `this` refers to the constructor
    // object; leave the `this` type open for the checker
    if is_static
        && function.kind == Kind::Function
        && contains_this_reference(&function.children[2])
    {
        info.get_or_insert_with(JsDocInfo::default).this_type = Some(TypeExpr::Unknown);
    }

    let mut assign = Node::assign(access, function);
    assign.jsdoc = info.map(Box::new);
    let mut stmt = Node::expr_result(assign);
    stmt.use_span_if_missing_from_tree(member_span);
    stmt
}

fn prototype_access(class_name: &str) -> Node {
    Node::getprop(Node::qualified_name(class_name), "prototype")
}

fn define_properties_call(target: Node, props: Node, span: Span) -> Node {
    let mut stmt = Node::expr_result(Node::call(
        Node::qualified_name("Object.defineProperties"),
        vec![target, props],
    ));
    stmt.use_span_if_missing_from_tree(span);
    stmt
}

fn forward_declaration(mut access: Node, info: JsDocInfo, span: Span) -> Node {
    access.jsdoc = Some(Box::new(info));
    let mut stmt = Node::expr_result(access);
    stmt.use_span_if_missing_from_tree(span);
    stmt
}

#[cfg(test)]
#[path = "tests/class_es5.rs"]
mod tests;
