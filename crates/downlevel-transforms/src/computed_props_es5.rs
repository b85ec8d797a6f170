//! Computed-property lowering for object literals.
//!
//! `{ a: 1, [k]: v }` hoists the literal into a fresh temporary declared
//! before the enclosing statement, and the original position becomes a comma
//! chain that assigns each property and evaluates to the temporary:
//!
//! ```text
//! var $jscomp$compprop0 = {};
//! ... ($jscomp$compprop0.a = 1, ($jscomp$compprop0[k] = v, $jscomp$compprop0)) ...
//! ```
//!
//! Properties fold in reverse so the assignments evaluate in source order.
//! Non-computed keys assign through `.name`, or `["name"]` when the key was
//! quoted. Getter/setter members with plain keys stay inside the hoisted
//! literal; a getter/setter with a *computed* key has no rendering yet.

use downlevel_ast::node::{Kind, Node};
use downlevel_common::diagnostics::CANNOT_CONVERT_YET;

use crate::lowering_pass::Splice;
use crate::transform_context::{FRESH_COMP_PROP_VAR, TransformContext};

pub(crate) fn lower(ctx: &mut TransformContext, obj: &mut Node, splice: &mut Splice) {
    debug_assert_eq!(obj.kind, Kind::ObjectLit);
    debug_assert!(obj.has_computed_prop_child());

    for member in &obj.children {
        if member.kind == Kind::ComputedProp
            && (member.is_computed_prop_getter || member.is_computed_prop_setter)
        {
            ctx.report(&CANNOT_CONVERT_YET, member.span, &["computed getter/setter"]);
            return;
        }
    }

    let span = obj.span;
    let obj_name = format!("{FRESH_COMP_PROP_VAR}{}", ctx.next_unique_id());

    // plain-keyed getters/setters stay behind in the hoisted literal
    let mut moved = Vec::new();
    let mut retained = Vec::new();
    for member in std::mem::take(&mut obj.children) {
        match member.kind {
            Kind::GetterDef | Kind::SetterDef => retained.push(member),
            _ => moved.push(member),
        }
    }
    obj.children = retained;

    let mut result = Node::name(&obj_name);
    for prop in moved.into_iter().rev() {
        let assignment = match prop.kind {
            Kind::ComputedProp => {
                let mut parts = prop.children.into_iter();
                let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                    unreachable!("computed property must have a key and a value");
                };
                Node::assign(Node::getelem(Node::name(&obj_name), key), value)
            }
            Kind::StringKey => {
                let key_text = prop.string;
                let quoted = prop.is_quoted_string;
                let value = prop
                    .children
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| Node::name(&key_text));
                let access = if quoted {
                    Node::getelem(Node::name(&obj_name), Node::string(&key_text))
                } else {
                    Node::getprop(Node::name(&obj_name), &*key_text)
                };
                Node::assign(access, value)
            }
            _ => unreachable!("object literal members are string keys or computed props"),
        };
        result = Node::comma(assignment, result);
    }
    result.use_span_if_missing_from_tree(span);

    // var $jscomp$compprop0 = { <retained accessors> };
    let hoisted = std::mem::replace(obj, result);
    let mut decl = Node::var_decl(&obj_name, Some(hoisted));
    decl.use_span_if_missing_from_tree(span);
    splice.before.push(decl);

    ctx.mark_code_changed();
    tracing::debug!(temp = %obj_name, "lowered computed properties");
}

#[cfg(test)]
#[path = "tests/computed_props_es5.rs"]
mod tests;
