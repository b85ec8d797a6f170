//! Rest-parameter lowering.
//!
//! Runs on function *entry*, before the body is descended into, so no later
//! rewrite ever sees the rest form of the name. The rest node stays in the
//! parameter list as a plain var-args name — parameter arity and JSDoc stay
//! aligned for later passes — and the body collects the trailing arguments:
//!
//! ```text
//! var $jscomp$restParams = [];
//! for (var $jscomp$restIndex = N; $jscomp$restIndex < arguments.length;
//!      ++$jscomp$restIndex) {
//!   $jscomp$restParams[$jscomp$restIndex - N] = arguments[$jscomp$restIndex];
//! }
//! { let rest = $jscomp$restParams; <original body> }
//! ```

use downlevel_ast::jsdoc::{JsDocInfo, TypeExpr};
use downlevel_ast::node::{Kind, Node};
use downlevel_common::diagnostics::BAD_REST_PARAMETER_ANNOTATION;

use crate::transform_context::{REST_INDEX_VAR, REST_PARAMS_VAR, TransformContext};

pub(crate) fn lower_rest_parameters(ctx: &mut TransformContext, function: &mut Node) {
    debug_assert_eq!(function.kind, Kind::Function);
    let param_list = &function.children[1];
    if !param_list.last_child().is_some_and(|p| p.kind == Kind::Rest) {
        return;
    }

    // the rest parameter is always the last formal
    let rest_index = function.children[1].children.len() - 1;
    let rest_span;
    let rest_name;
    {
        let rest = &mut function.children[1].children[rest_index];
        rest.kind = Kind::Name;
        rest.is_var_args = true;
        rest_span = rest.span;
        rest_name = rest.string.clone();
    }
    ctx.mark_code_changed();

    // A declared type for the rest formal must be a `...T` annotation.
    let mut element_type: Option<TypeExpr> = None;
    if let Some(declared) = function
        .jsdoc
        .as_deref()
        .and_then(|doc| doc.param_type(&rest_name))
    {
        match declared.rest_inner() {
            Some(inner) => element_type = Some(inner.clone()),
            None => {
                ctx.report(&BAD_REST_PARAMETER_ANNOTATION, rest_span, &[]);
                element_type = Some(declared.clone());
            }
        }
    }

    let body = &mut function.children[2];
    debug_assert_eq!(body.kind, Kind::Block);
    if body.children.is_empty() {
        return;
    }
    let original_body = std::mem::take(&mut body.children);
    let position = rest_index.to_string();

    // var $jscomp$restParams = [];
    let collect_decl = Node::var_decl(REST_PARAMS_VAR, Some(Node::array_lit(vec![])));

    // for (var $jscomp$restIndex = N; $jscomp$restIndex < arguments.length;
    //      ++$jscomp$restIndex) { ... }
    let copy_stmt = Node::expr_result(Node::assign(
        Node::getelem(
            Node::name(REST_PARAMS_VAR),
            Node::sub(Node::name(REST_INDEX_VAR), Node::number(&position)),
        ),
        Node::getelem(Node::name("arguments"), Node::name(REST_INDEX_VAR)),
    ));
    let collect_loop = Node::for_stmt(
        Node::var_decl(REST_INDEX_VAR, Some(Node::number(&position))),
        Node::lt(
            Node::name(REST_INDEX_VAR),
            Node::getprop(Node::name("arguments"), "length"),
        ),
        Node::inc(Node::name(REST_INDEX_VAR)),
        Node::block(vec![copy_stmt]),
    );

    // { let rest = $jscomp$restParams; <original body> }
    let mut rest_decl = Node::decl(Kind::Let, &rest_name, Some(Node::name(REST_PARAMS_VAR)));
    rest_decl.children[0].jsdoc = Some(Box::new(JsDocInfo::of_type(TypeExpr::NonNullArray(
        Box::new(element_type.unwrap_or(TypeExpr::Unknown)),
    ))));
    let mut inner_block = Node::block(vec![rest_decl]);
    inner_block.children.extend(original_body);

    body.children = vec![collect_decl, collect_loop, inner_block];
    let fill = if rest_span.is_dummy() { function.span } else { rest_span };
    body.use_span_if_missing_from_tree(fill);
    tracing::debug!(name = %rest_name, index = rest_index, "lowered rest parameter");
}

#[cfg(test)]
#[path = "tests/rest_params_es5.rs"]
mod tests;
