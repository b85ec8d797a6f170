//! `LoweringPass` - driver for the down-leveling rewrites
//!
//! The driver walks the tree in document order with an explicit enter/leave
//! split. The enter hook runs the rewrites whose results must be visible
//! before children are descended into (rest parameters, so the original rest
//! name is gone before the body is visited) and gates descent (getter/setter
//! definitions are rejected outright for ES3 output). The leave hook
//! dispatches the post-order rewriters.
//!
//! Statement lists are lowered by a splice-aware loop: rewriters deep in an
//! expression can request statements to be inserted before or after the
//! enclosing statement (hoisted temporaries, class companion statements),
//! and the loop splices them into the nearest enclosing list. Inserted
//! statements are already lowered and are not revisited.

use downlevel_ast::node::{Kind, Node};
use downlevel_common::common::LanguageMode;
use downlevel_common::diagnostics::CANNOT_CONVERT;

use crate::transform_context::TransformContext;
use crate::{class_es5, computed_props_es5, for_of_es5, object_shorthand_es5, rest_params_es5, spread_es5};

/// Statements a rewriter wants spliced around the enclosing statement.
#[derive(Debug, Default)]
pub(crate) struct Splice {
    /// Inserted immediately before the enclosing statement, in order.
    pub before: Vec<Node>,
    /// Inserted immediately after the enclosing statement, in order.
    pub after: Vec<Node>,
}

/// Syntactic position of the node being visited, threaded down from the
/// parent. This is what the class rewriter classifies against and what keeps
/// the object-shorthand rewriter from firing on class members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodePos {
    /// Direct child of a statement list.
    Statement,
    /// The expression of an expression statement.
    StatementExpr,
    /// A declarator name under a `var`/`let`/`const` statement.
    Declarator,
    /// The initializer of such a declarator.
    DeclaratorInit,
    /// The right-hand side of an assignment that is itself an expression
    /// statement.
    AssignRhs,
    /// A member of an object literal.
    ObjectMember,
    /// A member of a class body.
    ClassMember,
    Other,
}

/// The down-leveling pass. Holds the compilation context exclusively for the
/// duration of `process`/`hot_swap_script`.
pub struct LoweringPass<'a> {
    ctx: &'a mut TransformContext,
}

impl<'a> LoweringPass<'a> {
    #[must_use]
    pub fn new(ctx: &'a mut TransformContext) -> Self {
        LoweringPass { ctx }
    }

    /// Lower the externs root (if any) and the program root, in that order.
    pub fn process(&mut self, externs: Option<&mut Node>, root: &mut Node) {
        if let Some(externs) = externs {
            self.lower_root(externs);
        }
        self.lower_root(root);
    }

    /// Lower a single script root (incremental recompilation).
    pub fn hot_swap_script(&mut self, script: &mut Node) {
        self.lower_root(script);
    }

    fn lower_root(&mut self, root: &mut Node) {
        debug_assert!(
            matches!(root.kind, Kind::Script | Kind::Block),
            "pass roots must be scripts"
        );
        tracing::debug!(statements = root.children.len(), "lowering root");
        self.lower_statement_list(&mut root.children);
    }

    fn lower_statement_list(&mut self, statements: &mut Vec<Node>) {
        let mut i = 0;
        while i < statements.len() {
            let mut splice = Splice::default();
            self.lower_node(&mut statements[i], NodePos::Statement, &mut splice);
            class_es5::maybe_lower_class_statement(self.ctx, &mut statements[i], &mut splice);

            let Splice { before, after } = splice;
            let before_len = before.len();
            for (offset, stmt) in before.into_iter().enumerate() {
                statements.insert(i + offset, stmt);
            }
            i += before_len;
            let mut insert_at = i + 1;
            for stmt in after {
                statements.insert(insert_at, stmt);
                insert_at += 1;
            }
            // inserted statements are synthesized pre-lowered; skip them
            i = insert_at;
        }
    }

    fn lower_node(&mut self, node: &mut Node, pos: NodePos, splice: &mut Splice) {
        if !self.enter(node, splice) {
            return;
        }
        match node.kind {
            // statement lists get their own splice scope
            Kind::Script | Kind::Block => self.lower_statement_list(&mut node.children),
            _ => {
                let parent_kind = node.kind;
                for idx in 0..node.children.len() {
                    let child_pos = child_pos(parent_kind, pos, idx);
                    self.lower_node(&mut node.children[idx], child_pos, splice);
                }
            }
        }
        self.leave(node, pos, splice);
    }

    /// Pre-order gate. Returns whether to descend into the node.
    fn enter(&mut self, node: &mut Node, _splice: &mut Splice) -> bool {
        match node.kind {
            Kind::Function => {
                class_es5::check_class_reassignment(self.ctx, node);
                rest_params_es5::lower_rest_parameters(self.ctx, node);
                true
            }
            Kind::GetterDef | Kind::SetterDef
                if self.ctx.options.language_out == LanguageMode::ES3 =>
            {
                self.ctx
                    .report(&CANNOT_CONVERT, node.span, &["ES5 getters/setters"]);
                false
            }
            _ => true,
        }
    }

    /// Post-order visit. Children are already lowered.
    fn leave(&mut self, node: &mut Node, pos: NodePos, splice: &mut Splice) {
        match node.kind {
            Kind::StringKey => object_shorthand_es5::expand_shorthand(self.ctx, node),
            Kind::MemberFunctionDef if pos == NodePos::ObjectMember => {
                object_shorthand_es5::lower_member_function(self.ctx, node);
            }
            Kind::ObjectLit if node.has_computed_prop_child() => {
                computed_props_es5::lower(self.ctx, node, splice);
            }
            Kind::ForOf => for_of_es5::lower(self.ctx, node),
            Kind::ArrayLit | Kind::Call | Kind::New if node.has_spread_child() => {
                spread_es5::lower(self.ctx, node, splice);
            }
            Kind::Class => {
                // legal class positions are rewritten by the statement loop
                // after this visit; anything else has no ES5 rendering
                if !matches!(
                    pos,
                    NodePos::Statement | NodePos::AssignRhs | NodePos::DeclaratorInit
                ) {
                    self.ctx.report(
                        &CANNOT_CONVERT,
                        node.span,
                        &[class_es5::CLASS_POSITION_DETAIL],
                    );
                }
            }
            // template literals are a separate pass's concern
            Kind::TemplateLit | Kind::TaggedTemplateLit => {}
            _ => {}
        }
    }
}

fn child_pos(parent_kind: Kind, parent_pos: NodePos, idx: usize) -> NodePos {
    match parent_kind {
        Kind::ExprResult if parent_pos == NodePos::Statement => NodePos::StatementExpr,
        Kind::Assign if parent_pos == NodePos::StatementExpr && idx == 1 => NodePos::AssignRhs,
        Kind::Var | Kind::Let | Kind::Const if parent_pos == NodePos::Statement => {
            NodePos::Declarator
        }
        Kind::Name if parent_pos == NodePos::Declarator && idx == 0 => NodePos::DeclaratorInit,
        Kind::ObjectLit => NodePos::ObjectMember,
        Kind::ClassMembers => NodePos::ClassMember,
        _ => NodePos::Other,
    }
}

#[cfg(test)]
#[path = "tests/lowering_pass_unit.rs"]
mod tests;
