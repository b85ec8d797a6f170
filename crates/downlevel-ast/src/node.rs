//! The AST node type and its builder constructors.
//!
//! A `Node` is a kind tag plus an ordered child list, a string payload
//! (identifier text, property names, literal text), boolean flags, a source
//! span, and an optional JSDoc record. Every non-root node is exclusively
//! owned by its parent; detaching a child and re-attaching it elsewhere is a
//! plain move.
//!
//! Child conventions per kind (the closed shapes rewriters rely on):
//!
//! - `Name`: payload is the identifier; an optional single child is the
//!   declarator initializer (only under `Var`/`Let`/`Const`).
//! - `GetProp`: one child (the object); payload is the property name.
//! - `GetElem`: two children (object, key expression).
//! - `Call`/`New`: callee followed by arguments.
//! - `Function`: three children (`Name`, `ParamList`, `Block`).
//! - `Class`: three children (name or `Empty`, superclass or `Empty`,
//!   `ClassMembers`).
//! - `MemberFunctionDef`/`GetterDef`/`SetterDef`: payload is the member
//!   name, single child is the `Function`.
//! - `ComputedProp`: two children (key expression, value).
//! - `StringKey`: payload is the key; one child (the value) or none for
//!   the shorthand form.
//! - `Var`/`Let`/`Const`: `Name` declarator children.
//! - `For`: four children (init, condition, increment, body).
//! - `ForOf`: three children (loop target, iterable, body).
//! - `Rest`: payload is the parameter name, no children.
//! - `Spread`: one child (the spread expression).

use downlevel_common::span::Span;

use crate::jsdoc::JsDocInfo;

/// The closed set of node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    // Expressions and literals
    Name,
    This,
    Number,
    Str,
    True,
    False,
    Null,
    ArrayLit,
    ObjectLit,
    StringKey,
    TemplateLit,
    TaggedTemplateLit,
    GetProp,
    GetElem,
    Call,
    New,
    Assign,
    Comma,
    Not,
    Inc,
    Lt,
    Sub,
    Function,
    ParamList,

    // Statements
    Script,
    Block,
    ExprResult,
    Var,
    Let,
    Const,
    Return,
    If,
    While,
    For,
    Empty,

    // Newer-dialect constructs (removed by the pass)
    Class,
    ClassMembers,
    MemberFunctionDef,
    GetterDef,
    SetterDef,
    ComputedProp,
    Rest,
    Spread,
    ForOf,
}

/// A single AST node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: Kind,
    /// String payload: identifier text, property name, or literal text.
    pub string: String,
    pub children: Vec<Node>,
    pub span: Span,
    pub jsdoc: Option<Box<JsDocInfo>>,

    // Flags
    pub is_static_member: bool,
    pub is_computed_prop_getter: bool,
    pub is_computed_prop_setter: bool,
    pub is_computed_prop_variable: bool,
    pub is_quoted_string: bool,
    pub is_var_args: bool,
}

impl Node {
    /// Create a bare node of the given kind with a dummy span.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Node {
            kind,
            string: String::new(),
            children: Vec::new(),
            span: Span::dummy(),
            jsdoc: None,
            is_static_member: false,
            is_computed_prop_getter: false,
            is_computed_prop_setter: false,
            is_computed_prop_variable: false,
            is_quoted_string: false,
            is_var_args: false,
        }
    }

    fn with_string(kind: Kind, string: impl Into<String>) -> Self {
        let mut node = Node::new(kind);
        node.string = string.into();
        node
    }

    fn with_children(kind: Kind, children: Vec<Node>) -> Self {
        let mut node = Node::new(kind);
        node.children = children;
        node
    }

    // =========================================================================
    // Builder constructors
    // =========================================================================

    /// `foo`
    #[must_use]
    pub fn name(text: impl Into<String>) -> Self {
        Node::with_string(Kind::Name, text)
    }

    /// `this`
    #[must_use]
    pub fn this_ref() -> Self {
        Node::new(Kind::This)
    }

    /// Numeric literal; the payload keeps the source text.
    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Node::with_string(Kind::Number, text)
    }

    /// String literal.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Node::with_string(Kind::Str, text)
    }

    /// `true` / `false`
    #[must_use]
    pub fn bool_lit(value: bool) -> Self {
        Node::new(if value { Kind::True } else { Kind::False })
    }

    /// `null`
    #[must_use]
    pub fn null_lit() -> Self {
        Node::new(Kind::Null)
    }

    /// Object-literal string key `key: value`.
    #[must_use]
    pub fn string_key(key: impl Into<String>, value: Node) -> Self {
        let mut node = Node::with_string(Kind::StringKey, key);
        node.children.push(value);
        node
    }

    /// Shorthand object-literal string key `{ key }` (no value child).
    #[must_use]
    pub fn shorthand_key(key: impl Into<String>) -> Self {
        Node::with_string(Kind::StringKey, key)
    }

    /// `[e1, e2, ...]`
    #[must_use]
    pub fn array_lit(elements: Vec<Node>) -> Self {
        Node::with_children(Kind::ArrayLit, elements)
    }

    /// `{ p1, p2, ... }`
    #[must_use]
    pub fn object_lit(props: Vec<Node>) -> Self {
        Node::with_children(Kind::ObjectLit, props)
    }

    /// `callee(args...)`
    #[must_use]
    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        let mut children = vec![callee];
        children.extend(args);
        Node::with_children(Kind::Call, children)
    }

    /// `new ctor(args...)`
    #[must_use]
    pub fn new_expr(ctor: Node, args: Vec<Node>) -> Self {
        let mut children = vec![ctor];
        children.extend(args);
        Node::with_children(Kind::New, children)
    }

    /// `object.prop`
    #[must_use]
    pub fn getprop(object: Node, prop: impl Into<String>) -> Self {
        let mut node = Node::with_string(Kind::GetProp, prop);
        node.children.push(object);
        node
    }

    /// `object[key]`
    #[must_use]
    pub fn getelem(object: Node, key: Node) -> Self {
        Node::with_children(Kind::GetElem, vec![object, key])
    }

    /// `target = value`
    #[must_use]
    pub fn assign(target: Node, value: Node) -> Self {
        Node::with_children(Kind::Assign, vec![target, value])
    }

    /// `(left, right)`
    #[must_use]
    pub fn comma(left: Node, right: Node) -> Self {
        Node::with_children(Kind::Comma, vec![left, right])
    }

    /// `!operand`
    #[must_use]
    pub fn not(operand: Node) -> Self {
        Node::with_children(Kind::Not, vec![operand])
    }

    /// `++operand`
    #[must_use]
    pub fn inc(operand: Node) -> Self {
        Node::with_children(Kind::Inc, vec![operand])
    }

    /// `left < right`
    #[must_use]
    pub fn lt(left: Node, right: Node) -> Self {
        Node::with_children(Kind::Lt, vec![left, right])
    }

    /// `left - right`
    #[must_use]
    pub fn sub(left: Node, right: Node) -> Self {
        Node::with_children(Kind::Sub, vec![left, right])
    }

    /// `function name(params...) body`
    #[must_use]
    pub fn function(name: impl Into<String>, params: Vec<Node>, body: Node) -> Self {
        debug_assert_eq!(body.kind, Kind::Block);
        Node::with_children(
            Kind::Function,
            vec![Node::name(name), Node::param_list(params), body],
        )
    }

    #[must_use]
    pub fn param_list(params: Vec<Node>) -> Self {
        Node::with_children(Kind::ParamList, params)
    }

    /// Rest parameter `...name`.
    #[must_use]
    pub fn rest(name: impl Into<String>) -> Self {
        Node::with_string(Kind::Rest, name)
    }

    /// Spread element `...expr`.
    #[must_use]
    pub fn spread(expr: Node) -> Self {
        Node::with_children(Kind::Spread, vec![expr])
    }

    #[must_use]
    pub fn script(statements: Vec<Node>) -> Self {
        Node::with_children(Kind::Script, statements)
    }

    #[must_use]
    pub fn block(statements: Vec<Node>) -> Self {
        Node::with_children(Kind::Block, statements)
    }

    /// `expr;`
    #[must_use]
    pub fn expr_result(expr: Node) -> Self {
        Node::with_children(Kind::ExprResult, vec![expr])
    }

    /// `return expr;` / `return;`
    #[must_use]
    pub fn ret(expr: Option<Node>) -> Self {
        Node::with_children(Kind::Return, expr.into_iter().collect())
    }

    /// Declaration statement of the given kind with a single declarator.
    #[must_use]
    pub fn decl(kind: Kind, name: impl Into<String>, init: Option<Node>) -> Self {
        debug_assert!(matches!(kind, Kind::Var | Kind::Let | Kind::Const));
        let mut declarator = Node::name(name);
        declarator.children.extend(init);
        Node::with_children(kind, vec![declarator])
    }

    /// `var name = init;`
    #[must_use]
    pub fn var_decl(name: impl Into<String>, init: Option<Node>) -> Self {
        Node::decl(Kind::Var, name, init)
    }

    /// `let name = init;`
    #[must_use]
    pub fn let_decl(name: impl Into<String>, init: Option<Node>) -> Self {
        Node::decl(Kind::Let, name, init)
    }

    /// `for (init; cond; incr) body`
    #[must_use]
    pub fn for_stmt(init: Node, cond: Node, incr: Node, body: Node) -> Self {
        debug_assert_eq!(body.kind, Kind::Block);
        Node::with_children(Kind::For, vec![init, cond, incr, body])
    }

    /// `for (target of iterable) body`
    #[must_use]
    pub fn for_of(target: Node, iterable: Node, body: Node) -> Self {
        debug_assert_eq!(body.kind, Kind::Block);
        Node::with_children(Kind::ForOf, vec![target, iterable, body])
    }

    #[must_use]
    pub fn empty() -> Self {
        Node::new(Kind::Empty)
    }

    /// `class name extends superclass { members }`; `name`/`superclass` are
    /// `Empty` when absent.
    #[must_use]
    pub fn class(name: Option<Node>, superclass: Option<Node>, members: Vec<Node>) -> Self {
        Node::with_children(
            Kind::Class,
            vec![
                name.unwrap_or_else(Node::empty),
                superclass.unwrap_or_else(Node::empty),
                Node::with_children(Kind::ClassMembers, members),
            ],
        )
    }

    #[must_use]
    pub fn member_function_def(name: impl Into<String>, function: Node) -> Self {
        debug_assert_eq!(function.kind, Kind::Function);
        let mut node = Node::with_string(Kind::MemberFunctionDef, name);
        node.children.push(function);
        node
    }

    #[must_use]
    pub fn getter_def(name: impl Into<String>, function: Node) -> Self {
        debug_assert_eq!(function.kind, Kind::Function);
        let mut node = Node::with_string(Kind::GetterDef, name);
        node.children.push(function);
        node
    }

    #[must_use]
    pub fn setter_def(name: impl Into<String>, function: Node) -> Self {
        debug_assert_eq!(function.kind, Kind::Function);
        let mut node = Node::with_string(Kind::SetterDef, name);
        node.children.push(function);
        node
    }

    /// `[key]: value` object-literal or class member.
    #[must_use]
    pub fn computed_prop(key: Node, value: Node) -> Self {
        Node::with_children(Kind::ComputedProp, vec![key, value])
    }

    /// Build a `GetProp` chain from a dotted name like `"$jscomp.inherits"`.
    #[must_use]
    pub fn qualified_name(dotted: &str) -> Self {
        let mut parts = dotted.split('.');
        let first = parts.next().unwrap_or_default();
        let mut node = Node::name(first);
        for part in parts {
            node = Node::getprop(node, part);
        }
        node
    }

    // =========================================================================
    // Builder combinators
    // =========================================================================

    /// Attach a span (chained form).
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Attach a JSDoc record (chained form).
    #[must_use]
    pub fn with_jsdoc(mut self, jsdoc: JsDocInfo) -> Self {
        self.jsdoc = Some(Box::new(jsdoc));
        self
    }

    // =========================================================================
    // Accessors and predicates
    // =========================================================================

    #[must_use]
    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    #[must_use]
    pub fn last_child(&self) -> Option<&Node> {
        self.children.last()
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[must_use]
    pub fn is_name(&self) -> bool {
        self.kind == Kind::Name
    }

    #[must_use]
    pub fn is_empty_node(&self) -> bool {
        self.kind == Kind::Empty
    }

    #[must_use]
    pub fn is_spread(&self) -> bool {
        self.kind == Kind::Spread
    }

    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(self.kind, Kind::Var | Kind::Let | Kind::Const)
    }

    /// Whether any direct child is a spread element.
    #[must_use]
    pub fn has_spread_child(&self) -> bool {
        self.children.iter().any(Node::is_spread)
    }

    /// Whether any direct child is a computed property.
    #[must_use]
    pub fn has_computed_prop_child(&self) -> bool {
        self.children
            .iter()
            .any(|c| c.kind == Kind::ComputedProp)
    }

    /// A dotted identifier chain treated as a single name: `a`, `a.b.c`,
    /// `this.x`.
    #[must_use]
    pub fn is_qualified_name(&self) -> bool {
        match self.kind {
            Kind::Name => true,
            Kind::This => true,
            Kind::GetProp => self.children[0].is_qualified_name(),
            _ => false,
        }
    }

    /// Render a qualified name back to its dotted form.
    #[must_use]
    pub fn qualified_name_string(&self) -> Option<String> {
        match self.kind {
            Kind::Name => Some(self.string.clone()),
            Kind::This => Some("this".to_string()),
            Kind::GetProp => {
                let base = self.children[0].qualified_name_string()?;
                Some(format!("{base}.{}", self.string))
            }
            _ => None,
        }
    }

    /// Structural comparison against a dotted name.
    #[must_use]
    pub fn matches_qualified_name(&self, dotted: &str) -> bool {
        match self.kind {
            Kind::Name => self.string == dotted,
            Kind::GetProp => match dotted.rsplit_once('.') {
                Some((base, prop)) => {
                    self.string == prop && self.children[0].matches_qualified_name(base)
                }
                None => false,
            },
            Kind::This => dotted == "this",
            _ => false,
        }
    }

    // =========================================================================
    // Source-info maintenance
    // =========================================================================

    /// Copy the span of `other` onto this node if this node has none.
    pub fn use_span_if_missing_from(&mut self, other: &Node) {
        if self.span.is_dummy() {
            self.span = other.span;
        }
    }

    /// Whole-subtree fill-in: give every descendant lacking a span the given
    /// one. Nodes that already carry a span keep it.
    pub fn use_span_if_missing_from_tree(&mut self, span: Span) {
        if self.span.is_dummy() {
            self.span = span;
        }
        for child in &mut self.children {
            child.use_span_if_missing_from_tree(span);
        }
    }

    /// Whether any node in this subtree still lacks a span.
    #[must_use]
    pub fn has_dummy_span_in_tree(&self) -> bool {
        self.span.is_dummy() || self.children.iter().any(Node::has_dummy_span_in_tree)
    }

    /// Whether any node of the given kind remains in this subtree.
    #[must_use]
    pub fn contains_kind(&self, kind: Kind) -> bool {
        self.kind == kind || self.children.iter().any(|c| c.contains_kind(kind))
    }
}

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod tests;
