//! Compact single-line code printer.
//!
//! Renders a subtree to terse JavaScript text. Tests assert on this output
//! and tracing uses it for readable events; it is not a code generator (no
//! comments, no JSDoc, minimal whitespace, just enough parentheses to be
//! unambiguous for the shapes the pass produces).

use crate::node::{Kind, Node};

pub struct Printer {
    out: String,
}

impl Printer {
    #[must_use]
    pub fn new() -> Self {
        Printer { out: String::new() }
    }

    /// Render a node to a compact string.
    #[must_use]
    pub fn print(node: &Node) -> String {
        let mut printer = Printer::new();
        match node.kind {
            Kind::Script => printer.emit_statements(&node.children),
            _ if is_statement_kind(node.kind) => printer.emit_statement(node),
            _ => printer.emit(node),
        }
        printer.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn emit_statements(&mut self, statements: &[Node]) {
        for (i, stmt) in statements.iter().enumerate() {
            if i > 0 {
                self.write(" ");
            }
            self.emit_statement(stmt);
        }
    }

    fn emit_statement(&mut self, node: &Node) {
        match node.kind {
            Kind::Block => self.emit_block(node),
            Kind::ExprResult => {
                self.emit(&node.children[0]);
                self.write(";");
            }
            Kind::Var | Kind::Let | Kind::Const => {
                self.emit_decl(node);
                self.write(";");
            }
            Kind::Return => {
                self.write("return");
                if let Some(expr) = node.first_child() {
                    self.write(" ");
                    self.emit(expr);
                }
                self.write(";");
            }
            Kind::If => {
                self.write("if (");
                self.emit(&node.children[0]);
                self.write(") ");
                self.emit_statement(&node.children[1]);
                if let Some(alt) = node.children.get(2) {
                    self.write(" else ");
                    self.emit_statement(alt);
                }
            }
            Kind::While => {
                self.write("while (");
                self.emit(&node.children[0]);
                self.write(") ");
                self.emit_statement(&node.children[1]);
            }
            Kind::For => {
                self.write("for (");
                match node.children[0].kind {
                    Kind::Empty => {}
                    Kind::Var | Kind::Let | Kind::Const => self.emit_decl(&node.children[0]),
                    _ => self.emit(&node.children[0]),
                }
                self.write("; ");
                self.emit(&node.children[1]);
                self.write("; ");
                self.emit(&node.children[2]);
                self.write(") ");
                self.emit_statement(&node.children[3]);
            }
            Kind::ForOf => {
                self.write("for (");
                match node.children[0].kind {
                    Kind::Var | Kind::Let | Kind::Const => self.emit_decl(&node.children[0]),
                    _ => self.emit(&node.children[0]),
                }
                self.write(" of ");
                self.emit(&node.children[1]);
                self.write(") ");
                self.emit_statement(&node.children[2]);
            }
            Kind::Empty => self.write(";"),
            Kind::Script => self.emit_statements(&node.children),
            Kind::Class => self.emit_class(node),
            Kind::Function => self.emit_function(node, true),
            _ => {
                self.emit(node);
                self.write(";");
            }
        }
    }

    fn emit_decl(&mut self, node: &Node) {
        let keyword = match node.kind {
            Kind::Var => "var",
            Kind::Let => "let",
            Kind::Const => "const",
            _ => unreachable!("not a declaration"),
        };
        self.write(keyword);
        self.write(" ");
        for (i, declarator) in node.children.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&declarator.string);
            if let Some(init) = declarator.first_child() {
                self.write(" = ");
                self.emit(init);
            }
        }
    }

    fn emit_block(&mut self, node: &Node) {
        if node.children.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.emit_statements(&node.children);
        self.write(" }");
    }

    fn emit_function(&mut self, node: &Node, _declaration: bool) {
        self.write("function");
        let name = &node.children[0].string;
        if !name.is_empty() {
            self.write(" ");
            self.write(name);
        }
        self.write("(");
        self.emit_comma_separated(&node.children[1].children);
        self.write(") ");
        self.emit_block(&node.children[2]);
    }

    fn emit_class(&mut self, node: &Node) {
        self.write("class");
        if node.children[0].is_name() {
            self.write(" ");
            self.write(&node.children[0].string);
        }
        if !node.children[1].is_empty_node() {
            self.write(" extends ");
            self.emit(&node.children[1]);
        }
        self.write(" { ");
        for member in &node.children[2].children {
            self.emit_class_member(member);
            self.write(" ");
        }
        self.write("}");
    }

    fn emit_class_member(&mut self, member: &Node) {
        if member.is_static_member {
            self.write("static ");
        }
        match member.kind {
            Kind::MemberFunctionDef => {
                self.write(&member.string);
                self.emit_method_tail(&member.children[0]);
            }
            Kind::GetterDef => {
                self.write("get ");
                self.write(&member.string);
                self.emit_method_tail(&member.children[0]);
            }
            Kind::SetterDef => {
                self.write("set ");
                self.write(&member.string);
                self.emit_method_tail(&member.children[0]);
            }
            Kind::ComputedProp => {
                self.write("[");
                self.emit(&member.children[0]);
                self.write("]");
                match member.children[1].kind {
                    Kind::Function => self.emit_method_tail(&member.children[1]),
                    _ => {
                        self.write(": ");
                        self.emit(&member.children[1]);
                    }
                }
            }
            Kind::Empty => {}
            _ => self.emit(member),
        }
    }

    /// Parameters and body of a method, without the `function` keyword.
    fn emit_method_tail(&mut self, function: &Node) {
        self.write("(");
        self.emit_comma_separated(&function.children[1].children);
        self.write(") ");
        self.emit_block(&function.children[2]);
    }

    fn emit_comma_separated(&mut self, nodes: &[Node]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit(node);
        }
    }

    fn emit(&mut self, node: &Node) {
        match node.kind {
            Kind::Name => self.write(&node.string),
            Kind::This => self.write("this"),
            Kind::Number => self.write(&node.string),
            Kind::Str => {
                self.write("\"");
                let escaped = node.string.replace('\\', "\\\\").replace('"', "\\\"");
                self.write(&escaped);
                self.write("\"");
            }
            Kind::True => self.write("true"),
            Kind::False => self.write("false"),
            Kind::Null => self.write("null"),
            Kind::TemplateLit | Kind::TaggedTemplateLit => {
                self.write("`");
                self.write(&node.string);
                self.write("`");
            }
            Kind::ArrayLit => {
                self.write("[");
                self.emit_comma_separated(&node.children);
                self.write("]");
            }
            Kind::ObjectLit => self.emit_object_lit(node),
            Kind::StringKey => {
                if node.is_quoted_string {
                    self.write("\"");
                    self.write(&node.string);
                    self.write("\"");
                } else {
                    self.write(&node.string);
                }
                if let Some(value) = node.first_child() {
                    self.write(": ");
                    self.emit(value);
                }
            }
            Kind::ComputedProp => {
                self.write("[");
                self.emit(&node.children[0]);
                self.write("]: ");
                self.emit(&node.children[1]);
            }
            Kind::MemberFunctionDef => {
                self.write(&node.string);
                self.emit_method_tail(&node.children[0]);
            }
            Kind::GetterDef => {
                self.write("get ");
                self.write(&node.string);
                self.emit_method_tail(&node.children[0]);
            }
            Kind::SetterDef => {
                self.write("set ");
                self.write(&node.string);
                self.emit_method_tail(&node.children[0]);
            }
            Kind::GetProp => {
                self.emit_accessed(&node.children[0]);
                self.write(".");
                self.write(&node.string);
            }
            Kind::GetElem => {
                self.emit_accessed(&node.children[0]);
                self.write("[");
                self.emit(&node.children[1]);
                self.write("]");
            }
            Kind::Call => {
                self.emit_callee(&node.children[0], false);
                self.write("(");
                self.emit_comma_separated(&node.children[1..]);
                self.write(")");
            }
            Kind::New => {
                self.write("new ");
                self.emit_callee(&node.children[0], true);
                self.write("(");
                self.emit_comma_separated(&node.children[1..]);
                self.write(")");
            }
            Kind::Assign => {
                self.emit(&node.children[0]);
                self.write(" = ");
                self.emit(&node.children[1]);
            }
            Kind::Comma => {
                self.write("(");
                self.emit(&node.children[0]);
                self.write(", ");
                self.emit(&node.children[1]);
                self.write(")");
            }
            Kind::Not => {
                self.write("!");
                let operand = &node.children[0];
                if matches!(operand.kind, Kind::Assign | Kind::Lt | Kind::Sub) {
                    self.write("(");
                    self.emit(operand);
                    self.write(")");
                } else {
                    self.emit(operand);
                }
            }
            Kind::Inc => {
                self.write("++");
                self.emit(&node.children[0]);
            }
            Kind::Lt => {
                self.emit(&node.children[0]);
                self.write(" < ");
                self.emit(&node.children[1]);
            }
            Kind::Sub => {
                self.emit(&node.children[0]);
                self.write(" - ");
                self.emit(&node.children[1]);
            }
            Kind::Function => self.emit_function(node, false),
            Kind::ParamList => self.emit_comma_separated(&node.children),
            Kind::Rest => {
                self.write("...");
                self.write(&node.string);
            }
            Kind::Spread => {
                self.write("...");
                self.emit(&node.children[0]);
            }
            Kind::Class => self.emit_class(node),
            Kind::ClassMembers => self.emit_comma_separated(&node.children),
            Kind::Empty => {}
            _ => self.emit_statement(node),
        }
    }

    /// Object position of a property/element access.
    fn emit_accessed(&mut self, object: &Node) {
        if matches!(object.kind, Kind::Assign | Kind::Function) {
            self.write("(");
            self.emit(object);
            self.write(")");
        } else {
            self.emit(object);
        }
    }

    /// Callee position of a call or `new`.
    fn emit_callee(&mut self, callee: &Node, in_new: bool) {
        let needs_parens = match callee.kind {
            Kind::Assign | Kind::Comma | Kind::Function => true,
            // `new (Function.prototype.bind.apply)(...)`
            Kind::GetProp | Kind::GetElem => in_new,
            _ => false,
        };
        if needs_parens {
            self.write("(");
            self.emit(callee);
            self.write(")");
        } else {
            self.emit(callee);
        }
    }

    fn emit_object_lit(&mut self, node: &Node) {
        if node.children.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.emit_comma_separated(&node.children);
        self.write(" }");
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_statement_kind(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Block
            | Kind::ExprResult
            | Kind::Var
            | Kind::Let
            | Kind::Const
            | Kind::Return
            | Kind::If
            | Kind::While
            | Kind::For
            | Kind::ForOf
            | Kind::Empty
    )
}

#[cfg(test)]
#[path = "tests/printer_tests.rs"]
mod tests;
