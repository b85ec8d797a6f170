//! Diagnostic types and the message table for the downlevel pass.
//!
//! All failures of the pass are diagnostics keyed to the span of the node
//! that could not be converted; none abort the pass. The message table is a
//! closed set: each entry has a stable string key, a category, and a message
//! template with `{0}`-style placeholders.

use serde::Serialize;

use crate::span::Span;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
}

/// A diagnostic produced by the pass, attached to a source span.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    /// Stable key of the message definition (e.g. `"CANNOT_CONVERT"`).
    pub key: &'static str,
    pub category: DiagnosticCategory,
    pub span: Span,
    pub message_text: String,
}

impl Diagnostic {
    /// Instantiate a message definition at a span, filling placeholders.
    #[must_use]
    pub fn new(message: &DiagnosticMessage, span: Span, args: &[&str]) -> Self {
        Self {
            key: message.key,
            category: message.category,
            span,
            message_text: format_message(message.message, args),
        }
    }

    /// Check if this diagnostic is an error (as opposed to a warning).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.category, DiagnosticCategory::Error)
    }
}

/// A diagnostic message definition with key, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub key: &'static str,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

// =============================================================================
// Message table
// =============================================================================

/// A construct has no equivalent in the output dialect.
pub const CANNOT_CONVERT: DiagnosticMessage = DiagnosticMessage {
    key: "CANNOT_CONVERT",
    category: DiagnosticCategory::Error,
    message: "This code cannot be converted from ES6. {0}",
};

/// A construct is convertible in principle but unimplemented.
pub const CANNOT_CONVERT_YET: DiagnosticMessage = DiagnosticMessage {
    key: "CANNOT_CONVERT_YET",
    category: DiagnosticCategory::Error,
    message: "ES6 transpilation of '{0}' is not yet implemented.",
};

pub const DYNAMIC_EXTENDS_TYPE: DiagnosticMessage = DiagnosticMessage {
    key: "DYNAMIC_EXTENDS_TYPE",
    category: DiagnosticCategory::Error,
    message: "The class in an extends clause must be a qualified name.",
};

pub const CLASS_REASSIGNMENT: DiagnosticMessage = DiagnosticMessage {
    key: "CLASS_REASSIGNMENT",
    category: DiagnosticCategory::Error,
    message: "Class names defined inside a function cannot be reassigned.",
};

pub const CONFLICTING_GETTER_SETTER_TYPE: DiagnosticMessage = DiagnosticMessage {
    key: "CONFLICTING_GETTER_SETTER_TYPE",
    category: DiagnosticCategory::Error,
    message: "The types of the getter and setter for property '{0}' do not match.",
};

pub const BAD_REST_PARAMETER_ANNOTATION: DiagnosticMessage = DiagnosticMessage {
    key: "BAD_REST_PARAMETER_ANNOTATION",
    category: DiagnosticCategory::Warning,
    message: "Missing \"...\" in type annotation for rest parameter.",
};

/// The closed set of messages this pass can produce.
pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    CANNOT_CONVERT,
    CANNOT_CONVERT_YET,
    DYNAMIC_EXTENDS_TYPE,
    CLASS_REASSIGNMENT,
    CONFLICTING_GETTER_SETTER_TYPE,
    BAD_REST_PARAMETER_ANNOTATION,
];

/// Look up a diagnostic message definition by key.
#[must_use]
pub fn get_diagnostic_message(key: &str) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.key == key)
}

#[cfg(test)]
#[path = "tests/diagnostics.rs"]
mod tests;
