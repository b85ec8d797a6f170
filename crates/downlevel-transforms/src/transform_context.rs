//! `TransformContext` - Shared state for the down-leveling pass
//!
//! This groups the per-compilation state the rewriters need — output dialect,
//! unique-id supplier, runtime-helper flag, code-changed flag, and collected
//! diagnostics — into one object passed to the pass, so rewriters never reach
//! for ambient globals. The context is owned by the enclosing compiler
//! instance and lives for the whole compilation run.

use downlevel_common::common::LanguageMode;
use downlevel_common::diagnostics::{Diagnostic, DiagnosticMessage};
use downlevel_common::span::Span;

/// Qualified name of the runtime helper that wires prototype inheritance.
pub const INHERITS: &str = "$jscomp.inherits";

/// Qualified name of the runtime helper that adapts a value to the iterator
/// protocol (`next()` returning `{value, done}`).
pub const MAKE_ITERATOR: &str = "$jscomp.makeIterator";

// Reserved temporary name prefixes. Input programs must not use these.
pub const ITER_VAR_PREFIX: &str = "$jscomp$iter$";
pub const KEY_VAR_PREFIX: &str = "$jscomp$key$";
pub const REST_PARAMS_VAR: &str = "$jscomp$restParams";
pub const REST_INDEX_VAR: &str = "$jscomp$restIndex";
pub const FRESH_SPREAD_VAR: &str = "$jscomp$spread$args";
pub const FRESH_COMP_PROP_VAR: &str = "$jscomp$compprop";

/// Options that control lowering behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoweringOptions {
    /// Output dialect. ES3 additionally rejects getter/setter definitions.
    pub language_out: LanguageMode,
}

/// The state shared by every rewriter of the pass.
#[derive(Debug)]
pub struct TransformContext {
    pub options: LoweringOptions,

    /// Strictly monotonic supplier for temporary-name suffixes.
    unique_id: u32,

    /// Set when emitted code references a `$jscomp` runtime helper.
    pub needs_runtime: bool,

    /// Set after every local rewrite; the host accumulates it.
    code_changed: bool,

    /// Diagnostics collected so far, in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformContext {
    #[must_use]
    pub fn new(options: LoweringOptions) -> Self {
        TransformContext {
            options,
            unique_id: 0,
            needs_runtime: false,
            code_changed: false,
            diagnostics: Vec::new(),
        }
    }

    /// Create a context targeting ES5.
    #[must_use]
    pub fn es5() -> Self {
        Self::new(LoweringOptions {
            language_out: LanguageMode::ES5,
        })
    }

    /// Create a context targeting ES3.
    #[must_use]
    pub fn es3() -> Self {
        Self::new(LoweringOptions {
            language_out: LanguageMode::ES3,
        })
    }

    /// Get the next unique integer for temporary names. Strictly monotonic
    /// across the whole compilation, so temporaries from distinct rewrites
    /// never collide.
    pub fn next_unique_id(&mut self) -> u32 {
        let id = self.unique_id;
        self.unique_id += 1;
        id
    }

    /// Report a diagnostic keyed to a node's span.
    pub fn report(&mut self, message: &DiagnosticMessage, span: Span, args: &[&str]) {
        let diagnostic = Diagnostic::new(message, span, args);
        tracing::debug!(key = diagnostic.key, text = %diagnostic.message_text, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Whether any error-severity diagnostic has been reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Record that a local rewrite landed.
    pub fn mark_code_changed(&mut self) {
        self.code_changed = true;
    }

    #[must_use]
    pub const fn code_changed(&self) -> bool {
        self.code_changed
    }

    /// Take and clear the accumulated code-changed flag (host side).
    pub fn take_code_changed(&mut self) -> bool {
        std::mem::take(&mut self.code_changed)
    }

    /// Record that emitted code references a runtime helper.
    pub fn set_needs_runtime(&mut self) {
        self.needs_runtime = true;
    }
}

#[cfg(test)]
#[path = "tests/transform_context.rs"]
mod tests;
