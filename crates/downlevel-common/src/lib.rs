//! Common types for the downlevel compiler pass.
//!
//! This crate provides the foundational types shared by the AST and
//! transform crates:
//! - Source spans (`Span`, `Spanned`)
//! - Common enums (`LanguageMode`)
//! - Diagnostics (`Diagnostic`, `DiagnosticMessage`, message table)

// Common types - shared constants to break circular dependencies
pub mod common;
pub use common::LanguageMode;

// Span - source location tracking (byte offsets)
pub mod span;
pub use span::{Span, Spanned};

// Diagnostics - structured errors and warnings keyed to spans
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage};
