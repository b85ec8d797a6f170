//! AST node library for the downlevel compiler pass.
//!
//! The tree is a uniform node structure: a kind tag from a closed set, an
//! ordered list of exclusively-owned children, a string payload, boolean
//! flags, a source span, and an optional JSDoc annotation record. Rewriters
//! mutate trees in place; ownership transfer is a plain `Node` move and deep
//! copy is `Clone`.

pub mod node;
pub use node::{Kind, Node};

pub mod jsdoc;
pub use jsdoc::{JsDocInfo, TypeExpr};

// Recursive scan helpers (`this` references, side-effect analysis)
pub mod visit;
pub use visit::{contains_this_reference, may_have_side_effects};

// Compact single-line code printer for tests and tracing
pub mod printer;
pub use printer::Printer;
