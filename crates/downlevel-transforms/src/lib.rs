//! ES6-to-ES5 down-leveling rewriters.
//!
//! The pass consumes an already-parsed, partially-normalized tree and
//! rewrites six newer constructs into their older equivalents: classes,
//! `for...of` loops, rest parameters, spread elements, computed object
//! properties, and object-literal shorthands. Emitted code may reference the
//! two fixed runtime helpers (`$jscomp.inherits`, `$jscomp.makeIterator`);
//! whenever it does, the `needs_runtime` flag on the context is set so the
//! host injects the helper library.
//!
//! Arrow functions, default parameters, destructuring, modules, generators,
//! block scoping, and template literals are other passes' concerns.

pub mod transform_context;
pub use transform_context::{LoweringOptions, TransformContext};

pub mod lowering_pass;
pub use lowering_pass::LoweringPass;

pub mod class_es5;
pub mod computed_props_es5;
pub mod for_of_es5;
pub mod object_shorthand_es5;
pub mod rest_params_es5;
pub mod spread_es5;
