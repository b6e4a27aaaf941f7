//! Core edit model and instrumentation templates for `retrace`.
//!
//! `retrace` rewrites JavaScript-family function declarations so every
//! return statement records its value before returning. Two engines locate
//! the functions and returns; this crate holds everything they share:
//!
//! - [`FunctionMatch`] and [`ReturnMatch`]: the output of the match stage
//! - [`Instrumenter`] and [`InstrumentConfig`]: rendering matches as edits
//! - [`Edit`] and [`EditPlan`]: byte-offset splices applied back-to-front
//! - [`Transformer`]: the interface both engines implement
//! - [`TransformError`] and [`ParseError`]: the error taxonomy
//!
//! # Example
//!
//! ```
//! use retrace_core::{EditPlan, FunctionMatch, Instrumenter, ReturnMatch};
//!
//! let source = "function one(){ return 1; }";
//! let instrumenter = Instrumenter::default();
//! let mut plan = EditPlan::new();
//! plan.push(instrumenter.declare(&FunctionMatch::new("one", 15)));
//! plan.push(instrumenter.rewrite(&ReturnMatch::new("one", "1", 16..25)));
//!
//! let output = plan.apply(source)?;
//! assert!(output.contains("let oneOutput;"));
//! # Ok::<(), retrace_core::TransformError>(())
//! ```

mod edit;
mod error;
mod instrument;
mod matches;
mod position;
mod transformer;

pub use edit::{Edit, EditPlan};
pub use error::{ParseError, TransformError};
pub use instrument::{
    DEFAULT_HOLDER_SUFFIX, DEFAULT_INDENT, DEFAULT_REPORT_CALLEE, DeclarationKeyword,
    InstrumentConfig, Instrumenter,
};
pub use matches::{FunctionMatch, ReturnMatch};
pub use position::offset_to_one_based;
pub use transformer::Transformer;

#[cfg(test)]
mod tests;
