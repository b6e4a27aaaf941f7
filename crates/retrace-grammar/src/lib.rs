//! Grammar-driven instrumentation engine for `retrace`.
//!
//! This engine accepts a deliberately small language: a program is a
//! sequence of `function NAME(params) { return EXPR; ... }` declarations.
//! Source is tokenized by a hand-written lexer, validated by a
//! recursive-descent parser that builds a [`Program`] CST, and then matched
//! by a scan over the flat token stream. Anything outside the grammar is a
//! [`ParseError`](retrace_core::ParseError); no partial output is produced.
//!
//! # Example
//!
//! ```
//! let output = retrace_grammar::transform("function foo(a,b){ return a + b; }")?;
//! assert!(output.contains("let fooOutput;"));
//! assert!(output.contains("console.log(fooOutput); return fooOutput;"));
//! # Ok::<(), retrace_core::TransformError>(())
//! ```

mod cst;
mod lexer;
mod parser;
mod scan;

use retrace_core::{
    EditPlan, InstrumentConfig, Instrumenter, ParseError, TransformError, Transformer,
};
use tracing::debug;

pub use cst::{Block, FunctionDecl, Program, ReturnStmt};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::parse_program;

const GRAMMAR_TARGET: &str = "retrace::grammar";

/// Tokenizes and parses `source` into a [`Program`].
///
/// # Errors
///
/// Returns the first lexical or grammar violation.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(source, &tokens)
}

/// Instruments `source` with the default configuration.
///
/// # Errors
///
/// Returns [`TransformError::Parse`] when `source` does not match the
/// grammar.
pub fn transform(source: &str) -> Result<String, TransformError> {
    GrammarTransformer::default().transform(source)
}

/// The grammar-driven [`Transformer`].
#[derive(Debug, Clone, Default)]
pub struct GrammarTransformer {
    instrumenter: Instrumenter,
}

impl GrammarTransformer {
    /// Creates a transformer rendering edits with `config`.
    #[must_use]
    pub const fn new(config: InstrumentConfig) -> Self {
        Self {
            instrumenter: Instrumenter::new(config),
        }
    }

    /// Builds the edit plan for `source` without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Parse`] when `source` does not match the
    /// grammar.
    pub fn plan(&self, source: &str) -> Result<EditPlan, TransformError> {
        let tokens = tokenize(source)?;
        let program = parse_program(source, &tokens)?;
        let matches = scan::scan(source, &tokens);

        debug!(
            target: GRAMMAR_TARGET,
            tokens = tokens.len(),
            functions = program.functions().len(),
            returns = matches.returns.len(),
            "matched source"
        );

        let mut plan = EditPlan::new();
        plan.extend(
            matches
                .functions
                .iter()
                .map(|function| self.instrumenter.declare(function)),
        );
        plan.extend(
            matches
                .returns
                .iter()
                .map(|statement| self.instrumenter.rewrite(statement)),
        );
        Ok(plan)
    }
}

impl Transformer for GrammarTransformer {
    fn name(&self) -> &'static str {
        "grammar"
    }

    fn transform(&self, source: &str) -> Result<String, TransformError> {
        self.plan(source)?.apply(source)
    }
}

#[cfg(test)]
mod tests;
