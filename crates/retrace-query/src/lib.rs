//! Query-driven instrumentation engine for `retrace`.
//!
//! Source is parsed with Tree-sitter, then two compiled structural queries
//! pick out named function declarations and return statements. Each return
//! is attributed to its nearest enclosing function declaration by walking up
//! the tree, so returns nested in `if`, loop, or `try` blocks are
//! instrumented too. Returns outside every function declaration are left
//! alone.
//!
//! Tree-sitter recovers from syntax errors, so this engine never rejects
//! input: a tree containing error nodes is logged and instrumented as far as
//! it goes.
//!
//! # Example
//!
//! ```
//! let output = retrace_query::transform("function foo(a,b){ return a + b; }")?;
//! assert!(output.contains("let fooOutput;"));
//! # Ok::<(), retrace_core::TransformError>(())
//! ```

mod ancestry;
mod language;
mod parser;
mod query;

use retrace_core::{EditPlan, InstrumentConfig, Instrumenter, TransformError, Transformer};
use tracing::{debug, warn};

pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::{ParsedSource, SyntaxError, parse};

use crate::query::FunctionQueries;

pub(crate) const QUERY_TARGET: &str = "retrace::query";

/// Instruments JavaScript `source` with the default configuration.
///
/// # Errors
///
/// Returns an error if the grammar or queries fail to load.
pub fn transform(source: &str) -> Result<String, TransformError> {
    QueryTransformer::new(SupportedLanguage::JavaScript, InstrumentConfig::default())?
        .transform(source)
}

/// The query-driven [`Transformer`].
///
/// Queries are compiled once at construction; each call builds its own
/// parser, so one transformer can be shared across threads.
pub struct QueryTransformer {
    language: SupportedLanguage,
    queries: FunctionQueries,
    instrumenter: Instrumenter,
}

impl QueryTransformer {
    /// Compiles the structural queries for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::QueryCompile`] if a query does not compile
    /// against the grammar.
    pub fn new(
        language: SupportedLanguage,
        config: InstrumentConfig,
    ) -> Result<Self, TransformError> {
        let queries = FunctionQueries::compile(language)?;
        debug!(target: QUERY_TARGET, %language, "compiled structural queries");
        Ok(Self {
            language,
            queries,
            instrumenter: Instrumenter::new(config),
        })
    }

    /// Returns the language this transformer parses.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Builds the edit plan for `source` without applying it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be created or yields no tree.
    pub fn plan(&self, source: &str) -> Result<EditPlan, TransformError> {
        let parsed = parse(self.language, source)?;
        if !parsed.is_clean() {
            let errors = parsed.syntax_errors(source);
            if let Some(first) = errors.first() {
                warn!(
                    target: QUERY_TARGET,
                    errors = errors.len(),
                    first = %first,
                    "source has syntax errors; instrumenting the recovered tree"
                );
            }
        }

        let root = parsed.root();
        let functions = self.queries.functions(root, source);
        let returns = self.queries.returns(root, source);
        debug!(
            target: QUERY_TARGET,
            functions = functions.len(),
            returns = returns.len(),
            "matched source"
        );

        let mut plan = EditPlan::new();
        plan.extend(
            functions
                .iter()
                .map(|function| self.instrumenter.declare(function)),
        );
        plan.extend(
            returns
                .iter()
                .map(|statement| self.instrumenter.rewrite(statement)),
        );
        Ok(plan)
    }
}

impl std::fmt::Debug for QueryTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryTransformer")
            .field("language", &self.language)
            .field("instrumenter", &self.instrumenter)
            .finish_non_exhaustive()
    }
}

impl Transformer for QueryTransformer {
    fn name(&self) -> &'static str {
        "query"
    }

    fn transform(&self, source: &str) -> Result<String, TransformError> {
        self.plan(source)?.apply(source)
    }
}

#[cfg(test)]
mod tests;
