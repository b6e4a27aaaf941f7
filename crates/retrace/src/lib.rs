//! Instrument every return in JavaScript-family function declarations.
//!
//! `retrace` rewrites
//!
//! ```text
//! function foo(a,b){ return a + b; }
//! ```
//!
//! so that the function declares a holder, and each return assigns to it,
//! reports it, and returns it:
//!
//! ```text
//! function foo(a,b){
//!   let fooOutput;
//!  fooOutput = a + b; console.log(fooOutput); return fooOutput; }
//! ```
//!
//! Two engines produce identical output for the inputs they both accept.
//! [`Engine::Grammar`] parses a small fixed grammar and rejects anything
//! else; [`Engine::Query`] parses full JavaScript or TypeScript with
//! Tree-sitter and also reaches returns in nested blocks. Pick one through
//! [`RetraceConfig`] and [`build_transformer`].
//!
//! # Example
//!
//! ```
//! use retrace::{Engine, RetraceConfig, build_transformer};
//!
//! let config = RetraceConfig::default().with_engine(Engine::Grammar);
//! let transformer = build_transformer(&config)?;
//! let output = transformer.transform("function one(){ return 1; }")?;
//! assert!(output.contains("console.log(oneOutput)"));
//! # Ok::<(), retrace::TransformError>(())
//! ```

mod config;
mod engine;
pub mod telemetry;

use tracing::{debug, warn};

pub use config::{
    DEFAULT_LOG_FILTER, LogFormat, LogFormatParseError, RetraceConfig, TelemetryConfig,
};
pub use engine::{Engine, EngineParseError};
pub use retrace_core::{
    DeclarationKeyword, Edit, EditPlan, InstrumentConfig, ParseError, TransformError, Transformer,
};
pub use retrace_grammar::GrammarTransformer;
pub use retrace_query::{QueryTransformer, SupportedLanguage};

const FACADE_TARGET: &str = "retrace";

/// A transformer chosen at runtime.
pub type DynTransformer = Box<dyn Transformer + Send + Sync>;

/// Builds the transformer selected by `config`.
///
/// # Errors
///
/// Returns an error if the query engine's grammar or queries fail to load.
pub fn build_transformer(config: &RetraceConfig) -> Result<DynTransformer, TransformError> {
    let instrument = config.instrument().clone();
    let transformer: DynTransformer = match config.engine() {
        Engine::Grammar => {
            if config.language() != SupportedLanguage::JavaScript {
                warn!(
                    target: FACADE_TARGET,
                    language = %config.language(),
                    "grammar engine ignores the configured language"
                );
            }
            Box::new(GrammarTransformer::new(instrument))
        }
        Engine::Query => Box::new(QueryTransformer::new(config.language(), instrument)?),
    };

    debug!(
        target: FACADE_TARGET,
        engine = transformer.name(),
        language = %config.language(),
        "built transformer"
    );
    Ok(transformer)
}

#[cfg(test)]
mod tests;
