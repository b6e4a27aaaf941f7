//! The seam shared by both instrumentation engines.

use crate::error::TransformError;

/// A source-to-source instrumentation engine.
///
/// Implementations are pure functions of their input: each call parses,
/// matches, plans and applies edits without retaining state, so a
/// transformer may be shared between threads.
pub trait Transformer {
    /// Short identifier of the engine, used in logs and test names.
    fn name(&self) -> &'static str;

    /// Returns `source` with every matched function instrumented.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine cannot parse the input or its edit
    /// plan cannot be applied. No partial output is produced.
    fn transform(&self, source: &str) -> Result<String, TransformError>;
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn transform(&self, source: &str) -> Result<String, TransformError> {
        (**self).transform(source)
    }
}
