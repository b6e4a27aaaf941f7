//! Match records produced by the engines' match stage.
//!
//! Matches borrow from the source text and live only long enough to be
//! turned into edits.

use std::ops::Range;

/// A function declaration whose body receives an output-holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionMatch<'src> {
    name: &'src str,
    body_start: usize,
}

impl<'src> FunctionMatch<'src> {
    /// Creates a function match.
    ///
    /// `body_start` is the offset immediately after the body's opening
    /// delimiter.
    #[must_use]
    pub const fn new(name: &'src str, body_start: usize) -> Self {
        Self { name, body_start }
    }

    /// The declared function name.
    #[must_use]
    pub const fn name(&self) -> &'src str {
        self.name
    }

    /// Offset just inside the body's opening delimiter.
    #[must_use]
    pub const fn body_start(&self) -> usize {
        self.body_start
    }
}

/// A return statement owned by a matched function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnMatch<'src> {
    function: &'src str,
    expression: &'src str,
    span: Range<usize>,
}

impl<'src> ReturnMatch<'src> {
    /// Creates a return match.
    ///
    /// `span` covers the `return` keyword through the statement terminator.
    #[must_use]
    pub const fn new(function: &'src str, expression: &'src str, span: Range<usize>) -> Self {
        Self {
            function,
            expression,
            span,
        }
    }

    /// Name of the function that owns the statement.
    #[must_use]
    pub const fn function(&self) -> &'src str {
        self.function
    }

    /// Verbatim text of the returned expression.
    #[must_use]
    pub const fn expression(&self) -> &'src str {
        self.expression
    }

    /// Byte span of the whole statement.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
