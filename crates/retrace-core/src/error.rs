//! Error types for instrumentation transforms.
//!
//! Both engines report failures through [`TransformError`]. Grammar
//! violations carry a [`ParseError`] pointing at the first structural
//! problem; the remaining variants describe infrastructure failures in the
//! structural-query engine or a malformed edit plan.

use std::fmt;

use thiserror::Error;

use crate::position::offset_to_one_based;

/// The first grammar violation found in a source text.
///
/// Offsets are byte offsets into the source. Line and column are one-based
/// and intended for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    offset: usize,
    line: u32,
    column: u32,
}

impl ParseError {
    /// Creates a parse error located at `offset` within `source`.
    #[must_use]
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = offset_to_one_based(source, offset);
        Self {
            message: message.into(),
            offset,
            line,
            column,
        }
    }

    /// Human-readable description of the violation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset where the violation was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// One-based line of the violation.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// One-based column of the violation.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Errors from instrumentation transforms.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The source does not match the restricted grammar.
    #[error("parse error at {0}")]
    Parse(#[from] ParseError),

    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInit {
        /// The language that failed to initialise.
        language: String,
        /// Description of the failure.
        message: String,
    },

    /// A structural query failed to compile against the grammar.
    #[error("invalid structural query: {message}")]
    QueryCompile {
        /// Description of the compilation failure.
        message: String,
    },

    /// The parser produced no syntax tree.
    #[error("failed to parse source: {message}")]
    ParseFailed {
        /// Description of the failure.
        message: String,
    },

    /// An edit could not be spliced into the source text.
    #[error("invalid edit at byte {position}: {message}")]
    InvalidEdit {
        /// Start offset of the offending edit.
        position: usize,
        /// Description of the problem.
        message: String,
    },
}

impl TransformError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: impl fmt::Display, message: impl Into<String>) -> Self {
        Self::ParserInit {
            language: language.to_string(),
            message: message.into(),
        }
    }

    /// Creates a query compilation error.
    #[must_use]
    pub fn query_compile(message: impl Into<String>) -> Self {
        Self::QueryCompile {
            message: message.into(),
        }
    }

    /// Creates a parse failure error.
    #[must_use]
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::ParseFailed {
            message: message.into(),
        }
    }

    /// Creates an invalid edit error.
    #[must_use]
    pub fn invalid_edit(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidEdit {
            position,
            message: message.into(),
        }
    }

    /// Returns the grammar violation when this error is a parse error.
    #[must_use]
    pub const fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(error) => Some(error),
            _ => None,
        }
    }
}
