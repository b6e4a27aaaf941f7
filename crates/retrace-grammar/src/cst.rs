//! Concrete syntax tree for the restricted function grammar.
//!
//! Nodes keep byte spans of every token they were built from, so any part of
//! the original text can be recovered with [`str::get`].

use std::ops::Range;

/// Root of a parsed source: zero or more function declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    functions: Vec<FunctionDecl>,
}

impl Program {
    pub(crate) const fn new(functions: Vec<FunctionDecl>) -> Self {
        Self { functions }
    }

    /// Function declarations in source order.
    #[must_use]
    pub fn functions(&self) -> &[FunctionDecl] {
        &self.functions
    }
}

/// `function NAME ( params ) { returns }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub(crate) keyword: Range<usize>,
    pub(crate) name: Range<usize>,
    pub(crate) parameters: Range<usize>,
    pub(crate) body: Block,
}

impl FunctionDecl {
    /// The function name as written in `source`.
    #[must_use]
    pub fn name<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.name.clone()).unwrap_or_default()
    }

    /// Span of the parameter list, parentheses included.
    #[must_use]
    pub fn parameters(&self) -> Range<usize> {
        self.parameters.clone()
    }

    /// The function body.
    #[must_use]
    pub const fn body(&self) -> &Block {
        &self.body
    }

    /// Span from the keyword through the closing brace.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.keyword.start..self.body.close.end
    }
}

/// A brace-delimited function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(crate) open: Range<usize>,
    pub(crate) statements: Vec<ReturnStmt>,
    pub(crate) close: Range<usize>,
}

impl Block {
    /// Span of the opening `{`.
    #[must_use]
    pub fn open(&self) -> Range<usize> {
        self.open.clone()
    }

    /// Return statements in source order.
    #[must_use]
    pub fn statements(&self) -> &[ReturnStmt] {
        &self.statements
    }
}

/// `return EXPR ;` with an optional expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub(crate) keyword: Range<usize>,
    pub(crate) expression: Option<Range<usize>>,
    pub(crate) terminator: Range<usize>,
}

impl ReturnStmt {
    /// Span of the returned expression, if any.
    #[must_use]
    pub fn expression(&self) -> Option<Range<usize>> {
        self.expression.clone()
    }

    /// Span from the keyword through the terminator.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.keyword.start..self.terminator.end
    }
}
