//! Tree-sitter parsing for the query engine.
//!
//! Tree-sitter always yields a tree. Text that does not fit the grammar
//! becomes ERROR or MISSING nodes, which the engine reports but does not
//! treat as fatal.

use std::fmt;

use retrace_core::{TransformError, offset_to_one_based};
use tree_sitter::Node;

use crate::language::SupportedLanguage;

/// Parses `source` as `language` with a freshly configured parser.
///
/// # Errors
///
/// Returns [`TransformError::ParserInit`] if the grammar does not load and
/// [`TransformError::ParseFailed`] if no tree is produced.
pub fn parse(language: SupportedLanguage, source: &str) -> Result<ParsedSource, TransformError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|e| TransformError::parser_init(language, e.to_string()))?;
    let Some(tree) = parser.parse(source, None) else {
        let message = format!("{language} parser produced no tree");
        return Err(TransformError::parse_failed(message));
    };

    Ok(ParsedSource { tree, language })
}

/// A syntax tree together with the dialect it was parsed as.
#[derive(Debug)]
pub struct ParsedSource {
    tree: tree_sitter::Tree,
    language: SupportedLanguage,
}

impl ParsedSource {
    /// Returns the dialect used for parsing.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns true when the tree has no ERROR or MISSING nodes.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.tree.root_node().has_error()
    }

    /// Lists the ERROR and MISSING nodes in document order.
    ///
    /// `source` must be the text this tree was parsed from.
    #[must_use]
    pub fn syntax_errors(&self, source: &str) -> Vec<SyntaxError> {
        error_nodes(self.tree.root_node())
            .into_iter()
            .map(|node| SyntaxError::new(node, source))
            .collect()
    }
}

/// One place where the source did not fit the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    offset: usize,
    line: u32,
    column: u32,
    missing: Option<String>,
}

impl SyntaxError {
    fn new(node: Node<'_>, source: &str) -> Self {
        let offset = node.start_byte();
        let (line, column) = offset_to_one_based(source, offset);
        Self {
            offset,
            line,
            column,
            missing: node.is_missing().then(|| node.kind().to_owned()),
        }
    }

    /// Byte offset where the error starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// One-based line of the error.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// One-based column of the error, in characters.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// The node kind the parser inserted, for MISSING nodes.
    #[must_use]
    pub fn missing(&self) -> Option<&str> {
        self.missing.as_deref()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.missing {
            Some(kind) => write!(f, "{}:{}: missing `{kind}`", self.line, self.column),
            None => write!(f, "{}:{}: unexpected input", self.line, self.column),
        }
    }
}

/// Depth-first walk that only descends into subtrees containing errors.
fn error_nodes(root: Node<'_>) -> Vec<Node<'_>> {
    let mut found = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            found.push(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return found;
            }
        }
    }
}
