//! Compiled structural queries and match extraction.

use retrace_core::{FunctionMatch, ReturnMatch, TransformError};
use tracing::trace;
use tree_sitter::{Node, Query, QueryCursor, QueryMatch, StreamingIterator};

use crate::QUERY_TARGET;
use crate::ancestry::{enclosing_function, function_name, return_argument};
use crate::language::SupportedLanguage;

const FUNCTION_QUERY: &str =
    "(function_declaration name: (identifier) @name body: (statement_block) @body)";
const RETURN_QUERY: &str = "(return_statement) @return";

/// The two queries the engine runs, compiled for one grammar.
pub(crate) struct FunctionQueries {
    functions: Query,
    returns: Query,
    name_index: u32,
    body_index: u32,
    return_index: u32,
}

impl FunctionQueries {
    pub(crate) fn compile(language: SupportedLanguage) -> Result<Self, TransformError> {
        let grammar = language.tree_sitter_language();
        let functions = Query::new(&grammar, FUNCTION_QUERY)
            .map_err(|e| TransformError::query_compile(e.to_string()))?;
        let returns = Query::new(&grammar, RETURN_QUERY)
            .map_err(|e| TransformError::query_compile(e.to_string()))?;

        Ok(Self {
            name_index: capture_index(&functions, "name")?,
            body_index: capture_index(&functions, "body")?,
            return_index: capture_index(&returns, "return")?,
            functions,
            returns,
        })
    }

    /// Every named function declaration, in document order.
    ///
    /// The insertion point is just past the body's opening brace.
    pub(crate) fn functions<'src>(
        &self,
        root: Node<'_>,
        source: &'src str,
    ) -> Vec<FunctionMatch<'src>> {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.functions, root, source.as_bytes());

        let mut found = Vec::new();
        while let Some(entry) = matches.next() {
            let (Some(name), Some(body)) = (
                capture(entry, self.name_index),
                capture(entry, self.body_index),
            ) else {
                continue;
            };
            let Some(text) = source.get(name.byte_range()) else {
                continue;
            };
            found.push(FunctionMatch::new(text, body.start_byte() + 1));
        }
        found
    }

    /// Every return statement with an argument that sits inside a function
    /// declaration, in document order.
    pub(crate) fn returns<'src>(
        &self,
        root: Node<'_>,
        source: &'src str,
    ) -> Vec<ReturnMatch<'src>> {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.returns, root, source.as_bytes());

        let mut found = Vec::new();
        while let Some(entry) = matches.next() {
            let Some(statement) = capture(entry, self.return_index) else {
                continue;
            };
            if let Some(matched) = return_match(statement, source) {
                found.push(matched);
            }
        }
        found
    }
}

fn return_match<'src>(statement: Node<'_>, source: &'src str) -> Option<ReturnMatch<'src>> {
    let argument = return_argument(statement)?;
    let Some(function) = enclosing_function(statement) else {
        trace!(
            target: QUERY_TARGET,
            offset = statement.start_byte(),
            "discarding return outside any function declaration"
        );
        return None;
    };
    let name = function_name(function, source)?;
    let expression = source.get(argument.byte_range())?;
    Some(ReturnMatch::new(name, expression, statement.byte_range()))
}

fn capture<'tree>(entry: &QueryMatch<'_, 'tree>, index: u32) -> Option<Node<'tree>> {
    entry
        .captures
        .iter()
        .find(|capture| capture.index == index)
        .map(|capture| capture.node)
}

fn capture_index(query: &Query, name: &str) -> Result<u32, TransformError> {
    query
        .capture_index_for_name(name)
        .ok_or_else(|| TransformError::query_compile(format!("missing capture @{name}")))
}
