//! Syntax-tree navigation helpers.

use tree_sitter::Node;

/// Node kind of a named function declaration in every supported grammar.
pub(crate) const FUNCTION_DECLARATION: &str = "function_declaration";

const COMMENT: &str = "comment";

/// Returns the nearest `function_declaration` strictly above `node`.
///
/// Arrow functions, function expressions and methods are walked through, so
/// a return inside one of them is attributed to the surrounding declaration.
pub(crate) fn enclosing_function(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.parent();
    while let Some(candidate) = current {
        if candidate.kind() == FUNCTION_DECLARATION {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Returns the declared name of a `function_declaration` node.
pub(crate) fn function_name<'src>(function: Node<'_>, source: &'src str) -> Option<&'src str> {
    let name = function.child_by_field_name("name")?;
    source.get(name.byte_range())
}

/// Returns the returned expression of a `return_statement`, if any.
///
/// The statement's only non-comment named child is its argument; a bare
/// `return;` has none.
pub(crate) fn return_argument(statement: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = statement.walk();
    let argument = statement
        .named_children(&mut cursor)
        .find(|child| child.kind() != COMMENT);
    argument
}
