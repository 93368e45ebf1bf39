//! Node helpers over the tree-sitter CST
//!
//! Thin, free-function queries used by every phase: named/unnamed child
//! iteration, field lookup by name, byte-range text extraction, and the
//! structural assertion that guards against grammar-version mismatches.

use tree_sitter::Node;

use crate::common::{Error, Result};

/// All named children of `node`, in source order
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    children
}

/// All children of `node`, named and anonymous, in source order
///
/// Modifier lists expose their keywords (`public`, `static`, ...) as
/// anonymous children, so symbol parsing needs this variant.
pub fn unnamed_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children
}

/// Child attached to `node` under the grammar field `name`
pub fn field<'t>(node: Node<'t>, name: &str) -> Option<Node<'t>> {
    node.child_by_field_name(name)
}

/// Source text covered by `node`
pub fn text<'t>(node: Node<'t>, source: &'t [u8]) -> &'t str {
    node.utf8_text(source).unwrap_or("")
}

/// Assert that a node has the expected kind
///
/// A mismatch here means the grammar produced a shape this translator does
/// not know, which is fatal for the file being translated.
pub fn assert_kind(node: Node<'_>, expected: &str) -> Result<()> {
    if node.kind() != expected {
        return Err(Error::structural(expected, node.kind()));
    }
    Ok(())
}
