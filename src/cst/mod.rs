//! Concrete-syntax-tree adapter
//!
//! The translator does not parse Java itself: it consumes the tree-sitter
//! Java grammar and works directly on the concrete syntax tree. This module
//! owns the parser setup and a `SourceFile` wrapper that keeps the source
//! text and its tree together, plus the node helpers in [`node`].

pub mod node;

pub use node::{field, named_children, text, unnamed_children};

use tree_sitter::{Node, Parser, Tree};

use crate::common::{Error, Result};

/// Parse Java source text into a tree-sitter tree
pub fn parse_java(file_name: &str, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| Error::internal(format!("failed to load Java grammar: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::parse_error(file_name, "tree-sitter failed to parse input"))?;

    if tree.root_node().has_error() {
        log::warn!("{}: source contains syntax errors, output will be partial", file_name);
    }

    Ok(tree)
}

/// A single Java source file and its parsed tree
pub struct SourceFile {
    /// File name, used in diagnostics and to name the output file
    pub name: String,
    /// Raw source bytes
    pub source: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse `source` and wrap it; fails only if the grammar cannot load or
    /// tree-sitter bails out entirely
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();
        let tree = parse_java(&name, &source)?;
        Ok(Self { name, source, tree })
    }

    /// Read a file from disk and parse it
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(path.display().to_string(), source)
    }

    /// The root `program` node
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text as bytes, the form the node helpers want
    pub fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }
}
