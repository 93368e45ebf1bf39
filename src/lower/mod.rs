//! Lowering pipeline - Java CST to Go AST
//!
//! Runs after symbol registration and name resolution, reading the frozen
//! workspace and never writing it. The phases per file:
//!
//! - types: Java type expressions and type strings to Go types
//! - decl: classes, interfaces, enums, constructors, helpers
//! - stmt: statements, with try/catch and do-while degradations
//! - expr: expressions, invocation rewriting, diamond inference
//!
//! Each lowerer threads a [`Ctx`] that is cloned at scope boundaries.

pub mod ctx;
pub mod decl;
pub mod expr;
pub mod gen;
pub mod hierarchy;
pub mod stmt;
pub mod types;

pub use ctx::Ctx;
pub use decl::LoweredDecls;

use crate::common::Config;
use crate::cst::{named_children, SourceFile};
use crate::goast::GoFile;
use crate::symbol::{FileScope, Workspace};

/// Lower one file's CST into a Go file, resolving against the frozen
/// workspace
pub fn lower_file(
    file: &SourceFile,
    file_scope: &FileScope,
    workspace: &Workspace,
    config: &Config,
) -> GoFile {
    // The Go package takes the last segment of the Java package
    let package = if file_scope.package.is_empty() {
        "main".to_string()
    } else {
        types::simple_name(&file_scope.package).to_string()
    };

    let mut out = LoweredDecls::default();
    let type_nodes: Vec<_> = named_children(file.root())
        .into_iter()
        .filter(|n| {
            matches!(
                n.kind(),
                "class_declaration"
                    | "interface_declaration"
                    | "enum_declaration"
                    | "annotation_type_declaration"
            )
        })
        .collect();

    // Top-level nodes pair with scopes by source order
    for (node, scope) in type_nodes.into_iter().zip(&file_scope.top_level_classes) {
        let base_ctx = Ctx::new(workspace, config, file_scope, scope);
        decl::lower_type_declaration(node, file.bytes(), &base_ctx, &mut out);
    }

    GoFile {
        package,
        imports: out.imports.into_iter().collect(),
        decls: out.decls,
    }
}
