//! Java to Go source translator (jago)
//!
//! Translates Java source files into readable, semantically comparable Go.
//! The translator is not a type-checker and makes no promise that its
//! output compiles; it trades strict fidelity for output a human can fix
//! up. Exceptions, reflection and virtual dispatch are degraded, not
//! modeled.
//!
//! ## Architecture
//!
//! - **cst**: adapter over the tree-sitter Java grammar
//! - **symbol**: per-file symbol tables, the package registry, renaming
//! - **lower**: Java CST to Go AST (types, declarations, statements,
//!   expressions)
//! - **goast**: the emitted Go AST and its printer
//! - **bin**: command-line interface
//!
//! ## Translation Flow
//!
//! ```text
//! Java Source → CST → Symbols → [all files registered] → Resolve → Lower → Print
//! ```
//!
//! Lowering never starts before every file's symbols are registered,
//! because inherited-member resolution needs sibling files to be visible.

pub mod common;
pub mod cst;
pub mod goast;
pub mod lower;
pub mod symbol;

pub use common::{Config, Error, Result};

use rayon::prelude::*;

use cst::SourceFile;
use goast::GoFile;
use symbol::{parse_symbols, resolve_file, PackageRegistry};

/// One translated output file
pub struct TranslatedFile {
    /// Output file name (`Foo.java` → `Foo.go`)
    pub name: String,
    /// Printed Go source
    pub go_source: String,
    /// The lowered AST the source was printed from
    pub ast: GoFile,
}

/// Multi-file translation driver
///
/// Files are added up front so that the symbol phase can register every
/// file before any lowering starts; lowering then proceeds per file in
/// parallel against the frozen workspace.
pub struct Translator {
    config: Config,
    files: Vec<SourceFile>,
}

impl Translator {
    pub fn new(config: Config) -> Self {
        Self { config, files: Vec::new() }
    }

    /// Parse and queue a source string
    pub fn add_source(&mut self, name: impl Into<String>, source: impl Into<String>) -> Result<()> {
        self.files.push(SourceFile::parse(name, source)?);
        Ok(())
    }

    /// Read, parse and queue a file from disk
    pub fn add_file(&mut self, path: &std::path::Path) -> Result<()> {
        self.files.push(SourceFile::open(path)?);
        Ok(())
    }

    /// Run the full pipeline over every queued file
    ///
    /// A file that fails structurally is reported and skipped; the other
    /// files still translate. Output order follows input order.
    pub fn translate(&self) -> Result<Vec<TranslatedFile>> {
        // Phase 1: symbols, registered sequentially into the registry
        let mut registry = PackageRegistry::new();
        let mut registered: Vec<(usize, usize)> = Vec::new();
        for (file_index, file) in self.files.iter().enumerate() {
            match parse_symbols(file) {
                Ok(symbols) => registered.push((file_index, registry.register(symbols))),
                Err(error) => log::error!("{}: {}, file skipped", file.name, error),
            }
        }

        // Phase 2: name resolution, still before the freeze
        for (_, registry_index) in &registered {
            resolve_file(registry.file_mut(*registry_index));
        }

        // Phase 3: freeze, then lower files in parallel; the frozen
        // workspace is read-only so no locking is needed
        let workspace = registry.freeze();
        let mut outputs: Vec<(usize, TranslatedFile)> = registered
            .par_iter()
            .map(|(file_index, registry_index)| {
                let file = &self.files[*file_index];
                let file_scope = workspace.file(*registry_index);
                let ast = lower::lower_file(file, file_scope, &workspace, &self.config);
                let go_source = goast::print_file(&ast);
                (
                    *file_index,
                    TranslatedFile { name: output_name(&file.name), go_source, ast },
                )
            })
            .collect();

        outputs.sort_by_key(|(index, _)| *index);
        Ok(outputs.into_iter().map(|(_, output)| output).collect())
    }
}

/// Translate a single Java source string to Go source
///
/// Convenience entry point for tests and in-memory translation.
pub fn translate_source(source: &str, config: &Config) -> Result<String> {
    let mut translator = Translator::new(config.clone());
    translator.add_source("Input.java", source)?;
    let mut outputs = translator.translate()?;
    if outputs.is_empty() {
        return Err(Error::lower_error("input file failed to translate"));
    }
    Ok(outputs.remove(0).go_source)
}

/// `Foo.java` → `Foo.go`
fn output_name(input: &str) -> String {
    let path = std::path::Path::new(input);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| input.to_string());
    format!("{}.{}", stem, common::GO_EXTENSION)
}
