//! Target Go AST
//!
//! This module defines the Go declarations, statements and expressions the
//! lowering phase emits, plus the pretty-printer that serializes them. The
//! shape mirrors the slice of `go/ast` a source translator needs: types are
//! a kind of expression, embedded struct fields are fields without names,
//! and generic instantiation is an index expression.

mod nodes;
mod printer;

pub use nodes::*;
pub use printer::Printer;

/// Print a file with default printer settings
pub fn print_file(file: &GoFile) -> String {
    Printer::new().print(file)
}
