//! Symbol tables for cross-file resolution
//!
//! The symbol phase builds one [`FileScope`] per input file: the package,
//! the import map, and a [`ClassScope`] tree for every top-level type. File
//! scopes register their top-level classes in a [`PackageRegistry`], which
//! freezes into the read-only [`Workspace`] every later phase resolves
//! against. The [`resolver`] pass then applies the renaming rules.

pub mod class_scope;
pub mod definition;
pub mod file_scope;
pub mod package_scope;
pub mod parsing;
pub mod resolver;
pub mod type_params;

pub use class_scope::{ClassScope, EnumConstant};
pub use definition::Definition;
pub use file_scope::FileScope;
pub use package_scope::{ClassId, PackageRegistry, Workspace};
pub use parsing::parse_symbols;
pub use resolver::{capitalize, handle_export_status, lowercase, resolve_file};
pub use type_params::{merge_type_params, type_param_names, JavaType, TypeParam};
