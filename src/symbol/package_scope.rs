use std::collections::HashMap;

use super::class_scope::ClassScope;
use super::file_scope::FileScope;

/// Index of one top-level class inside a [`Workspace`]
///
/// The registry stores indices rather than references so that mutually
/// referential classes (A has a field of B, B of A) never need owning links
/// between scopes; every cross-scope relationship resolves by name through
/// the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassId {
    pub file: usize,
    pub class: usize,
}

/// Write-phase package registry
///
/// Built while symbol tables are registered, then frozen into a
/// [`Workspace`]. Nothing reads it before the freeze, nothing writes it
/// after.
#[derive(Debug, Default)]
pub struct PackageRegistry {
    files: Vec<FileScope>,
    /// Dotted package → (simple class name, id), in registration order
    packages: HashMap<String, Vec<(String, ClassId)>>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file's top-level classes under its package and take
    /// ownership of the scope. Returns the file's index.
    pub fn register(&mut self, file: FileScope) -> usize {
        let file_index = self.files.len();
        let entry = self.packages.entry(file.package.clone()).or_default();
        for (class_index, class) in file.top_level_classes.iter().enumerate() {
            entry.push((
                class.class.original_name.clone(),
                ClassId { file: file_index, class: class_index },
            ));
        }
        self.files.push(file);
        file_index
    }

    /// Freeze into the read-only view used by resolution and lowering
    pub fn freeze(self) -> Workspace {
        Workspace { files: self.files, packages: self.packages }
    }

    /// Mutable access to a registered file, for the resolve phase
    pub fn file_mut(&mut self, index: usize) -> &mut FileScope {
        &mut self.files[index]
    }
}

/// Frozen, read-only view over every registered file
///
/// Invariant: every class scope reachable from any registered file is
/// discoverable here by package + simple name. The workspace is shared
/// immutably across the per-file lowering passes.
#[derive(Debug, Default)]
pub struct Workspace {
    files: Vec<FileScope>,
    packages: HashMap<String, Vec<(String, ClassId)>>,
}

impl Workspace {
    pub fn file(&self, index: usize) -> &FileScope {
        &self.files[index]
    }

    /// Resolve a top-level class by package and simple name
    pub fn lookup(&self, package: &str, name: &str) -> Option<&ClassScope> {
        let entries = self.packages.get(package)?;
        let id = entries.iter().find(|(n, _)| n == name).map(|(_, id)| *id)?;
        Some(&self.files[id.file].top_level_classes[id.class])
    }
}
