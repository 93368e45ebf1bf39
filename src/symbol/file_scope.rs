use std::collections::HashMap;

use super::class_scope::ClassScope;
use super::definition::Definition;

/// The scope of a single source file: its package, imports, and top-level
/// type declarations in source order
#[derive(Debug, Clone, Default)]
pub struct FileScope {
    /// Name of the source file, used in diagnostics
    pub file_name: String,
    /// The dotted package the file declares, or empty
    pub package: String,
    /// Imported simple name → the dotted package that exports it
    /// (`List` → `java.util`)
    pub imports: HashMap<String, String>,
    /// Top-level classes/interfaces/enums, in source order
    pub top_level_classes: Vec<ClassScope>,
}

impl FileScope {
    /// The first top-level declaration, used as the fallback receiver for
    /// file-level queries
    pub fn base_class(&self) -> Option<&ClassScope> {
        self.top_level_classes.first()
    }

    /// Search all top-level classes (and their nested classes) for a class
    /// definition by original name
    pub fn find_class(&self, name: &str) -> Option<&Definition> {
        self.top_level_classes.iter().find_map(|top| top.find_class(name))
    }

    /// Search all top-level classes (and their nested classes) for a class
    /// scope by original name
    pub fn find_class_scope(&self, name: &str) -> Option<&ClassScope> {
        self.top_level_classes.iter().find_map(|top| top.find_class_scope(name))
    }

    /// Search every class in the file for a field by original name,
    /// outermost scopes first
    pub fn find_field_by_original_name(&self, name: &str) -> Option<&Definition> {
        fn in_class<'a>(class: &'a ClassScope, name: &str) -> Option<&'a Definition> {
            class
                .find_field_by_original_name(name)
                .or_else(|| class.subclasses.iter().find_map(|sub| in_class(sub, name)))
        }
        self.top_level_classes.iter().find_map(|top| in_class(top, name))
    }

    /// The package a referenced simple type name lives in, according to this
    /// file's imports; falls back to the file's own package
    pub fn package_of(&self, simple_name: &str) -> &str {
        self.imports
            .get(simple_name)
            .map(|s| s.as_str())
            .unwrap_or(self.package.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_of_prefers_imports() {
        let mut file = FileScope {
            package: "com.example".to_string(),
            ..FileScope::default()
        };
        file.imports.insert("List".to_string(), "java.util".to_string());

        assert_eq!(file.package_of("List"), "java.util");
        assert_eq!(file.package_of("Sibling"), "com.example");
    }
}
