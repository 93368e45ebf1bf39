//! Name resolution pass
//!
//! Runs after every file's symbols are registered and finalizes the names
//! the lowering phase will emit: visibility-driven capitalization (already
//! assigned during symbol parsing), Go-keyword collision suffixing, and
//! helper-name disambiguation for overloaded instance generic methods.

use std::collections::HashSet;

use crate::common::consts::is_go_keyword;

use super::class_scope::ClassScope;
use super::definition::Definition;
use super::file_scope::FileScope;

/// Capitalize the first letter of a name
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercase the first letter of a name
pub fn lowercase(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The exported form of a name: public members capitalize, everything else
/// keeps a lowercase first letter
pub fn handle_export_status(public: bool, name: &str) -> String {
    if public {
        capitalize(name)
    } else {
        lowercase(name)
    }
}

/// Resolve all names in a file scope
pub fn resolve_file(file: &mut FileScope) {
    for class in &mut file.top_level_classes {
        resolve_class(class);
    }
}

fn resolve_class(class: &mut ClassScope) {
    resolve_definition(&mut class.class);

    for field in &mut class.fields {
        resolve_definition(field);
    }

    let mut helper_names: HashSet<String> = HashSet::new();
    for method in &mut class.methods {
        resolve_definition(method);
        for parameter in &mut method.parameters {
            resolve_definition(parameter);
        }
        if method.requires_helper {
            disambiguate_helper(method, &mut helper_names);
        }
    }

    for subclass in &mut class.subclasses {
        resolve_class(subclass);
    }
}

fn resolve_definition(definition: &mut Definition) {
    if is_go_keyword(&definition.name) {
        let renamed = format!("{}_", definition.name);
        log::warn!(
            "renaming `{}` to `{}`: collides with a Go keyword",
            definition.name,
            renamed
        );
        definition.rename(renamed);
    }
}

/// Overloaded generic methods would synthesize the same helper type; later
/// ones get a deterministic numeric suffix
fn disambiguate_helper(method: &mut Definition, taken: &mut HashSet<String>) {
    if taken.insert(method.helper_name.clone()) {
        return;
    }
    let base = method.helper_name.clone();
    let mut counter = 2;
    loop {
        let candidate = format!("{}{}", base, counter);
        if taken.insert(candidate.clone()) {
            method.helper_name = candidate;
            return;
        }
        counter += 1;
    }
}
