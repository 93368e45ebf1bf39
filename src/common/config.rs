use std::collections::HashSet;

/// Translator configuration
///
/// The core consumes a single setting: the set of annotation names whose
/// presence on a field or method drops that member from the output. All
/// other flags (output paths, dump modes) belong to the CLI driver.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Members annotated with any of these are skipped entirely.
    /// Names are stored as written in source, including the `@` (e.g. `@Exclude`).
    pub excluded_annotations: HashSet<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation to the exclusion set, normalizing a missing `@`
    pub fn exclude_annotation(&mut self, name: &str) {
        if let Some(stripped) = name.strip_prefix('@') {
            self.excluded_annotations.insert(format!("@{}", stripped));
        } else {
            self.excluded_annotations.insert(format!("@{}", name));
        }
    }

    /// Whether a member carrying this annotation text should be dropped
    pub fn is_excluded(&self, annotation: &str) -> bool {
        self.excluded_annotations.contains(annotation)
    }
}
