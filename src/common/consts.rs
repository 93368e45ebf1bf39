//! Shared constants for the translator

/// Go keywords that emitted identifiers must not collide with.
///
/// A renamed member whose lowercase form lands on one of these gets a
/// trailing underscore appended by the resolver.
pub const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Returns true if `name` is a Go keyword
pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// File extension consumed by the translator
pub const JAVA_EXTENSION: &str = "java";

/// File extension produced by the translator
pub const GO_EXTENSION: &str = "go";
