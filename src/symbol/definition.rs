use super::type_params::{type_param_names, TypeParam};

/// The name and type of a single symbol: a field, parameter, method,
/// constructor, or type.
///
/// Invariants: `name` is never empty when `original_name` is non-empty, and
/// for methods the parameter list is index-aligned with the original Java
/// parameter types.
#[derive(Debug, Clone, Default)]
pub struct Definition {
    /// The original Java name
    pub original_name: String,
    /// The display name in the output, usually a re-capitalization
    pub name: String,
    /// Original Java type of the symbol, as written
    pub original_type: String,
    /// Lowered Go type, rendered
    pub go_type: String,
    /// Type parameters declared on this definition (methods/constructors)
    pub type_parameters: Vec<TypeParam>,
    /// Whether this definition is static (methods/fields)
    pub is_static: bool,
    /// Set on constructors, which follow their own naming and type rules
    pub is_constructor: bool,
    /// An instance method declaring its own type parameters must be hosted
    /// on a helper type, because Go forbids type parameters on methods
    pub requires_helper: bool,
    /// Name of the helper type, when `requires_helper` is set
    pub helper_name: String,
    /// Ordered parameters, when the definition is callable
    pub parameters: Vec<Definition>,
    /// Nested scopes inside a method body (loop and if scopes)
    pub children: Vec<Definition>,
}

impl Definition {
    /// Change the display name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Find a parameter by its original name
    pub fn parameter_by_name(&self, name: &str) -> Option<&Definition> {
        self.parameters.iter().find(|p| p.original_name == name)
    }

    /// The original Java types of all parameters, in order
    pub fn original_parameter_types(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.original_type.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.original_name.is_empty() && self.children.is_empty()
    }

    pub fn type_parameter_names(&self) -> Vec<String> {
        type_param_names(&self.type_parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, original_type: &str) -> Definition {
        Definition {
            original_name: name.to_string(),
            name: name.to_string(),
            original_type: original_type.to_string(),
            ..Definition::default()
        }
    }

    #[test]
    fn test_parameter_lookup_and_types() {
        let method = Definition {
            original_name: "put".to_string(),
            name: "Put".to_string(),
            parameters: vec![param("key", "K"), param("value", "V")],
            ..Definition::default()
        };

        assert_eq!(method.parameter_by_name("value").unwrap().original_type, "V");
        assert!(method.parameter_by_name("missing").is_none());
        assert_eq!(method.original_parameter_types(), vec!["K", "V"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Definition::default().is_empty());
        let named = Definition { original_name: "x".into(), ..Definition::default() };
        assert!(!named.is_empty());
    }
}
