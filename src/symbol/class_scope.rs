use super::definition::Definition;
use super::type_params::TypeParam;

/// A single enum constant as declared in the enum head
#[derive(Debug, Clone, Default)]
pub struct EnumConstant {
    /// The constant's identifier (e.g. `NORTH`, `PENDING`)
    pub name: String,
    /// Source text of each constructor argument, as written:
    /// `PENDING("pending", 1)` stores `["\"pending\"", "1"]`. The
    /// declaration lowerer re-reads the live CST nodes for expression
    /// lowering; this list drives constructor matching.
    pub arguments: Vec<String>,
    /// Whether the constant carries a class body overriding methods
    pub has_body: bool,
}

/// One Java class, interface, or enum, with all of its members
#[derive(Debug, Clone, Default)]
pub struct ClassScope {
    /// The definition for the type itself
    pub class: Definition,
    /// Superclass as a Java type string; empty when there is none
    pub superclass: String,
    /// Implemented interfaces (or, for an interface, extended interfaces)
    /// as Java type strings, in source order
    pub implemented_interfaces: Vec<String>,
    /// Effective type parameters: inherited-then-own, with inner names
    /// shadowing outer ones
    pub type_parameters: Vec<TypeParam>,
    /// Instance and static fields
    pub fields: Vec<Definition>,
    /// Methods and constructors (constructors identified by `is_constructor`)
    pub methods: Vec<Definition>,
    /// Enum constants, in source order (enums only)
    pub enum_constants: Vec<EnumConstant>,
    /// Nested type declarations
    pub subclasses: Vec<ClassScope>,
    pub is_enum: bool,
    pub is_interface: bool,
    pub is_abstract: bool,
}

impl ClassScope {
    /// Whether `name` is a type parameter of this class
    pub fn is_type_parameter(&self, name: &str) -> bool {
        self.type_parameters.iter().any(|tp| tp.name == name)
    }

    pub fn type_parameter_names(&self) -> Vec<String> {
        super::type_params::type_param_names(&self.type_parameters)
    }

    /// Methods matching a predicate, in declaration order
    pub fn methods_by(&self, criteria: impl Fn(&Definition) -> bool) -> Vec<&Definition> {
        self.methods.iter().filter(|m| criteria(m)).collect()
    }

    pub fn methods_by_name(&self, name: &str) -> Vec<&Definition> {
        self.methods_by(|m| m.name == name)
    }

    pub fn methods_by_original_name(&self, original_name: &str) -> Vec<&Definition> {
        self.methods_by(|m| m.original_name == original_name)
    }

    pub fn find_field_by_original_name(&self, name: &str) -> Option<&Definition> {
        self.fields.iter().find(|f| f.original_name == name)
    }

    /// Resolve a method by its original name, staticness, and the
    /// approximate Java types of its arguments.
    ///
    /// Candidates must match on name, staticness and arity. Among those,
    /// overloads whose declared parameter types are compatible with the
    /// inferred argument types win; an unknown argument type (empty string)
    /// or a declared type that is a type parameter is compatible with
    /// anything. When several candidates survive, or none survive the type
    /// filter, the first match in declaration order is used and a warning
    /// is logged.
    pub fn find_callable(
        &self,
        name: &str,
        arg_types: &[String],
        want_static: bool,
    ) -> Option<&Definition> {
        let by_arity: Vec<&Definition> = self.methods_by(|m| {
            !m.is_constructor
                && m.original_name == name
                && m.is_static == want_static
                && m.parameters.len() == arg_types.len()
        });
        if by_arity.is_empty() {
            return None;
        }

        let compatible: Vec<&Definition> = by_arity
            .iter()
            .copied()
            .filter(|m| {
                m.parameters.iter().zip(arg_types.iter()).all(|(p, arg_ty)| {
                    arg_ty.is_empty()
                        || p.original_type.is_empty()
                        || p.original_type == *arg_ty
                        || self.is_type_parameter(&p.original_type)
                        || m.type_parameters.iter().any(|tp| tp.name == p.original_type)
                })
            })
            .collect();

        match compatible.len() {
            0 => {
                log::warn!(
                    "no overload of `{}` matches inferred argument types {:?}, using first arity match",
                    name,
                    arg_types
                );
                Some(by_arity[0])
            }
            1 => Some(compatible[0]),
            _ => {
                log::warn!("ambiguous overload for `{}`, using first declaration", name);
                Some(compatible[0])
            }
        }
    }

    /// Resolve a constructor by the approximate Java types of its arguments,
    /// with the same compatibility and first-match rules as [`Self::find_callable`]
    pub fn find_constructor(&self, arg_types: &[String]) -> Option<&Definition> {
        let by_arity: Vec<&Definition> = self
            .methods_by(|m| m.is_constructor && m.parameters.len() == arg_types.len());
        if by_arity.is_empty() {
            return None;
        }

        let compatible: Vec<&Definition> = by_arity
            .iter()
            .copied()
            .filter(|m| {
                m.parameters.iter().zip(arg_types.iter()).all(|(p, arg_ty)| {
                    arg_ty.is_empty()
                        || p.original_type.is_empty()
                        || p.original_type == *arg_ty
                        || self.is_type_parameter(&p.original_type)
                })
            })
            .collect();

        match compatible.len() {
            0 => Some(by_arity[0]),
            1 => Some(compatible[0]),
            _ => {
                log::warn!(
                    "ambiguous constructor overload for `{}`, using first declaration",
                    self.class.original_name
                );
                Some(compatible[0])
            }
        }
    }

    /// Search this class and its nested classes for a class definition by
    /// original name
    pub fn find_class(&self, name: &str) -> Option<&Definition> {
        if self.class.original_name == name {
            return Some(&self.class);
        }
        self.subclasses.iter().find_map(|sub| sub.find_class(name))
    }

    /// Search this class and its nested classes for a class scope by
    /// original name
    pub fn find_class_scope(&self, name: &str) -> Option<&ClassScope> {
        if self.class.original_name == name {
            return Some(self);
        }
        self.subclasses.iter().find_map(|sub| sub.find_class_scope(name))
    }

    /// True when any constant of this enum passes constructor arguments
    pub fn has_enum_constructor_args(&self) -> bool {
        self.is_enum && self.enum_constants.iter().any(|ec| !ec.arguments.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(original: &str, name: &str, param_types: &[&str]) -> Definition {
        Definition {
            original_name: original.to_string(),
            name: name.to_string(),
            parameters: param_types
                .iter()
                .map(|t| Definition {
                    original_name: "p".to_string(),
                    name: "p".to_string(),
                    original_type: t.to_string(),
                    ..Definition::default()
                })
                .collect(),
            ..Definition::default()
        }
    }

    #[test]
    fn test_find_callable_prefers_type_compatible_overload() {
        let scope = ClassScope {
            methods: vec![
                method("of", "Of", &["int"]),
                method("of", "Of", &["String"]),
            ],
            ..ClassScope::default()
        };

        let found = scope.find_callable("of", &["String".to_string()], false).unwrap();
        assert_eq!(found.parameters[0].original_type, "String");

        // Unknown argument types fall back to the first arity match
        let first = scope.find_callable("of", &[String::new()], false).unwrap();
        assert_eq!(first.parameters[0].original_type, "int");

        assert!(scope.find_callable("of", &[], false).is_none());
        assert!(scope.find_callable("of", &["int".to_string()], true).is_none());
    }

    #[test]
    fn test_find_class_scope_recurses() {
        let inner = ClassScope {
            class: Definition {
                original_name: "Node".into(),
                name: "ListNode".into(),
                ..Definition::default()
            },
            ..ClassScope::default()
        };
        let outer = ClassScope {
            class: Definition {
                original_name: "List".into(),
                name: "List".into(),
                ..Definition::default()
            },
            subclasses: vec![inner],
            ..ClassScope::default()
        };

        assert_eq!(outer.find_class_scope("Node").unwrap().class.name, "ListNode");
        assert!(outer.find_class_scope("Missing").is_none());
    }
}
