//! Symbol table construction
//!
//! Walks a file's CST once and produces its [`FileScope`]: package, import
//! map, and the full class-scope tree with exported names already assigned.
//! Enum scopes get their metadata methods (`Name`, `Ordinal`, `CompareTo`,
//! `ValueOf`, `Values`) synthesized here so that later resolution treats
//! them like any declared member.

use tree_sitter::Node;

use crate::common::Result;
use crate::cst::node::assert_kind;
use crate::cst::{field, named_children, text, unnamed_children, SourceFile};
use crate::lower::types::lower_type_with_params;

use super::class_scope::{ClassScope, EnumConstant};
use super::definition::Definition;
use super::file_scope::FileScope;
use super::resolver::handle_export_status;
use super::type_params::{merge_type_params, JavaType, TypeParam};

/// Generate the symbol table for a single source file
pub fn parse_symbols(file: &SourceFile) -> Result<FileScope> {
    let source = file.bytes();
    let mut scope = FileScope {
        file_name: file.name.clone(),
        ..FileScope::default()
    };

    for node in named_children(file.root()) {
        match node.kind() {
            "package_declaration" => {
                if let Some(name) = node.named_child(0) {
                    scope.package = text(name, source).to_string();
                }
            }
            "import_declaration" => parse_import(&mut scope, node, source),
            "class_declaration" | "interface_declaration" | "enum_declaration"
            | "annotation_type_declaration" => {
                scope
                    .top_level_classes
                    .push(parse_class_scope(node, source, &[])?);
            }
            _ => {}
        }
    }

    Ok(scope)
}

fn parse_import(scope: &mut FileScope, node: Node<'_>, source: &[u8]) {
    // Wildcard and static imports carry no simple-name mapping
    if unnamed_children(node).iter().any(|c| c.kind() == "asterisk") {
        log::debug!("wildcard import ignored: {}", text(node, source));
        return;
    }
    if unnamed_children(node).iter().any(|c| c.kind() == "static") {
        log::debug!("static import ignored: {}", text(node, source));
        return;
    }

    let Some(path) = node.named_child(0) else { return };
    let (Some(name), Some(package)) = (field(path, "name"), field(path, "scope")) else {
        return;
    };
    scope.imports.insert(
        text(name, source).to_string(),
        text(package, source).to_string(),
    );
}

fn parse_class_scope(
    root: Node<'_>,
    source: &[u8],
    parent_type_params: &[TypeParam],
) -> Result<ClassScope> {
    let mut public = false;
    let mut is_abstract = false;
    if let Some(first) = root.named_child(0) {
        if first.kind() == "modifiers" {
            for modifier in unnamed_children(first) {
                match modifier.kind() {
                    "public" => public = true,
                    "abstract" => is_abstract = true,
                    _ => {}
                }
            }
        }
    }

    let name_node = field(root, "name")
        .ok_or_else(|| crate::common::Error::structural("identifier", root.kind()))?;
    assert_kind(name_node, "identifier")?;
    let class_name = text(name_node, source).to_string();

    // Type names keep their source capitalization; only public ones are
    // forced to an exported first letter
    let display_name = if public {
        crate::symbol::resolver::capitalize(&class_name)
    } else {
        class_name.clone()
    };
    let mut scope = ClassScope {
        class: Definition {
            original_name: class_name.clone(),
            name: display_name,
            ..Definition::default()
        },
        is_enum: root.kind() == "enum_declaration",
        is_interface: root.kind() == "interface_declaration",
        is_abstract,
        ..ClassScope::default()
    };

    // Effective type parameters: parent params minus shadowed names, then own
    let own_type_params = parse_type_parameters(field(root, "type_parameters"), source);
    scope.type_parameters = merge_type_params(parent_type_params, &own_type_params);

    for node in named_children(root) {
        match node.kind() {
            "superclass" => {
                if let Some(ty) = node.named_child(0) {
                    scope.superclass = text(ty, source).to_string();
                }
            }
            "super_interfaces" | "extends_interfaces" => {
                for list in named_children(node) {
                    if list.kind() == "type_list" {
                        for ty in named_children(list) {
                            scope
                                .implemented_interfaces
                                .push(text(ty, source).to_string());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(body) = field(root, "body") {
        for node in named_children(body) {
            match node.kind() {
                "enum_constant" => {
                    let Some(name) = field(node, "name") else { continue };
                    let mut constant = EnumConstant {
                        name: text(name, source).to_string(),
                        ..EnumConstant::default()
                    };
                    if let Some(args) = field(node, "arguments") {
                        for arg in named_children(args) {
                            constant.arguments.push(text(arg, source).to_string());
                        }
                    }
                    constant.has_body = field(node, "body").is_some();
                    scope.enum_constants.push(constant);
                }
                "enum_body_declarations" => {
                    for decl in named_children(node) {
                        parse_class_member(&mut scope, decl, source)?;
                    }
                }
                _ => parse_class_member(&mut scope, node, source)?,
            }
        }
    }

    if scope.is_enum {
        synthesize_enum_methods(&mut scope);
    }

    Ok(scope)
}

fn parse_class_member(scope: &mut ClassScope, node: Node<'_>, source: &[u8]) -> Result<()> {
    match node.kind() {
        "field_declaration" => {
            let mut public = false;
            let mut is_static = false;
            if let Some(first) = node.named_child(0) {
                if first.kind() == "modifiers" {
                    for modifier in unnamed_children(first) {
                        match modifier.kind() {
                            "public" => public = true,
                            "static" => is_static = true,
                            _ => {}
                        }
                    }
                }
            }

            let Some(declarator) = field(node, "declarator") else {
                return Ok(());
            };
            let Some(name_node) = field(declarator, "name") else {
                return Ok(());
            };
            assert_kind(name_node, "identifier")?;

            let Some(mut type_node) = field(node, "type") else {
                return Ok(());
            };
            // Qualified field types resolve through their tail segment
            if type_node.kind() == "scoped_type_identifier" && type_node.named_child_count() > 0 {
                if let Some(tail) = type_node.named_child(type_node.named_child_count() - 1) {
                    type_node = tail;
                }
            }

            let field_name = text(name_node, source).to_string();
            let params = scope.type_parameter_names();
            scope.fields.push(Definition {
                name: handle_export_status(public, &field_name),
                original_name: field_name,
                go_type: lower_type_with_params(type_node, source, &params).to_string(),
                original_type: text(type_node, source).to_string(),
                is_static,
                ..Definition::default()
            });
        }
        "method_declaration" | "abstract_method_declaration" | "constructor_declaration" => {
            let mut public = false;
            let mut is_static = false;
            if let Some(first) = node.named_child(0) {
                if first.kind() == "modifiers" {
                    for modifier in unnamed_children(first) {
                        match modifier.kind() {
                            "public" => public = true,
                            "static" => is_static = true,
                            _ => {}
                        }
                    }
                }
            }

            let Some(name_node) = field(node, "name") else {
                return Ok(());
            };
            assert_kind(name_node, "identifier")?;
            let name = text(name_node, source).to_string();

            let method_type_params = parse_type_parameters(field(node, "type_parameters"), source);
            let combined = merge_type_params(&scope.type_parameters, &method_type_params);
            let combined_names: Vec<String> = combined.iter().map(|tp| tp.name.clone()).collect();

            let mut declaration = Definition {
                name: handle_export_status(public, &name),
                original_name: name,
                type_parameters: method_type_params.clone(),
                is_static,
                ..Definition::default()
            };

            let is_constructor = node.kind() == "constructor_declaration";
            if is_constructor {
                // Constructors become plain functions named after the type;
                // non-public constructors stay unexported
                declaration.rename(format!(
                    "{}{}",
                    handle_export_status(public, "New"),
                    scope.class.original_name
                ));
                declaration.is_constructor = true;
                declaration.go_type = scope.class.original_name.clone();
            } else if let Some(return_type) = field(node, "type") {
                declaration.go_type =
                    lower_type_with_params(return_type, source, &combined_names).to_string();
                declaration.original_type = text(return_type, source).to_string();
            }

            if let Some(parameters) = field(node, "parameters") {
                for parameter in named_children(parameters) {
                    let (param_name, param_type) = if parameter.kind() == "spread_parameter" {
                        // (type) (variable_declarator name: (identifier))
                        let name = parameter
                            .named_child(1)
                            .and_then(|d| field(d, "name"))
                            .map(|n| text(n, source).to_string())
                            .unwrap_or_default();
                        (name, parameter.named_child(0))
                    } else {
                        let name = field(parameter, "name")
                            .map(|n| text(n, source).to_string())
                            .unwrap_or_default();
                        (name, field(parameter, "type"))
                    };
                    let Some(param_type) = param_type else { continue };

                    declaration.parameters.push(Definition {
                        name: param_name.clone(),
                        original_name: param_name,
                        go_type: lower_type_with_params(param_type, source, &combined_names)
                            .to_string(),
                        original_type: text(param_type, source).to_string(),
                        ..Definition::default()
                    });
                }
            }

            if let Some(body) = field(node, "body") {
                let method_scope = parse_scope(body, source);
                if !method_scope.is_empty() {
                    declaration.children.extend(method_scope.children);
                }
            }

            // Go has no type parameters on methods, so instance generic
            // methods are hosted on helper types. Constructors lower to
            // plain functions and never need one.
            if node.kind() != "constructor_declaration"
                && !method_type_params.is_empty()
                && !is_static
            {
                declaration.requires_helper = true;
                declaration.helper_name =
                    format!("{}{}Helper", scope.class.name, declaration.name);
            }

            scope.methods.push(declaration);
        }
        "class_declaration" | "interface_declaration" | "enum_declaration" => {
            let mut nested = parse_class_scope(node, source, &scope.type_parameters)?;
            // Nested types fold into their parent's name
            let prefixed = format!("{}{}", scope.class.name, nested.class.name);
            nested.class.rename(prefixed);
            scope.subclasses.push(nested);
        }
        _ => {}
    }
    Ok(())
}

fn parse_type_parameters(node: Option<Node<'_>>, source: &[u8]) -> Vec<TypeParam> {
    let Some(node) = node else { return Vec::new() };

    let mut params = Vec::new();
    for param in named_children(node) {
        if param.kind() != "type_parameter" {
            continue;
        }
        let Some(name) = named_children(param)
            .into_iter()
            .find(|c| c.kind() == "identifier" || c.kind() == "type_identifier")
        else {
            continue;
        };
        let mut type_param = TypeParam::new(text(name, source));
        for child in named_children(param) {
            if child.kind() == "type_bound" {
                for bound in named_children(child) {
                    type_param.bounds.push(JavaType::new(text(bound, source)));
                }
            }
        }
        params.push(type_param);
    }
    params
}

/// Record the nested scopes of a method body; loop and if scopes become
/// children so identifier resolution can descend into them
fn parse_scope(root: Node<'_>, source: &[u8]) -> Definition {
    let mut def = Definition::default();
    for node in named_children(root) {
        match node.kind() {
            "for_statement" | "enhanced_for_statement" | "while_statement" | "if_statement" => {
                def.children.push(parse_scope(node, source));
            }
            _ => {}
        }
    }
    def
}

/// Append the enum metadata methods every enum scope carries
fn synthesize_enum_methods(scope: &mut ClassScope) {
    let class_original = scope.class.original_name.clone();
    let class_name = scope.class.name.clone();
    let pointer_type = format!("*{}", class_name);

    let mut add = |definition: Definition| {
        if scope
            .methods
            .iter()
            .any(|m| m.original_name == definition.original_name)
        {
            return;
        }
        scope.methods.push(definition);
    };

    add(Definition {
        original_name: "name".to_string(),
        name: "Name".to_string(),
        original_type: "String".to_string(),
        go_type: "string".to_string(),
        ..Definition::default()
    });
    add(Definition {
        original_name: "ordinal".to_string(),
        name: "Ordinal".to_string(),
        original_type: "int".to_string(),
        go_type: "int".to_string(),
        ..Definition::default()
    });
    add(Definition {
        original_name: "compareTo".to_string(),
        name: "CompareTo".to_string(),
        original_type: "int".to_string(),
        go_type: "int".to_string(),
        parameters: vec![Definition {
            original_name: "other".to_string(),
            name: "other".to_string(),
            original_type: class_original.clone(),
            go_type: pointer_type.clone(),
            ..Definition::default()
        }],
        ..Definition::default()
    });
    add(Definition {
        original_name: "valueOf".to_string(),
        name: "ValueOf".to_string(),
        original_type: class_original.clone(),
        go_type: pointer_type.clone(),
        is_static: true,
        parameters: vec![Definition {
            original_name: "name".to_string(),
            name: "name".to_string(),
            original_type: "String".to_string(),
            go_type: "string".to_string(),
            ..Definition::default()
        }],
        ..Definition::default()
    });
    add(Definition {
        original_name: "values".to_string(),
        name: "Values".to_string(),
        original_type: format!("{}[]", class_original),
        go_type: format!("[]{}", pointer_type),
        is_static: true,
        ..Definition::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> FileScope {
        let file = SourceFile::parse("Test.java", source).unwrap();
        parse_symbols(&file).unwrap()
    }

    #[test]
    fn test_package_and_imports() {
        let symbols = parse(
            "package com.example;\nimport java.util.List;\nimport java.util.*;\npublic class A {}",
        );
        assert_eq!(symbols.package, "com.example");
        assert_eq!(symbols.imports.get("List").map(String::as_str), Some("java.util"));
        assert_eq!(symbols.imports.len(), 1);
    }

    #[test]
    fn test_member_export_status() {
        let symbols = parse(
            "public class A { public int count; String tag; public void run() {} void halt() {} }",
        );
        let class = symbols.base_class().unwrap();
        assert_eq!(class.find_field_by_original_name("count").unwrap().name, "Count");
        assert_eq!(class.find_field_by_original_name("tag").unwrap().name, "tag");
        assert_eq!(class.methods_by_original_name("run")[0].name, "Run");
        assert_eq!(class.methods_by_original_name("halt")[0].name, "halt");
    }

    #[test]
    fn test_constructor_renamed_and_typed() {
        let symbols = parse("public class Pair { public Pair(int a) {} }");
        let class = symbols.base_class().unwrap();
        let ctor = class.methods_by(|m| m.is_constructor)[0];
        assert_eq!(ctor.name, "NewPair");
        assert_eq!(ctor.go_type, "Pair");
        assert_eq!(ctor.parameters.len(), 1);
    }

    #[test]
    fn test_type_parameter_shadowing_in_nested_class() {
        let symbols = parse("public class Outer<T, U> { class Inner<T> {} }");
        let outer = symbols.find_class_scope("Outer").unwrap();
        assert_eq!(outer.type_parameter_names(), vec!["T", "U"]);

        let inner = symbols.find_class_scope("Inner").unwrap();
        assert_eq!(inner.type_parameter_names(), vec!["U", "T"]);
        assert_eq!(inner.class.name, "OuterInner");
    }

    #[test]
    fn test_type_parameter_bounds_recorded() {
        let symbols = parse("public class Box<T extends Number & Comparable<T>> {}");
        let class = symbols.base_class().unwrap();
        let bounds: Vec<&str> = class.type_parameters[0]
            .bounds
            .iter()
            .map(|b| b.original.as_str())
            .collect();
        assert_eq!(bounds, vec!["Number", "Comparable<T>"]);
    }

    #[test]
    fn test_instance_generic_method_requires_helper() {
        let symbols = parse(
            "public class Box<T> { public <R> R identity(R v) { return v; } public static <X> X id(X v) { return v; } }",
        );
        let class = symbols.base_class().unwrap();

        let identity = class.methods_by_original_name("identity")[0];
        assert!(identity.requires_helper);
        assert_eq!(identity.helper_name, "BoxIdentityHelper");

        let id = class.methods_by_original_name("id")[0];
        assert!(!id.requires_helper);
    }

    #[test]
    fn test_spread_parameter_element_type() {
        let symbols = parse("public class U<T> { public void all(T... values) {} }");
        let class = symbols.base_class().unwrap();
        let method = class.methods_by_original_name("all")[0];
        assert_eq!(method.parameters[0].original_type, "T");
        assert_eq!(method.parameters[0].go_type, "T");
    }

    #[test]
    fn test_enum_symbols_and_synthesized_methods() {
        let symbols = parse(
            "public enum Switch implements Flag { ON { public boolean isOn() { return true; } }, OFF; public boolean isOn() { return false; } }",
        );
        let class = symbols.base_class().unwrap();
        assert!(class.is_enum);
        assert_eq!(class.implemented_interfaces, vec!["Flag"]);
        assert_eq!(class.enum_constants.len(), 2);
        assert!(class.enum_constants[0].has_body);
        assert!(!class.enum_constants[1].has_body);

        for name in ["Name", "Ordinal", "CompareTo", "ValueOf", "Values"] {
            assert!(!class.methods_by_name(name).is_empty(), "missing synthetic {}", name);
        }
        assert!(!class.methods_by_original_name("isOn").is_empty());
    }

    #[test]
    fn test_enum_constant_arguments_recorded() {
        let symbols = parse(
            "enum Planet { MERCURY(3.3e23, 2.4e6), VENUS(4.8e24, 6.0e6); Planet(double m, double r) {} }",
        );
        let class = symbols.base_class().unwrap();
        assert_eq!(class.enum_constants[0].arguments.len(), 2);
        assert!(class.has_enum_constructor_args());
    }

    #[test]
    fn test_superclass_and_abstract_flags() {
        let symbols = parse(
            "public abstract class Shape {}\nclass Square extends Shape implements Drawable {}",
        );
        let shape = symbols.find_class_scope("Shape").unwrap();
        assert!(shape.is_abstract);

        let square = symbols.find_class_scope("Square").unwrap();
        assert_eq!(square.superclass, "Shape");
        assert_eq!(square.implemented_interfaces, vec!["Drawable"]);
    }
}
