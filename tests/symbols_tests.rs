//! Symbol phase: scopes, synthesized members, helper bookkeeping

mod common;

use common::init;
use jago::cst::SourceFile;
use jago::symbol::{parse_symbols, resolve_file};

fn symbols_of(source: &str) -> jago::symbol::FileScope {
    init();
    let file = SourceFile::parse("Test.java", source).unwrap();
    let mut symbols = parse_symbols(&file).unwrap();
    resolve_file(&mut symbols);
    symbols
}

#[test]
fn test_enum_scope_records_interfaces_and_synthesizes_methods() {
    let symbols = symbols_of(
        r#"
package enums.symbols;
interface Flag { boolean isOn(); }
public enum Switch implements Flag {
    ON { public boolean isOn() { return true; } },
    OFF;
    public boolean isOn() { return false; }
}
"#,
    );

    let switch_scope = symbols.find_class_scope("Switch").expect("Switch scope");
    assert!(switch_scope.is_enum);
    assert_eq!(switch_scope.implemented_interfaces, vec!["Flag"]);

    assert_eq!(switch_scope.enum_constants.len(), 2);
    assert!(switch_scope.enum_constants[0].has_body);
    assert!(!switch_scope.enum_constants[1].has_body);

    for synthetic in ["Name", "Ordinal", "CompareTo", "ValueOf"] {
        assert!(
            !switch_scope.methods_by_name(synthetic).is_empty(),
            "expected synthetic method {}",
            synthetic
        );
    }
    assert!(!switch_scope.methods_by_original_name("isOn").is_empty());
    assert!(switch_scope.methods_by_original_name("apply").is_empty());
}

#[test]
fn test_superclass_recorded_and_resolvable_across_scopes() {
    let symbols = symbols_of(
        r#"
package inherit.symbols;
public class Animal {
    public void speak() {}
}
public class Cat extends Animal {
    public void test() { this.speak(); }
}
"#,
    );

    let cat = symbols.find_class_scope("Cat").expect("Cat scope");
    assert_eq!(cat.superclass, "Animal");

    let animal = symbols.find_class_scope("Animal").expect("Animal scope");
    assert_eq!(animal.methods_by_original_name("speak")[0].name, "Speak");
}

#[test]
fn test_method_and_field_lowered_types_recorded() {
    let symbols = symbols_of(
        r#"
package types.symbols;
public class Box<T> {
    T value;
    java.util.List name;
    public T get(int index) { return value; }
}
"#,
    );

    let class = symbols.base_class().unwrap();
    assert_eq!(class.find_field_by_original_name("value").unwrap().go_type, "T");

    let get = class.methods_by_original_name("get")[0];
    assert_eq!(get.go_type, "T");
    assert_eq!(get.parameters[0].go_type, "int32");
    assert_eq!(get.parameters[0].original_type, "int");
}

#[test]
fn test_helper_name_uniqueness_across_overloads() {
    let symbols = symbols_of(
        r#"
package helpers.symbols;
public class Box<T> {
    public <R> R convert(R value) { return value; }
    public <R> R convert(R value, int count) { return value; }
}
"#,
    );

    let class = symbols.base_class().unwrap();
    let helpers: Vec<&str> = class
        .methods_by_original_name("convert")
        .iter()
        .map(|m| m.helper_name.as_str())
        .collect();
    assert_eq!(helpers, vec!["BoxConvertHelper", "BoxConvertHelper2"]);
}

#[test]
fn test_imports_feed_package_lookup() {
    let symbols = symbols_of(
        r#"
package imports.symbols;
import zoo.Animal;
public class Keeper {}
"#,
    );
    assert_eq!(symbols.package_of("Animal"), "zoo");
    assert_eq!(symbols.package_of("Unimported"), "imports.symbols");
}
