//! Inheritance: embedded superclasses, promoted methods, super calls

mod common;

use common::{flat, translate};

#[test]
fn test_extends_and_implements_become_embedded_fields() {
    let src = r#"
package inherit;
public class Cat extends Animal implements Pet {
    public void pat() {}
}
"#;
    let out = translate(src);
    let flat_out = flat(&out);

    assert!(flat_out.contains("type Cat struct { *Animal Pet }"), "got:\n{}", out);
    assert!(!flat_out.contains("*Pet }"), "expected bare interface embed, got:\n{}", out);
}

#[test]
fn test_inherited_method_call_resolves_to_exported_name() {
    let src = r#"
package inherit.speak;
public class Animal {
    public void speak() {}
}
public class Cat extends Animal {
    public void test() { this.speak(); }
}
"#;
    let out = translate(src);
    assert!(out.contains("ct.Speak()"), "got:\n{}", out);
}

#[test]
fn test_inherited_field_resolves_through_hierarchy() {
    let src = r#"
package inherit.fields;
public class Base {
    protected int value;
}
public class Child extends Base {
    public int doubled() { return value * 2; }
}
"#;
    let out = translate(src);
    assert!(out.contains("return cd.value * 2"), "got:\n{}", out);
}

#[test]
fn test_constructor_chains_through_super() {
    let src = r#"
package inherit.ctors;
public class Base {
    int value;
    public Base(int value) { this.value = value; }
}
public class Child extends Base {
    String name;
    public Child(int value, String name) {
        super(value);
        this.name = name;
    }
}
"#;
    let out = translate(src);

    assert!(out.contains("func NewBase(value int32) *Base {"), "got:\n{}", out);
    assert!(out.contains("be.value = value"), "got:\n{}", out);
    assert!(out.contains("func NewChild(value int32, name string) *Child {"), "got:\n{}", out);
    assert!(out.contains("cd.Base = NewBase(value)"), "got:\n{}", out);
    assert!(out.contains("cd.name = name"), "got:\n{}", out);
    assert!(out.contains("return cd"), "got:\n{}", out);
}

#[test]
fn test_super_method_call_goes_through_embedded_field() {
    let src = r#"
package inherit.supers;
public class Base {
    public String describe() { return "base"; }
}
public class Leaf extends Base {
    public String describe() { return "leaf-" + super.describe(); }
}
"#;
    let out = translate(src);
    assert!(out.contains("return \"leaf-\" + lf.Base.Describe()"), "got:\n{}", out);
}

#[test]
fn test_unresolved_superclass_embeds_verbatim() {
    let src = r#"
package inherit.external;
public class Widget extends JComponent {
    public void paint() {}
}
"#;
    let out = translate(src);
    assert!(flat(&out).contains("type Widget struct { *JComponent }"), "got:\n{}", out);
}

#[test]
fn test_cross_file_inheritance_resolves_members() {
    common::init();
    let mut translator = jago::Translator::new(jago::Config::default());
    translator
        .add_source(
            "Animal.java",
            "package zoo;\npublic class Animal { public void speak() {} }",
        )
        .unwrap();
    translator
        .add_source(
            "Cat.java",
            "package zoo;\npublic class Cat extends Animal { public void test() { this.speak(); } }",
        )
        .unwrap();

    let outputs = translator.translate().unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].name, "Animal.go");
    assert_eq!(outputs[1].name, "Cat.go");

    let cat = &outputs[1].go_source;
    assert!(flat(cat).contains("type Cat struct { *Animal }"), "got:\n{}", cat);
    assert!(cat.contains("ct.Speak()"), "got:\n{}", cat);
}
