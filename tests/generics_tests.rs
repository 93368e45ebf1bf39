//! Generics: generic classes, bounds, diamond inference, helper types

mod common;

use common::{flat, translate};

#[test]
fn test_generic_class_with_bounds() {
    let src = r#"
package gen.integration;
public class Pair<K extends Number, V> {
    K key;
    V value;
    public Pair(K k, V v) {
        this.key = k;
        this.value = v;
    }
    public K getKey() { return this.key; }
    public V getValue() { return this.value; }
}
"#;
    let out = translate(src);

    assert!(out.contains("type Pair[K *Number, V any] struct {"), "got:\n{}", out);
    let flat_out = flat(&out);
    assert!(flat_out.contains("key K"), "got:\n{}", out);
    assert!(flat_out.contains("value V"), "got:\n{}", out);
    assert!(out.contains("func NewPair[K *Number, V any](k K, v V) *Pair[K, V] {"), "got:\n{}", out);
    assert!(out.contains("pr := new(Pair[K, V])"), "got:\n{}", out);
    assert!(out.contains("pr.key = k"), "got:\n{}", out);
    assert!(out.contains("func (pr *Pair[K, V]) GetKey() K {"), "got:\n{}", out);
    assert!(out.contains("return pr.key"), "got:\n{}", out);
}

#[test]
fn test_multiple_bounds_become_constraint_interface() {
    let src = r#"
package gen.bounds;
public class Bounded<T extends Number & Comparable<T>> {
    T value;
}
"#;
    let out = translate(src);
    assert!(
        out.contains("type Bounded[T interface{ *Number; *Comparable[T] }] struct {"),
        "got:\n{}",
        out
    );
}

#[test]
fn test_nested_generic_field_type() {
    let src = r#"
package gen.nested;
import java.util.List;
import java.util.Map;
public class Container {
    Map<String, List<Integer>> m;
}
"#;
    let out = translate(src);
    assert!(out.contains("m *Map[string, *List[*Integer]]"), "got:\n{}", out);
}

#[test]
fn test_diamond_explicit_and_raw_constructors() {
    let src = r#"
package gen.diamonds;
public class Box<T> {
    T value;
    public Box() {}
    public static void test() {
        Box<String> inferred = new Box<>();
        Box<Integer> explicit = new Box<Integer>();
        Box raw = new Box();
    }
}
"#;
    let out = translate(src);

    assert!(out.contains("inferred := NewBox[string]()"), "got:\n{}", out);
    assert!(out.contains("explicit := NewBox[*Integer]()"), "got:\n{}", out);
    assert!(out.contains("raw := NewBox()"), "got:\n{}", out);
}

#[test]
fn test_diamond_infers_multiple_type_arguments() {
    let src = r#"
package gen.multi;
public class Pair<K, V> {
    K key;
    V value;
    public Pair(K k, V v) {
        this.key = k;
        this.value = v;
    }
    public static Pair<String, Integer> create(String k, Integer v) {
        Pair<String, Integer> pair = new Pair<>(k, v);
        return pair;
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("pair := NewPair[string, *Integer](k, v)"), "got:\n{}", out);
}

#[test]
fn test_instance_generic_method_helper_end_to_end() {
    let src = r#"
package gen.helpers;
public class Box<T> {
    public <R> R identity(R value) { return value; }

    public static Foo callFoo(Box<Foo> box, Foo value) {
        return box.identity(value);
    }

    public static <X> X callGeneric(Box<X> box, X value) {
        return box.identity(value);
    }
}
"#;
    let out = translate(src);

    assert!(out.contains("type BoxIdentityHelper[T any, R any] struct {"), "got:\n{}", out);
    assert!(flat(&out).contains("recv *Box[T]"), "got:\n{}", out);
    assert!(
        out.contains("func NewBoxIdentityHelper[T any, R any](recv *Box[T]) *BoxIdentityHelper[T, R] {"),
        "got:\n{}",
        out
    );
    assert!(out.contains("func (br *BoxIdentityHelper[T, R]) Identity(value R) R {"), "got:\n{}", out);
    assert!(out.contains("bx := br.recv"), "got:\n{}", out);
    assert!(out.contains("NewBoxIdentityHelper[*Foo, *Foo](box).Identity(value)"), "got:\n{}", out);
    assert!(out.contains("NewBoxIdentityHelper[X, X](box).Identity(value)"), "got:\n{}", out);
    // The class itself carries no Identity method
    assert!(!flat(&out).contains("*Box[T]) Identity"), "got:\n{}", out);
}

#[test]
fn test_helper_infers_nested_generic_type_args() {
    let src = r#"
package gen.helpers2;
public class Box<T> {
    public <R> R identity(R value) { return value; }

    public static List<Foo> call(Box<List<Foo>> box, List<Foo> value) {
        return box.identity(value);
    }
}
"#;
    let out = translate(src);
    assert!(
        out.contains("NewBoxIdentityHelper[*List[*Foo], *List[*Foo]](box).Identity(value)"),
        "got:\n{}",
        out
    );
}

#[test]
fn test_static_generic_method_with_explicit_type_args() {
    let src = r#"
package gen.statics;
public class Utils {
    static <T> T id(T value) { return value; }

    public static void test() {
        Foo f = null;
        Foo g = Utils.<Foo>id(f);
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("func id[T any](value T) T {"), "got:\n{}", out);
    assert!(out.contains("g := id[*Foo](f)"), "got:\n{}", out);
}

#[test]
fn test_nested_class_inherits_parent_type_params() {
    let src = r#"
package gen.nestedtp;
public class Outer<T> {
    public class Inner<U> {
        T t;
        U u;
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("type Outer[T any] struct {"), "got:\n{}", out);
    assert!(out.contains("type OuterInner[T any, U any] struct {"), "got:\n{}", out);
}

#[test]
fn test_inner_class_constructor_reuses_parent_type_params() {
    let src = r#"
package gen.linked;
public class LinkedList<E> {
    E value;
    Node head;

    public LinkedList() {}

    class Node {
        E element;
        Node next;

        Node(E e) {
            this.element = e;
        }
    }

    public void addFirst(E e) {
        Node newNode = new Node(e);
        this.head = newNode;
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("newNode := newNode[E](e)"), "got:\n{}", out);
    assert!(out.contains("type LinkedListNode[E any] struct {"), "got:\n{}", out);
}

#[test]
fn test_variadic_type_parameter_stays_bare() {
    let src = r#"
package gen.variadic;
public class Utils<T> {
    public void process(T... values) {}
}
"#;
    let out = translate(src);
    assert!(out.contains("func (us *Utils[T]) Process(values ...T) {"), "got:\n{}", out);
}
