//! Expressions: literals, markers, casts, arrays, invocation rewriting

mod common;

use common::{flat, translate};

fn wrap(body: &str) -> String {
    format!(
        "package exprs;\npublic class Holder {{\n    public int go(int x, int y) {{\n{}\n        return x;\n    }}\n}}",
        body
    )
}

#[test]
fn test_literal_suffixes() {
    let out = translate(&wrap("long a = 5L;\nfloat b = 1.5F;\ndouble c = 2.5D;\nint d = 0x1F;"));
    assert!(out.contains("a := int64(5)"), "got:\n{}", out);
    assert!(out.contains("b := float32(1.5)"), "got:\n{}", out);
    assert!(out.contains("c := float64(2.5)"), "got:\n{}", out);
    assert!(out.contains("d := 0x1F"), "got:\n{}", out);
}

#[test]
fn test_null_and_boolean_literals() {
    let out = translate(&wrap("Object o = null;\nboolean t = true;"));
    assert!(out.contains("o := nil"), "got:\n{}", out);
    assert!(out.contains("t := true"), "got:\n{}", out);
}

#[test]
fn test_ternary_becomes_helper_call() {
    let out = translate(&wrap("int m = x > y ? x : y;"));
    assert!(out.contains("m := ternary(x > y, x, y)"), "got:\n{}", out);
}

#[test]
fn test_cast_becomes_type_assertion() {
    let out = translate(&wrap("String s = (String) getValue();"));
    assert!(out.contains("s := getValue().(string)"), "got:\n{}", out);
}

#[test]
fn test_unsigned_right_shift_marker() {
    let out = translate(&wrap("int z = x >>> 2;"));
    assert!(out.contains("z := UnsignedRightShift(x, 2)"), "got:\n{}", out);
}

#[test]
fn test_bitwise_complement_maps_to_xor() {
    let out = translate(&wrap("int n = ~x;"));
    assert!(out.contains("n := ^x"), "got:\n{}", out);
}

#[test]
fn test_update_expression_markers_in_expression_position() {
    let out = translate(&wrap("int a = x++;\nint b = --y;"));
    assert!(out.contains("a := PostUpdate(x)"), "got:\n{}", out);
    assert!(out.contains("b := PreUpdate(y)"), "got:\n{}", out);
}

#[test]
fn test_assignment_marker_in_expression_position() {
    let out = translate(&wrap("int a = (x = 5);"));
    assert!(out.contains("a := (AssignmentExpression(x, \"=\", 5))"), "got:\n{}", out);
}

#[test]
fn test_array_creation_and_initializer() {
    let out = translate(&wrap("int[] a = new int[3];\nint[] b = {1, 2, 3};"));
    assert!(out.contains("a := make([]int32, 3)"), "got:\n{}", out);
    assert!(out.contains("b := []int32{1, 2, 3}"), "got:\n{}", out);
}

#[test]
fn test_multi_dimensional_array_creation() {
    let out = translate(&wrap("int[][] grid = new int[2][3];"));
    let flat_out = flat(&out);
    assert!(flat_out.contains("arr := make([][]int32, 2)"), "got:\n{}", out);
    assert!(flat_out.contains("arr[ind] = make([]int32, 3)"), "got:\n{}", out);
    assert!(flat_out.contains("return arr"), "got:\n{}", out);
}

#[test]
fn test_array_access() {
    let out = translate(&wrap("int[] a = new int[3];\nint v = a[1];"));
    assert!(out.contains("v := a[1]"), "got:\n{}", out);
}

#[test]
fn test_static_field_becomes_package_var() {
    let src = r#"
package exprs.statics;
public class Counter {
    public static int count;
    public void inc() { count = count + 1; }
}
"#;
    let out = translate(src);
    assert!(out.contains("var Count int32"), "got:\n{}", out);
    assert!(out.contains("Count = Count + 1"), "got:\n{}", out);
}

#[test]
fn test_unresolved_selector_passes_through() {
    let src = r#"
package exprs.passthrough;
public class Printer {
    public void log(String message) {
        System.out.println(message);
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("System.out.println(message)"), "got:\n{}", out);
}

#[test]
fn test_unresolved_constructor_becomes_stub_call() {
    let out = translate(&wrap("Object o = new StringBuilder();"));
    assert!(out.contains("o := ConstructStringBuilder()"), "got:\n{}", out);
}

#[test]
fn test_lambda_becomes_function_literal() {
    let src = r#"
package exprs.lambdas;
public class Runner {
    public void run() {
        Callback cb = value -> process(value);
    }
}
"#;
    let out = translate(src);
    let flat_out = flat(&out);
    assert!(flat_out.contains("cb := func(value any) {"), "got:\n{}", out);
    assert!(flat_out.contains("process(value)"), "got:\n{}", out);
}

#[test]
fn test_method_reference_becomes_selector() {
    let src = r#"
package exprs.refs;
public class Refs {
    public void collect() {
        Object f = Helper::run;
        Object g = Helper::new;
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("f := Helper.run"), "got:\n{}", out);
    assert!(out.contains("g := Helper.new"), "got:\n{}", out);
}

#[test]
fn test_main_method_reads_os_args() {
    let src = r#"
package exprs.mains;
public class Main {
    public static void main(String[] args) {
        int n = 0;
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("import \"os\""), "got:\n{}", out);
    assert!(out.contains("func Main() {"), "got:\n{}", out);
    assert!(out.contains("args := os.Args"), "got:\n{}", out);
}

#[test]
fn test_instanceof_and_class_literal_are_filtered() {
    let out = translate(&wrap("boolean b = x instanceof Integer;"));
    // The unsupported initializer is dropped; the declaration survives
    assert!(!out.contains("instanceof"), "got:\n{}", out);
    assert!(out.contains("var b bool"), "got:\n{}", out);
}
