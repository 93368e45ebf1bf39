//! Statements: loops, switch fall-through, try degradation, labels

mod common;

use common::{flat, translate};

fn wrap(body: &str) -> String {
    format!(
        "package stmts;\npublic class Runner {{\n    public int run(int x) {{\n{}\n        return x;\n    }}\n}}",
        body
    )
}

#[test]
fn test_local_variable_declarations() {
    let out = translate(&wrap("int a = 1;\nint b;\nString s = \"hi\";"));
    assert!(out.contains("a := 1"), "got:\n{}", out);
    assert!(out.contains("var b int32"), "got:\n{}", out);
    assert!(out.contains("s := \"hi\""), "got:\n{}", out);
}

#[test]
fn test_c_style_for_loop() {
    let out = translate(&wrap("for (int i = 0; i < 10; i++) { x = x + i; }"));
    assert!(out.contains("for i := 0; i < 10; i++ {"), "got:\n{}", out);
    assert!(out.contains("x = x + i"), "got:\n{}", out);
}

#[test]
fn test_while_and_do_while() {
    let out = translate(&wrap("while (x < 5) { x = x + 1; }\ndo { x = x - 1; } while (x > 0);"));
    assert!(out.contains("for x < 5 {"), "got:\n{}", out);
    let flat_out = flat(&out);
    assert!(flat_out.contains("for { x = x - 1 if !(x > 0) { break } }"), "got:\n{}", out);
}

#[test]
fn test_enhanced_for_becomes_range() {
    let src = r#"
package stmts.range;
public class Summer {
    public int sum(int[] values) {
        int total = 0;
        for (int v : values) {
            total = total + v;
        }
        return total;
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("for _, v := range values {"), "got:\n{}", out);
    assert!(out.contains("total = total + v"), "got:\n{}", out);
}

#[test]
fn test_switch_preserves_fallthrough_and_break() {
    let out = translate(&wrap(
        "switch (x) {\n case 1: x = 2;\n case 2: x = 3; break;\n default: x = 4;\n}",
    ));
    let flat_out = flat(&out);
    assert!(flat_out.contains("switch x { case 1: x = 2 fallthrough case 2: x = 3 default: x = 4 }"), "got:\n{}", out);
}

#[test]
fn test_arrow_switch_cases_never_fall_through() {
    let out = translate(&wrap(
        "switch (x) {\n case 1 -> x = 2;\n case 2 -> { x = 3; }\n default -> x = 4;\n}",
    ));
    let flat_out = flat(&out);
    assert!(flat_out.contains("switch x { case 1: x = 2 case 2: x = 3 default: x = 4 }"), "got:\n{}", out);
    assert!(!out.contains("fallthrough"), "arrow cases must not fall through, got:\n{}", out);
}

#[test]
fn test_switch_case_ending_in_return_gets_no_fallthrough() {
    let out = translate(&wrap("switch (x) {\n case 1: return 1;\n default: x = 2;\n}"));
    let flat_out = flat(&out);
    assert!(flat_out.contains("case 1: return 1 default:"), "got:\n{}", out);
}

#[test]
fn test_labeled_break_and_continue() {
    let out = translate(&wrap(
        "outer: for (int i = 0; i < 10; i++) { while (true) { if (x > 1) { break outer; } continue outer; } }",
    ));
    assert!(out.contains("outer:"), "got:\n{}", out);
    assert!(out.contains("break outer"), "got:\n{}", out);
    assert!(out.contains("continue outer"), "got:\n{}", out);
}

#[test]
fn test_try_catch_finally_degrades() {
    let out = translate(&wrap(
        "try { x = 1; } catch (Exception e) { x = 99; } finally { x = 2; }",
    ));
    let flat_out = flat(&out);
    assert!(flat_out.contains("x = 1 x = 2"), "got:\n{}", out);
    assert!(!out.contains("x = 99"), "catch body must be discarded, got:\n{}", out);
}

#[test]
fn test_throw_becomes_panic() {
    let out = translate(&wrap("throw new IllegalStateException(\"boom\");"));
    assert!(
        out.contains("panic(ConstructIllegalStateException(\"boom\"))"),
        "got:\n{}",
        out
    );
}

#[test]
fn test_statement_assignments_and_updates_are_native() {
    let out = translate(&wrap("x += 2;\nx++;\nx--;"));
    assert!(out.contains("x += 2"), "got:\n{}", out);
    assert!(out.contains("x++"), "got:\n{}", out);
    assert!(out.contains("x--"), "got:\n{}", out);
}

#[test]
fn test_static_initializer_becomes_init_function() {
    let src = r#"
package stmts.init;
public class Registry {
    static int count;
    static {
        count = 1;
    }
}
"#;
    let out = translate(src);
    assert!(out.contains("func init() {"), "got:\n{}", out);
    assert!(out.contains("count = 1"), "got:\n{}", out);
}
