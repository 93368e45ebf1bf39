//! Type lowering
//!
//! Pure translation from Java type expressions to Go type expressions,
//! parameterized by the set of in-scope type-parameter names. Two inputs
//! feed it: live CST type nodes, and Java type strings lifted from symbol
//! tables (field/parameter types, diamond inference sources).
//!
//! The mapping: primitives map to fixed-width Go types, `String` becomes
//! `string`, reference types become pointers, arrays become slices,
//! in-scope type parameters stay bare, `? extends B` narrows to `B`, `?`
//! and `? super B` widen to `any`, and package qualifiers are dropped.

use tree_sitter::Node;

use crate::cst::{field, named_children, text};
use crate::goast::Expr;

/// Lower a Java type node with no type parameters in scope
pub fn lower_type(node: Node<'_>, source: &[u8]) -> Expr {
    lower_type_with_params(node, source, &[])
}

/// Lower a Java type node; names in `type_params` stay bare identifiers
pub fn lower_type_with_params(node: Node<'_>, source: &[u8], type_params: &[String]) -> Expr {
    let is_type_param = |name: &str| type_params.iter().any(|tp| tp == name);

    match node.kind() {
        "integral_type" => match node.child(0).map(|c| c.kind()).unwrap_or("") {
            "int" => Expr::ident("int32"),
            "short" => Expr::ident("int16"),
            "long" => Expr::ident("int64"),
            "char" => Expr::ident("rune"),
            "byte" => Expr::ident("byte"),
            other => {
                log::warn!("unknown integral type `{}`", other);
                Expr::Bad
            }
        },
        "floating_point_type" => match node.child(0).map(|c| c.kind()).unwrap_or("") {
            "float" => Expr::ident("float32"),
            "double" => Expr::ident("float64"),
            other => {
                log::warn!("unknown floating point type `{}`", other);
                Expr::Bad
            }
        },
        "void_type" => Expr::Empty,
        "boolean_type" => Expr::ident("bool"),
        "generic_type" => {
            // Any type of the form Base<Args...>; the pointer wraps the whole
            // instantiation: *List[T], not (*List)[T]
            let base = node
                .named_child(0)
                .map(|n| simple_name(text(n, source)).to_string())
                .unwrap_or_default();

            let mut args = Vec::new();
            for child in named_children(node) {
                if child.kind() == "type_arguments" {
                    for arg in named_children(child) {
                        args.push(lower_type_argument(arg, source, type_params));
                    }
                    break;
                }
            }

            if args.is_empty() {
                Expr::pointer(Expr::ident(base))
            } else {
                Expr::pointer(Expr::index(Expr::ident(base), args))
            }
        }
        "array_type" => {
            let element = field(node, "element").or_else(|| node.named_child(0));
            match element {
                Some(element) => {
                    Expr::Slice(Box::new(lower_type_with_params(element, source, type_params)))
                }
                None => Expr::Bad,
            }
        }
        "type_identifier" => {
            let name = text(node, source);
            if name == "String" {
                return Expr::ident("string");
            }
            if is_type_param(name) {
                return Expr::ident(name);
            }
            Expr::pointer(Expr::ident(name))
        }
        "scoped_type_identifier" => {
            // A qualified reference such as LinkedList.Node or pkg.Q.C; the
            // qualifier is dropped and type resolution works on the tail
            Expr::pointer(Expr::ident(simple_name(text(node, source))))
        }
        "annotated_type" => {
            let inner = named_children(node).into_iter().last();
            match inner {
                Some(inner) => lower_type_with_params(inner, source, type_params),
                None => Expr::Bad,
            }
        }
        other => {
            log::warn!("unknown type node `{}` in type position", other);
            Expr::Bad
        }
    }
}

/// Lower one entry of a `type_arguments` list, which may be a wildcard
fn lower_type_argument(node: Node<'_>, source: &[u8], type_params: &[String]) -> Expr {
    if node.kind() != "wildcard" {
        return lower_type_with_params(node, source, type_params);
    }

    // `? extends B` narrows to B; bare `?` and `? super B` widen to any
    let children = named_children(node);
    if children.iter().any(|c| c.kind() == "super") {
        return Expr::ident("any");
    }
    match children.into_iter().find(|c| c.kind() != "super") {
        Some(bound) => lower_type_with_params(bound, source, type_params),
        None => Expr::ident("any"),
    }
}

/// Lower a Java type string lifted from a symbol table
///
/// Returns `None` when the string has unbalanced angle brackets, after
/// logging a warning; callers degrade to `any` or to no type arguments.
pub fn lower_type_string(type_str: &str, type_params: &[String]) -> Option<Expr> {
    let trimmed = type_str.trim();
    if trimmed.is_empty() {
        return Some(Expr::ident("any"));
    }

    // Wildcards appear here when a type argument string is re-lowered
    if trimmed == "?" || trimmed.starts_with("? super") {
        return Some(Expr::ident("any"));
    }
    if let Some(bound) = trimmed.strip_prefix("? extends") {
        return lower_type_string(bound, type_params);
    }

    // Strip array dimensions; they wrap the final expression outermost-first
    let mut dims = 0;
    let mut head = trimmed;
    while let Some(stripped) = head.trim_end().strip_suffix("[]") {
        dims += 1;
        head = stripped;
    }
    let head = head.trim();

    let (base, args) = split_type_string(head);
    if base.is_empty() {
        return Some(wrap_slices(Expr::ident("any"), dims));
    }

    // Unbalanced brackets produce a null result; inference falls back
    if head.contains('<') && args.is_none() && !head.ends_with("<>") {
        log::warn!("malformed type string `{}`", type_str);
        return None;
    }

    let base = simple_name(&base).to_string();
    let lowered = if let Some(primitive) = lower_primitive_name(&base) {
        primitive
    } else if type_params.iter().any(|tp| *tp == base) {
        Expr::ident(base)
    } else if base == "String" {
        Expr::ident("string")
    } else {
        let arg_exprs: Vec<Expr> = args
            .unwrap_or_default()
            .iter()
            .map(|arg| lower_type_string(arg, type_params).unwrap_or(Expr::ident("any")))
            .collect();
        if arg_exprs.is_empty() {
            Expr::pointer(Expr::ident(base))
        } else {
            Expr::pointer(Expr::index(Expr::ident(base), arg_exprs))
        }
    };

    Some(wrap_slices(lowered, dims))
}

fn lower_primitive_name(name: &str) -> Option<Expr> {
    let lowered = match name {
        "int" => "int32",
        "short" => "int16",
        "long" => "int64",
        "byte" => "byte",
        "char" => "rune",
        "float" => "float32",
        "double" => "float64",
        "boolean" => "bool",
        "void" => return Some(Expr::Empty),
        _ => return None,
    };
    Some(Expr::ident(lowered))
}

fn wrap_slices(expr: Expr, dims: usize) -> Expr {
    let mut out = expr;
    for _ in 0..dims {
        out = Expr::Slice(Box::new(out));
    }
    out
}

/// Split a Java type string into its base name and top-level type arguments:
/// `Map<String, List<Integer>>` → (`Map`, Some([`String`, `List<Integer>`]))
pub fn split_type_string(type_str: &str) -> (String, Option<Vec<String>>) {
    let trimmed = type_str.trim();
    match trimmed.find('<') {
        Some(idx) => (
            trimmed[..idx].trim().to_string(),
            extract_type_args_from_string(trimmed),
        ),
        None => (trimmed.to_string(), None),
    }
}

/// Extract top-level type argument strings from `Base<A, B<C>>`
///
/// Splits only at angle-bracket depth zero so nested generics stay intact.
/// Returns `None` when no argument list is present or the brackets are
/// unbalanced (the latter is logged at WARN).
pub fn extract_type_args_from_string(type_str: &str) -> Option<Vec<String>> {
    let start = type_str.find('<')?;
    let end = type_str.rfind('>')?;
    if end <= start {
        return None;
    }
    let args_str = &type_str[start + 1..end];

    let mut result = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for ch in args_str.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth -= 1;
                if depth < 0 {
                    log::warn!("unbalanced angle brackets in type string `{}`: too many '>'", type_str);
                    return None;
                }
                current.push(ch);
            }
            ',' if depth == 0 => {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    result.push(trimmed.to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if depth != 0 {
        log::warn!("unbalanced angle brackets in type string `{}`: unclosed '<'", type_str);
        return None;
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        result.push(trimmed.to_string());
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

/// Extract type argument source strings from a `generic_type` node; empty
/// for other node kinds or when the argument list is empty (diamond)
pub fn extract_type_arguments(node: Node<'_>, source: &[u8]) -> Vec<String> {
    if node.kind() != "generic_type" {
        return Vec::new();
    }
    let mut args = Vec::new();
    for child in named_children(node) {
        if child.kind() == "type_arguments" {
            for arg in named_children(child) {
                args.push(text(arg, source).to_string());
            }
            break;
        }
    }
    args
}

/// Approximate Java type of a literal node, for overload matching
pub fn type_of_literal(node: Node<'_>, source: &[u8]) -> String {
    match node.kind() {
        "decimal_integer_literal" | "hex_integer_literal" => {
            let literal = text(node, source);
            if literal.ends_with('L') || literal.ends_with('l') {
                "long".to_string()
            } else {
                "int".to_string()
            }
        }
        "decimal_floating_point_literal" => {
            let literal = text(node, source);
            if literal.ends_with('F') || literal.ends_with('f') {
                "float".to_string()
            } else {
                "double".to_string()
            }
        }
        "string_literal" => "String".to_string(),
        "character_literal" => "char".to_string(),
        "true" | "false" => "boolean".to_string(),
        _ => String::new(),
    }
}

/// Last segment of a dotted name; Java packages are not modeled as Go
/// packages, so qualifiers are dropped wholesale
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
