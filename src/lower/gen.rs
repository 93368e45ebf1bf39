//! Go AST building helpers
//!
//! Utility constructors shared by the declaration lowerers: structs and
//! functions with type parameters, constraint expressions derived from Java
//! bounds, multi-dimensional `make` chains, receiver short names, operator
//! mapping, and zero values.

use crate::goast::{Block, Decl, Expr, Field, Stmt, TypeDecl, VarDecl};
use crate::symbol::{type_param_names, JavaType, TypeParam};

use super::types::lower_type_string;

/// Short-name representation of a class name, used to name receivers:
/// `Test` → `tt`, `Pair` → `pr`
pub fn short_name(long_name: &str) -> String {
    let chars: Vec<char> = long_name.chars().collect();
    match (chars.first(), chars.last()) {
        (Some(first), Some(last)) => {
            let mut out = String::new();
            out.extend(first.to_lowercase());
            out.extend(last.to_lowercase());
            out
        }
        _ => String::new(),
    }
}

/// Map a Java operator to its Go spelling; `>>>` has no Go form and is
/// handled by the caller as a marker call
pub fn go_operator(java_op: &str) -> Option<&'static str> {
    Some(match java_op {
        "+" => "+",
        "-" => "-",
        "*" => "*",
        "/" => "/",
        "%" => "%",
        "&" => "&",
        "|" => "|",
        "^" => "^",
        // Java bitwise complement (~)
        "~" => "^",
        "<<" => "<<",
        ">>" => ">>",
        "&&" => "&&",
        "||" => "||",
        "==" => "==",
        "!=" => "!=",
        "<" => "<",
        "<=" => "<=",
        ">" => ">",
        ">=" => ">=",
        "!" => "!",
        "=" => "=",
        "+=" => "+=",
        "-=" => "-=",
        "*=" => "*=",
        "/=" => "/=",
        "%=" => "%=",
        "&=" => "&=",
        "|=" => "|=",
        "^=" => "^=",
        "<<=" => "<<=",
        ">>=" => ">>=",
        _ => return None,
    })
}

/// Type-parameter fields for a declaration, with constraints derived from
/// the Java bounds; a bound-less parameter constrains to `any`
pub fn type_param_fields(type_params: &[TypeParam]) -> Vec<Field> {
    if type_params.is_empty() {
        return Vec::new();
    }
    let names = type_param_names(type_params);
    type_params
        .iter()
        .map(|tp| Field::named(tp.name.clone(), constraint_expr(&tp.bounds, &names)))
        .collect()
}

/// Constraint for one type parameter: no bounds → `any`; one bound → its
/// lowered form; several bounds → an interface type embedding each bound in
/// source order
pub fn constraint_expr(bounds: &[JavaType], type_params: &[String]) -> Expr {
    match bounds.len() {
        0 => Expr::ident("any"),
        1 => lower_type_string(&bounds[0].original, type_params).unwrap_or(Expr::ident("any")),
        _ => Expr::InterfaceType(
            bounds
                .iter()
                .map(|b| {
                    Field::anonymous(
                        lower_type_string(&b.original, type_params).unwrap_or(Expr::ident("any")),
                    )
                })
                .collect(),
        ),
    }
}

/// Generate a struct declaration, optionally generic
pub fn gen_struct(name: impl Into<String>, fields: Vec<Field>, type_params: &[TypeParam]) -> Decl {
    Decl::Type(TypeDecl {
        doc: Vec::new(),
        name: name.into(),
        type_params: type_param_fields(type_params),
        ty: Expr::StructType(fields),
    })
}

/// Generate an interface declaration, optionally generic
pub fn gen_interface(
    name: impl Into<String>,
    members: Vec<Field>,
    type_params: &[TypeParam],
) -> Decl {
    Decl::Type(TypeDecl {
        doc: Vec::new(),
        name: name.into(),
        type_params: type_param_fields(type_params),
        ty: Expr::InterfaceType(members),
    })
}

/// The generic instantiation of a class name by its own type parameters:
/// `Pair` + `[K, V]` → `Pair[K, V]`
pub fn instantiated_class(name: &str, type_params: &[TypeParam]) -> Expr {
    let args: Vec<Expr> = type_params.iter().map(|tp| Expr::ident(tp.name.clone())).collect();
    Expr::index(Expr::ident(name), args)
}

/// A `make` chain for array creation
///
/// One dimension is a single `make([]T, n)`. Deeper arrays become an
/// immediately-invoked function literal that allocates the outer slice and
/// fills each level with nested range loops.
pub fn gen_multi_dim_array(element: Expr, dimensions: Vec<Expr>) -> Expr {
    let slice_type = |depth: usize| {
        let mut ty = element.clone();
        for _ in 0..depth {
            ty = Expr::Slice(Box::new(ty));
        }
        ty
    };
    let total = dimensions.len();

    if total == 1 {
        return Expr::call_named("make", vec![slice_type(1), dimensions[0].clone()]);
    }

    // arr := make([][]...T, d0), then fill each level in range loops
    let arr_access = |indexes: &[String]| {
        let mut access = Expr::ident("arr");
        for index in indexes {
            access = Expr::Index { x: Box::new(access), indices: vec![Expr::ident(index.clone())] };
        }
        access
    };

    fn fill(
        level: usize,
        indexes: &mut Vec<String>,
        dimensions: &[Expr],
        total: usize,
        slice_type: &dyn Fn(usize) -> Expr,
        arr_access: &dyn Fn(&[String]) -> Expr,
    ) -> Stmt {
        let index = if level == 1 { "ind".to_string() } else { format!("ind{}", level) };
        let outer = arr_access(indexes);
        indexes.push(index.clone());

        let assign = Stmt::Assign {
            lhs: vec![arr_access(indexes)],
            op: "=".to_string(),
            rhs: vec![Expr::call_named(
                "make",
                vec![slice_type(total - level), dimensions[level].clone()],
            )],
        };

        let mut body = vec![assign];
        if level + 1 < total {
            body.push(fill(level + 1, indexes, dimensions, total, slice_type, arr_access));
        }
        indexes.pop();

        Stmt::Range(crate::goast::RangeStmt {
            key: Some(Expr::ident(index)),
            value: None,
            expr: outer,
            body: Block::new(body),
        })
    }

    let mut indexes = Vec::new();
    let loops = fill(1, &mut indexes, &dimensions, total, &slice_type, &arr_access);

    let body = Block::new(vec![
        Stmt::Define {
            lhs: vec![Expr::ident("arr")],
            rhs: vec![Expr::call_named("make", vec![slice_type(total), dimensions[0].clone()])],
        },
        loops,
        Stmt::Return(vec![Expr::ident("arr")]),
    ]);

    Expr::call(
        Expr::FuncLit {
            params: Vec::new(),
            results: vec![Field::anonymous(slice_type(total))],
            body,
        },
        Vec::new(),
    )
}

/// The zero value of a lowered type, or `None` when only `var zero T` works
/// (bare type parameters and unresolved named types)
pub fn zero_value(ty: &Expr) -> Option<Expr> {
    match ty {
        Expr::Ident(name) => match name.as_str() {
            "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "byte" | "rune" | "float32"
            | "float64" => Some(Expr::lit("0")),
            "bool" => Some(Expr::ident("false")),
            "string" => Some(Expr::lit("\"\"")),
            "any" => Some(Expr::ident("nil")),
            _ => None,
        },
        Expr::Pointer(_) | Expr::Slice(_) | Expr::Index { .. } | Expr::FuncType { .. } => {
            Some(Expr::ident("nil"))
        }
        Expr::Empty => None,
        _ => None,
    }
}

/// Package-level variable declaration with a single spec
pub fn gen_var(name: impl Into<String>, ty: Option<Expr>, value: Option<Expr>) -> Decl {
    Decl::Var(VarDecl {
        specs: vec![crate::goast::ValueSpec {
            doc: Vec::new(),
            names: vec![name.into()],
            ty,
            values: value.into_iter().collect(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Test"), "tt");
        assert_eq!(short_name("Box"), "bx");
        assert_eq!(short_name("Pair"), "pr");
        assert_eq!(short_name("LinkedList"), "lt");
        assert_eq!(short_name("A"), "aa");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn test_constraint_expr_shapes() {
        assert_eq!(constraint_expr(&[], &[]).to_string(), "any");

        let single = constraint_expr(&[JavaType::new("Number")], &[]);
        assert_eq!(single.to_string(), "*Number");

        let multi = constraint_expr(
            &[JavaType::new("Number"), JavaType::new("Comparable<T>")],
            &["T".to_string()],
        );
        assert_eq!(multi.to_string(), "interface{ *Number; *Comparable[T] }");
    }

    #[test]
    fn test_gen_struct_type_params() {
        let decl = gen_struct(
            "Pair",
            vec![Field::named("key", Expr::ident("K"))],
            &[TypeParam::new("K"), TypeParam::new("V")],
        );
        let Decl::Type(type_decl) = decl else { panic!("expected type decl") };
        assert_eq!(type_decl.type_params.len(), 2);
        assert_eq!(type_decl.type_params[0].ty.to_string(), "any");
    }

    #[test]
    fn test_single_dim_make() {
        let expr = gen_multi_dim_array(Expr::ident("int32"), vec![Expr::lit("4")]);
        assert_eq!(expr.to_string(), "make([]int32, 4)");
    }

    #[test]
    fn test_multi_dim_make_fills_levels() {
        let expr = gen_multi_dim_array(Expr::ident("int32"), vec![Expr::lit("2"), Expr::lit("3")]);
        let rendered = expr.to_string();
        assert!(rendered.contains("arr := make([][]int32, 2)"));
        assert!(rendered.contains("for ind := range arr"));
        assert!(rendered.contains("arr[ind] = make([]int32, 3)"));
        assert!(rendered.contains("return arr"));
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(zero_value(&Expr::ident("int32")).unwrap().to_string(), "0");
        assert_eq!(zero_value(&Expr::ident("string")).unwrap().to_string(), "\"\"");
        assert_eq!(zero_value(&Expr::ident("bool")).unwrap().to_string(), "false");
        assert_eq!(
            zero_value(&Expr::pointer(Expr::ident("Shape"))).unwrap().to_string(),
            "nil"
        );
        assert!(zero_value(&Expr::ident("T")).is_none());
    }
}
