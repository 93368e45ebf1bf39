//! Expression lowering
//!
//! Java expression node → Go expression. The dense cases are identifier
//! resolution (parameters → locals → field hierarchy → package), method
//! invocation rewriting (static vs. instance vs. helper vs. inherited), and
//! object creation with diamond inference. Unsupported constructs degrade
//! to marker calls or `BadExpr`, never to errors.

use tree_sitter::Node;

use crate::cst::{field, named_children, text};
use crate::goast::{Block, Expr, Field, Stmt};
use crate::symbol::{ClassScope, Definition};

use super::ctx::Ctx;
use super::gen::go_operator;
use super::hierarchy::{
    find_field_in_hierarchy, find_helper_method_in_hierarchy, find_instance_method_in_hierarchy,
    find_static_method_in_hierarchy, resolve_class_scope, superclass_embed_name,
};
use super::stmt::lower_block;
use super::types::{
    extract_type_args_from_string, extract_type_arguments, lower_type_string,
    lower_type_with_params, simple_name, split_type_string, type_of_literal,
};

/// Lower a single expression node
pub fn lower_expr(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Expr {
    match node.kind() {
        "ERROR" => {
            log::warn!("expression parse error in {}: {}", ctx.class_name, text(node, source));
            Expr::Bad
        }
        "comment" | "line_comment" | "block_comment" => Expr::Bad,
        "update_expression" => {
            // Post-update has the operand first, pre-update has it second
            let first = node.child(0);
            match first {
                Some(first) if first.is_named() => {
                    Expr::call_named("PostUpdate", vec![lower_expr(first, source, ctx)])
                }
                _ => match node.child(1) {
                    Some(operand) => {
                        Expr::call_named("PreUpdate", vec![lower_expr(operand, source, ctx)])
                    }
                    None => Expr::Bad,
                },
            }
        }
        "class_literal" => Expr::Bad,
        "instanceof_expression" => Expr::Bad,
        "super" => Expr::Bad,
        "assignment_expression" => {
            // Assignment in expression position keeps its Java semantics
            // behind a runtime marker; statement position lowers it properly
            let (Some(target), Some(op), Some(value)) = (node.child(0), node.child(1), node.child(2))
            else {
                return Expr::Bad;
            };
            Expr::call_named(
                "AssignmentExpression",
                vec![
                    lower_expr(target, source, ctx),
                    Expr::str_lit(text(op, source)),
                    lower_expr(value, source, ctx),
                ],
            )
        }
        "lambda_expression" => lower_lambda(node, source, ctx),
        "method_reference" => {
            // func(className::methodName) selects a function value; the
            // constructor form Class::new selects `new`
            let children = named_children(node);
            match children.as_slice() {
                [class] => Expr::selector(
                    Expr::ident(simple_name(text(*class, source))),
                    "new",
                ),
                [class, method, ..] => Expr::selector(
                    Expr::ident(simple_name(text(*class, source))),
                    text(*method, source),
                ),
                [] => Expr::Bad,
            }
        }
        "array_initializer" => {
            let items: Vec<Expr> = named_children(node)
                .into_iter()
                .map(|c| lower_expr(c, source, ctx))
                .collect();
            match &ctx.last_type {
                Some(ty @ Expr::Slice(_)) => Expr::Composite {
                    ty: Some(Box::new(ty.clone())),
                    elts: items,
                },
                _ => Expr::Composite { ty: None, elts: items },
            }
        }
        "method_invocation" => lower_method_invocation(node, source, ctx),
        "object_creation_expression" => lower_object_creation(node, source, ctx),
        "array_creation_expression" => lower_array_creation(node, source, ctx),
        "dimensions_expr" => match node.named_child(0) {
            Some(inner) => lower_expr(inner, source, ctx),
            None => Expr::Bad,
        },
        "binary_expression" => {
            let (Some(left), Some(op), Some(right)) = (node.child(0), node.child(1), node.child(2))
            else {
                return Expr::Bad;
            };
            let op_text = text(op, source);
            if op_text == ">>>" {
                return Expr::call_named(
                    "UnsignedRightShift",
                    vec![lower_expr(left, source, ctx), lower_expr(right, source, ctx)],
                );
            }
            match go_operator(op_text) {
                Some(go_op) => Expr::binary(
                    lower_expr(left, source, ctx),
                    go_op,
                    lower_expr(right, source, ctx),
                ),
                None => {
                    log::warn!("unknown binary operator `{}`", op_text);
                    Expr::Bad
                }
            }
        }
        "unary_expression" => {
            let (Some(op), Some(operand)) = (node.child(0), node.child(1)) else {
                return Expr::Bad;
            };
            let op_text = text(op, source);
            match go_operator(op_text) {
                Some(go_op) => Expr::unary(go_op, lower_expr(operand, source, ctx)),
                None => {
                    log::warn!("unknown unary operator `{}`", op_text);
                    Expr::Bad
                }
            }
        }
        "parenthesized_expression" => match node.named_child(0) {
            Some(inner) => Expr::Paren(Box::new(lower_expr(inner, source, ctx))),
            None => Expr::Bad,
        },
        "ternary_expression" => {
            // cond ? a : b becomes a call to a runtime ternary helper
            let args: Vec<Expr> = named_children(node)
                .into_iter()
                .map(|c| lower_expr(c, source, ctx))
                .collect();
            Expr::call_named("ternary", args)
        }
        "cast_expression" => {
            let ty = field(node, "type").or_else(|| node.named_child(0));
            let value = field(node, "value").or_else(|| node.named_child(1));
            let (Some(ty), Some(value)) = (ty, value) else { return Expr::Bad };
            let params = ctx.type_param_names_in_scope();
            Expr::TypeAssert {
                x: Box::new(lower_expr(value, source, ctx)),
                ty: Box::new(lower_type_with_params(ty, source, &params)),
            }
        }
        "field_access" => lower_field_access(node, source, ctx),
        "array_access" => {
            let array = field(node, "array").or_else(|| node.named_child(0));
            let index = field(node, "index").or_else(|| node.named_child(1));
            let (Some(array), Some(index)) = (array, index) else { return Expr::Bad };
            Expr::Index {
                x: Box::new(lower_expr(array, source, ctx)),
                indices: vec![lower_expr(index, source, ctx)],
            }
        }
        "scoped_identifier" => match node.named_child(0) {
            Some(inner) => lower_expr(inner, source, ctx),
            None => Expr::Bad,
        },
        "this" => Expr::ident(ctx.recv_name()),
        "identifier" => lower_identifier(text(node, source), ctx),
        "type_identifier" => {
            let name = text(node, source);
            if name == "String" {
                return Expr::ident("string");
            }
            match ctx.current_file.find_class(name) {
                Some(class) => Expr::pointer(Expr::ident(class.name.clone())),
                None => Expr::pointer(Expr::ident(name)),
            }
        }
        "null_literal" => Expr::ident("nil"),
        "decimal_integer_literal" => {
            let literal = text(node, source);
            match literal.chars().last() {
                Some('L') | Some('l') => Expr::call_named(
                    "int64",
                    vec![Expr::lit(&literal[..literal.len() - 1])],
                ),
                _ => Expr::lit(literal),
            }
        }
        "hex_integer_literal" | "octal_integer_literal" | "binary_integer_literal" => {
            Expr::lit(text(node, source))
        }
        "decimal_floating_point_literal" => {
            let literal = text(node, source);
            match literal.chars().last() {
                Some('D') | Some('d') => Expr::call_named(
                    "float64",
                    vec![Expr::lit(&literal[..literal.len() - 1])],
                ),
                Some('F') | Some('f') => Expr::call_named(
                    "float32",
                    vec![Expr::lit(&literal[..literal.len() - 1])],
                ),
                _ => Expr::lit(literal),
            }
        }
        "string_literal" | "character_literal" => Expr::lit(text(node, source)),
        "true" | "false" => Expr::ident(text(node, source)),
        other => {
            log::warn!("unhandled expression kind `{}`", other);
            Expr::Bad
        }
    }
}

/// Lower the expressions of an `argument_list`
pub fn lower_arguments(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Vec<Expr> {
    named_children(node)
        .into_iter()
        .map(|arg| lower_expr(arg, source, ctx))
        .collect()
}

// Identifier resolution

/// Resolve a bare identifier: parameters of the enclosing method, then its
/// locals, then the field hierarchy of the current class, then sibling
/// classes of the package; unresolved names pass through verbatim.
fn lower_identifier(name: &str, ctx: &Ctx<'_>) -> Expr {
    if let Some(local_scope) = ctx.local_scope {
        if let Some(param) = local_scope.parameter_by_name(name) {
            return Expr::ident(param.name.clone());
        }
    }
    if ctx.find_local(name).is_some() {
        return Expr::ident(name);
    }
    if let Some(resolved) = find_field_in_hierarchy(ctx, ctx.current_class, name) {
        if resolved.def.is_static {
            // Static fields live as package-level variables
            return Expr::ident(resolved.def.name.clone());
        }
        if !ctx.in_static_context() {
            return Expr::selector(Expr::ident(ctx.recv_name()), resolved.def.name.clone());
        }
        return Expr::ident(resolved.def.name.clone());
    }
    if let Some(scope) = resolve_class_scope(ctx, name) {
        return Expr::ident(scope.class.name.clone());
    }
    Expr::ident(name)
}

/// The Java type of a named value, where resolvable
fn infer_identifier_java_type(name: &str, ctx: &Ctx<'_>) -> Option<String> {
    if let Some(local_scope) = ctx.local_scope {
        if let Some(param) = local_scope.parameter_by_name(name) {
            if !param.original_type.is_empty() {
                return Some(param.original_type.clone());
            }
        }
    }
    if let Some(local) = ctx.find_local(name) {
        if !local.java_type.is_empty() {
            return Some(local.java_type.clone());
        }
    }
    if let Some(resolved) = find_field_in_hierarchy(ctx, ctx.current_class, name) {
        if !resolved.def.original_type.is_empty() {
            return Some(resolved.def.original_type.clone());
        }
    }
    None
}

/// The Java type of an expression node, for the cases type inference needs
fn infer_expr_java_type(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Option<String> {
    match node.kind() {
        "identifier" => infer_identifier_java_type(text(node, source), ctx),
        "this" => {
            let base = &ctx.current_class.class.original_name;
            let params = ctx.current_class.type_parameter_names();
            if params.is_empty() {
                Some(base.clone())
            } else {
                Some(format!("{}<{}>", base, params.join(", ")))
            }
        }
        "object_creation_expression" => {
            field(node, "type").map(|ty| text(ty, source).to_string())
        }
        _ => {
            let literal = type_of_literal(node, source);
            if literal.is_empty() {
                None
            } else {
                Some(literal)
            }
        }
    }
}

/// Approximate Java types of a call's arguments, for overload matching; an
/// argument whose type cannot be inferred yields an empty string, which
/// matches any overload
fn infer_argument_types(
    args_node: Option<Node<'_>>,
    source: &[u8],
    ctx: &Ctx<'_>,
) -> Vec<String> {
    let Some(args_node) = args_node else { return Vec::new() };
    named_children(args_node)
        .into_iter()
        .map(|argument| {
            if argument.kind() == "identifier" {
                infer_identifier_java_type(text(argument, source), ctx)
                    .or_else(|| {
                        ctx.current_file
                            .find_field_by_original_name(text(argument, source))
                            .map(|def| def.original_type.clone())
                    })
                    .unwrap_or_default()
            } else {
                type_of_literal(argument, source)
            }
        })
        .collect()
}

// Method invocation

struct InvocationTarget<'a> {
    scope: &'a ClassScope,
    class_type_args: Vec<Expr>,
    /// True when the receiver names the class itself rather than a value
    is_class_reference: bool,
}

fn resolve_invocation_target<'a>(
    object_node: Node<'_>,
    source: &[u8],
    ctx: &Ctx<'a>,
) -> Option<InvocationTarget<'a>> {
    let in_scope = ctx.type_param_names_in_scope();
    let lower_args = |args: Option<Vec<String>>| -> Vec<Expr> {
        args.unwrap_or_default()
            .iter()
            .map(|a| lower_type_string(a, &in_scope).unwrap_or(Expr::ident("any")))
            .collect()
    };

    match object_node.kind() {
        "this" => Some(InvocationTarget {
            scope: ctx.current_class,
            class_type_args: ctx
                .current_class
                .type_parameter_names()
                .into_iter()
                .map(Expr::Ident)
                .collect(),
            is_class_reference: false,
        }),
        "identifier" => {
            let name = text(object_node, source);
            if let Some(java_type) = infer_identifier_java_type(name, ctx) {
                let (base, args) = split_type_string(&java_type);
                let scope = resolve_class_scope(ctx, &base)?;
                return Some(InvocationTarget {
                    scope,
                    class_type_args: lower_args(args),
                    is_class_reference: false,
                });
            }
            let scope = resolve_class_scope(ctx, name)?;
            Some(InvocationTarget {
                scope,
                class_type_args: Vec::new(),
                is_class_reference: true,
            })
        }
        _ => {
            let java_type = infer_expr_java_type(object_node, source, ctx)?;
            let (base, args) = split_type_string(&java_type);
            let scope = resolve_class_scope(ctx, &base)?;
            Some(InvocationTarget {
                scope,
                class_type_args: lower_args(args),
                is_class_reference: false,
            })
        }
    }
}

/// Explicit `<...>` type arguments on a method invocation, lowered
fn explicit_type_arg_exprs(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Vec<Expr> {
    let Some(type_args) = field(node, "type_arguments") else {
        return Vec::new();
    };
    let in_scope = ctx.type_param_names_in_scope();
    named_children(type_args)
        .into_iter()
        .map(|arg| {
            lower_type_string(text(arg, source), &in_scope).unwrap_or(Expr::ident("any"))
        })
        .collect()
}

/// Method-level type arguments for a helper call: explicit arguments win,
/// then parameter-argument correspondence, then `any`
fn infer_method_type_args(
    def: &Definition,
    invocation: Node<'_>,
    source: &[u8],
    ctx: &Ctx<'_>,
) -> Vec<Expr> {
    if def.type_parameters.is_empty() {
        return Vec::new();
    }

    let explicit = explicit_type_arg_exprs(invocation, source, ctx);
    if !explicit.is_empty() && explicit.len() == def.type_parameters.len() {
        return explicit;
    }

    let in_scope = ctx.type_param_names_in_scope();
    let arg_nodes: Vec<Node<'_>> = field(invocation, "arguments")
        .map(named_children)
        .unwrap_or_default();

    def.type_parameters
        .iter()
        .map(|tp| {
            for (index, param) in def.parameters.iter().enumerate() {
                if param.original_type != tp.name || index >= arg_nodes.len() {
                    continue;
                }
                if let Some(java_type) = infer_expr_java_type(arg_nodes[index], source, ctx) {
                    return lower_type_string(&java_type, &in_scope)
                        .unwrap_or(Expr::ident("any"));
                }
            }
            Expr::ident("any")
        })
        .collect()
}

/// Rewrite a call to an instance generic method into its helper form:
/// `o.m(args)` → `NewHelper[classArgs, methodArgs](o).M(args)`
fn helper_rewrite(
    def: &Definition,
    class_type_args: Vec<Expr>,
    object_expr: Expr,
    invocation: Node<'_>,
    source: &[u8],
    ctx: &Ctx<'_>,
    args: Vec<Expr>,
) -> Expr {
    let mut helper_args = class_type_args;
    helper_args.extend(infer_method_type_args(def, invocation, source, ctx));

    let constructor = Expr::index(
        Expr::ident(format!("New{}", def.helper_name)),
        helper_args,
    );
    Expr::call(
        Expr::selector(Expr::call(constructor, vec![object_expr]), def.name.clone()),
        args,
    )
}

fn lower_method_invocation(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Expr {
    let Some(name_node) = field(node, "name") else { return Expr::Bad };
    let method_name = text(name_node, source).to_string();
    let args_node = field(node, "arguments");
    let args: Vec<Expr> = args_node
        .map(|a| lower_arguments(a, source, ctx))
        .unwrap_or_default();
    let arg_types = infer_argument_types(args_node, source, ctx);

    let Some(object_node) = field(node, "object") else {
        return lower_unqualified_invocation(node, &method_name, args, &arg_types, source, ctx);
    };

    // super.m(args) calls through the embedded superclass field
    if object_node.kind() == "super" {
        let super_name =
            superclass_embed_name(ctx, ctx.current_class).unwrap_or_else(|| "super".to_string());
        let resolved_name = super::hierarchy::superclass_scope(ctx, ctx.current_class)
            .and_then(|scope| {
                find_instance_method_in_hierarchy(ctx, scope, &method_name, &arg_types)
            })
            .map(|res| res.def.name.clone())
            .unwrap_or(method_name);
        return Expr::call(
            Expr::selector(
                Expr::selector(Expr::ident(ctx.recv_name()), super_name),
                resolved_name,
            ),
            args,
        );
    }

    let target = resolve_invocation_target(object_node, source, ctx);

    // Enum metadata statics rewrite to their package-level functions
    if let Some(target) = &target {
        if target.is_class_reference && target.scope.is_enum {
            match method_name.as_str() {
                "values" => {
                    return Expr::call_named(format!("{}Values", target.scope.class.name), args)
                }
                "valueOf" => {
                    return Expr::call_named(format!("{}ValueOf", target.scope.class.name), args)
                }
                _ => {}
            }
        }
    }

    if let Some(target) = target {
        if target.is_class_reference {
            // Static call on a class name becomes a plain function call with
            // explicit type arguments threaded through
            if let Some(resolved) =
                find_static_method_in_hierarchy(ctx, target.scope, &method_name, &arg_types)
            {
                let explicit = explicit_type_arg_exprs(node, source, ctx);
                return Expr::call(
                    Expr::index(Expr::ident(resolved.def.name.clone()), explicit),
                    args,
                );
            }
        } else {
            let object_expr = lower_expr(object_node, source, ctx);
            if let Some(resolved) =
                find_helper_method_in_hierarchy(ctx, target.scope, &method_name)
            {
                return helper_rewrite(
                    resolved.def,
                    target.class_type_args,
                    object_expr,
                    node,
                    source,
                    ctx,
                    args,
                );
            }
            if let Some(resolved) =
                find_instance_method_in_hierarchy(ctx, target.scope, &method_name, &arg_types)
            {
                // Inherited methods are promoted through the embedded field,
                // so the call needs no extra selector
                return Expr::call(
                    Expr::selector(object_expr, resolved.def.name.clone()),
                    args,
                );
            }
            if let Some(resolved) =
                find_static_method_in_hierarchy(ctx, target.scope, &method_name, &arg_types)
            {
                // A static method reached through an instance is still a
                // plain function call
                return Expr::call(Expr::ident(resolved.def.name.clone()), args);
            }
        }
    }

    // Unresolved receiver type: pass the selector through untouched
    Expr::call(
        Expr::selector(lower_expr(object_node, source, ctx), method_name),
        args,
    )
}

fn lower_unqualified_invocation(
    node: Node<'_>,
    method_name: &str,
    args: Vec<Expr>,
    arg_types: &[String],
    source: &[u8],
    ctx: &Ctx<'_>,
) -> Expr {
    if !ctx.in_static_context() {
        // Implicit-receiver instance resolution first
        if let Some(resolved) = find_helper_method_in_hierarchy(ctx, ctx.current_class, method_name)
        {
            let class_args: Vec<Expr> = ctx
                .current_class
                .type_parameter_names()
                .into_iter()
                .map(Expr::Ident)
                .collect();
            return helper_rewrite(
                resolved.def,
                class_args,
                Expr::ident(ctx.recv_name()),
                node,
                source,
                ctx,
                args,
            );
        }
        if let Some(resolved) =
            find_instance_method_in_hierarchy(ctx, ctx.current_class, method_name, arg_types)
        {
            return Expr::call(
                Expr::selector(Expr::ident(ctx.recv_name()), resolved.def.name.clone()),
                args,
            );
        }
    }

    if let Some(resolved) =
        find_static_method_in_hierarchy(ctx, ctx.current_class, method_name, arg_types)
    {
        let explicit = explicit_type_arg_exprs(node, source, ctx);
        return Expr::call(
            Expr::index(Expr::ident(resolved.def.name.clone()), explicit),
            args,
        );
    }

    Expr::call_named(method_name, args)
}

// Field access

fn lower_field_access(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Expr {
    let (Some(object), Some(field_node)) = (field(node, "object"), field(node, "field")) else {
        return Expr::Bad;
    };
    let field_name = text(field_node, source).to_string();

    if object.kind() == "this" {
        let resolved = find_field_in_hierarchy(ctx, ctx.current_class, &field_name)
            .map(|r| r.def.name.clone())
            .unwrap_or_else(|| field_name.clone());
        return Expr::selector(Expr::ident(ctx.recv_name()), resolved);
    }

    if object.kind() == "super" {
        let super_name =
            superclass_embed_name(ctx, ctx.current_class).unwrap_or_else(|| "super".to_string());
        let resolved = super::hierarchy::superclass_scope(ctx, ctx.current_class)
            .and_then(|scope| find_field_in_hierarchy(ctx, scope, &field_name))
            .map(|r| r.def.name.clone())
            .unwrap_or_else(|| field_name.clone());
        return Expr::selector(
            Expr::selector(Expr::ident(ctx.recv_name()), super_name),
            resolved,
        );
    }

    let object_expr = lower_expr(object, source, ctx);
    let resolved = infer_expr_java_type(object, source, ctx)
        .and_then(|java_type| {
            let (base, _) = split_type_string(&java_type);
            resolve_class_scope(ctx, &base)
        })
        .and_then(|scope| find_field_in_hierarchy(ctx, scope, &field_name))
        .map(|r| r.def.name.clone())
        .unwrap_or(field_name);
    Expr::selector(object_expr, resolved)
}

// Object creation

fn lower_object_creation(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Expr {
    let Some(type_node) = field(node, "type") else { return Expr::Bad };

    // Arguments and their approximate Java types, for overload matching
    let args_node = field(node, "arguments");
    let arguments: Vec<Expr> = args_node
        .map(|a| lower_arguments(a, source, ctx))
        .unwrap_or_default();
    let argument_types = infer_argument_types(args_node, source, ctx);

    // Class name, explicit type arguments, and the diamond/raw distinction:
    // a generic_type node with an empty argument list and a literal `<>` in
    // its source text is a diamond; a bare identifier is a raw type
    let class_name;
    let mut explicit_args: Vec<String> = Vec::new();
    let mut is_diamond = false;
    if type_node.kind() == "generic_type" {
        class_name = type_node
            .named_child(0)
            .map(|n| simple_name(text(n, source)).to_string())
            .unwrap_or_default();
        explicit_args = extract_type_arguments(type_node, source);
        if explicit_args.is_empty() {
            is_diamond = text(type_node, source).contains("<>");
        }
    } else {
        class_name = simple_name(text(type_node, source)).to_string();
    }

    let in_scope = ctx.type_param_names_in_scope();
    let mut effective_args: Vec<Expr> = explicit_args
        .iter()
        .map(|arg| lower_type_string(arg, &in_scope).unwrap_or(Expr::ident("any")))
        .collect();

    if effective_args.is_empty() && is_diamond && !ctx.expected_type.is_empty() {
        if let Some(expected) = extract_type_args_from_string(&ctx.expected_type) {
            effective_args = expected
                .iter()
                .map(|arg| lower_type_string(arg, &in_scope).unwrap_or(Expr::ident("any")))
                .collect();
        }
    }

    // Nested-class construction inside a generic class reuses the enclosing
    // class's type parameters
    if effective_args.is_empty()
        && !ctx.current_class.type_parameters.is_empty()
        && ctx
            .current_class
            .subclasses
            .iter()
            .any(|sub| sub.class.original_name == class_name)
    {
        effective_args = ctx
            .current_class
            .type_parameter_names()
            .into_iter()
            .map(Expr::Ident)
            .collect();
    }

    let constructor = resolve_class_scope(ctx, &class_name)
        .and_then(|scope| scope.find_constructor(&argument_types));

    match constructor {
        Some(constructor) => Expr::call(
            Expr::index(Expr::ident(constructor.name.clone()), effective_args),
            arguments,
        ),
        None => {
            log::warn!("no constructor found for `{}`, emitting stub call", class_name);
            Expr::call(
                Expr::index(Expr::ident(format!("Construct{}", class_name)), effective_args),
                arguments,
            )
        }
    }
}

// Array creation

fn lower_array_creation(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Expr {
    let Some(type_node) = field(node, "type") else { return Expr::Bad };
    let params = ctx.type_param_names_in_scope();
    let element = lower_type_with_params(type_node, source, &params);

    let mut dimensions = Vec::new();
    let mut extra_dims = 0usize;
    let mut initializer_node = None;
    for child in named_children(node) {
        match child.kind() {
            "dimensions_expr" => dimensions.push(lower_expr(child, source, ctx)),
            "dimensions" => extra_dims += text(child, source).matches("[]").count(),
            "array_initializer" => initializer_node = Some(child),
            _ => {}
        }
    }

    if let Some(initializer) = initializer_node {
        // The initializer literal takes its type from the creation itself
        let dims = dimensions.len() + extra_dims;
        let mut array_type = element;
        for _ in 0..dims.max(1) {
            array_type = Expr::Slice(Box::new(array_type));
        }
        let mut init_ctx = ctx.clone();
        init_ctx.last_type = Some(array_type);
        return lower_expr(initializer, source, &init_ctx);
    }

    if dimensions.is_empty() {
        log::warn!("array creation without dimensions in {}", ctx.class_name);
        return Expr::Bad;
    }

    super::gen::gen_multi_dim_array(element, dimensions)
}

// Lambdas

fn lower_lambda(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Expr {
    let body = match field(node, "body") {
        Some(body) if body.kind() == "block" => lower_block(body, source, ctx),
        Some(body) => Block::new(vec![Stmt::Expr(lower_expr(body, source, ctx))]),
        None => Block::default(),
    };

    let params = match field(node, "parameters") {
        Some(params) if params.kind() == "formal_parameters" => {
            super::decl::lower_formal_parameters(params, source, ctx)
        }
        Some(params) if params.kind() == "inferred_parameters" => named_children(params)
            .into_iter()
            .map(|p| Field::named(text(p, source), Expr::ident("any")))
            .collect(),
        // A single untyped parameter: `n -> ...`
        Some(params) => vec![Field::named(text(params, source), Expr::ident("any"))],
        None => Vec::new(),
    };

    Expr::FuncLit { params, results: Vec::new(), body }
}
