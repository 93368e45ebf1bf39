//! Declaration lowering
//!
//! For each top-level Java type this emits the Go declarations: structs
//! with embedded superclasses and interfaces, constructors as `New*`
//! functions, methods with reified receivers, interfaces, the full enum
//! expansion, and the helper types that host instance generic methods.

use std::collections::BTreeSet;

use tree_sitter::Node;

use crate::cst::{field, named_children, text, unnamed_children};
use crate::goast::{
    Block, CaseClause, ConstDecl, Decl, Expr, Field, FuncDecl, Stmt, SwitchStmt, ValueSpec,
    VarDecl,
};
use crate::symbol::{merge_type_params, Definition};

use super::ctx::Ctx;
use super::gen::{
    gen_interface, gen_struct, instantiated_class, short_name, type_param_fields, zero_value,
};
use super::stmt::lower_block;
use super::types::{lower_type_string, lower_type_with_params, simple_name, split_type_string};

/// Declarations produced for one file, plus the imports they need
#[derive(Debug, Default)]
pub struct LoweredDecls {
    pub decls: Vec<Decl>,
    pub imports: BTreeSet<String>,
}

impl LoweredDecls {
    fn push(&mut self, decl: Decl) {
        if !decl.is_bad() {
            self.decls.push(decl);
        }
    }
}

/// Modifier summary for one member
#[derive(Debug, Default)]
struct Modifiers {
    public: bool,
    is_static: bool,
    is_abstract: bool,
    /// Annotation texts, preserved as comments on the member
    annotations: Vec<String>,
    /// Set when an annotation is on the exclusion list
    excluded: bool,
}

fn member_modifiers(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Modifiers {
    let mut mods = Modifiers::default();
    let Some(first) = node.named_child(0) else { return mods };
    if first.kind() != "modifiers" {
        return mods;
    }
    for modifier in unnamed_children(first) {
        match modifier.kind() {
            "public" => mods.public = true,
            "static" => mods.is_static = true,
            "abstract" => mods.is_abstract = true,
            "marker_annotation" | "annotation" => {
                let annotation = text(modifier, source).to_string();
                if ctx.config.is_excluded(&annotation) {
                    mods.excluded = true;
                }
                mods.annotations.push(annotation);
            }
            _ => {}
        }
    }
    mods
}

/// Lower a top-level type declaration node; `ctx.current_class` must be the
/// scope parsed from the same node
pub fn lower_type_declaration(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    match node.kind() {
        "class_declaration" => lower_class(node, source, ctx, out),
        "interface_declaration" => lower_interface(node, source, ctx, out),
        "enum_declaration" => lower_enum(node, source, ctx, out),
        "annotation_type_declaration" => {
            log::debug!("annotation type `{}` not translated", ctx.class_name);
        }
        other => log::warn!("unknown type declaration kind `{}`", other),
    }
}

/// Formal parameter list → Go fields; spread parameters become variadic
/// with their element type kept bare for type parameters
pub fn lower_formal_parameters(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Vec<Field> {
    let params = ctx.type_param_names_in_scope();
    let mut fields = Vec::new();
    for parameter in named_children(node) {
        match parameter.kind() {
            "spread_parameter" => {
                let name = parameter
                    .named_child(1)
                    .and_then(|d| field(d, "name"))
                    .map(|n| text(n, source).to_string())
                    .unwrap_or_default();
                let Some(element) = parameter.named_child(0) else { continue };
                fields.push(Field::named(
                    name,
                    Expr::Ellipsis(Box::new(lower_type_with_params(element, source, &params))),
                ));
            }
            "formal_parameter" => {
                let (Some(name), Some(ty)) = (field(parameter, "name"), field(parameter, "type"))
                else {
                    continue;
                };
                fields.push(Field::named(
                    text(name, source),
                    lower_type_with_params(ty, source, &params),
                ));
            }
            _ => {}
        }
    }
    fields
}

/// Replace the base identifier of a lowered embed type with the resolved
/// exported class name
fn rename_embed_base(expr: Expr, name: &str) -> Expr {
    match expr {
        Expr::Pointer(inner) => Expr::Pointer(Box::new(rename_embed_base(*inner, name))),
        Expr::Index { x, indices } => Expr::Index {
            x: Box::new(rename_embed_base(*x, name)),
            indices,
        },
        Expr::Ident(_) => Expr::ident(name),
        other => other,
    }
}

/// One embed expression for a Java type string, resolving the exported
/// name of the target class where possible
fn embed_type(ctx: &Ctx<'_>, java_type: &str, pointer: bool) -> Expr {
    let params = ctx.current_class.type_parameter_names();
    let (base, _) = split_type_string(java_type);
    let lowered = lower_type_string(java_type, &params)
        .unwrap_or_else(|| Expr::pointer(Expr::ident(simple_name(&base))));

    let resolved_name = super::hierarchy::resolve_class_scope(ctx, &base)
        .map(|scope| scope.class.name.clone());
    let renamed = match resolved_name {
        Some(name) => rename_embed_base(lowered, &name),
        None => {
            log::warn!("`{}` not found in any registered package, embedding verbatim", base);
            lowered
        }
    };

    if pointer {
        renamed
    } else {
        // Interfaces embed by bare name, without pointer indirection
        match renamed {
            Expr::Pointer(inner) => *inner,
            other => other,
        }
    }
}

/// Embedded fields for a class: the superclass as a pointer, then each
/// implemented interface by bare name
fn embedded_fields(ctx: &Ctx<'_>) -> Vec<Field> {
    let scope = ctx.current_class;
    let mut fields = Vec::new();
    if !scope.superclass.is_empty() {
        fields.push(Field::anonymous(embed_type(ctx, &scope.superclass, true)));
    }
    for interface in &scope.implemented_interfaces {
        fields.push(Field::anonymous(embed_type(ctx, interface, false)));
    }
    fields
}

// Classes

fn lower_class(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    let scope = ctx.current_class;
    let Some(body) = field(node, "body") else { return };

    let mut struct_fields = embedded_fields(ctx);
    let mut global_specs: Vec<ValueSpec> = Vec::new();

    for child in named_children(body) {
        if child.kind() != "field_declaration" {
            continue;
        }
        lower_field_declaration(child, source, ctx, &mut struct_fields, &mut global_specs);
    }

    if !global_specs.is_empty() {
        out.push(Decl::Var(VarDecl { specs: global_specs }));
    }
    out.push(gen_struct(
        ctx.class_name.clone(),
        struct_fields,
        &scope.type_parameters,
    ));

    lower_body_declarations(body, source, ctx, out);
}

/// One `field_declaration`: instance fields join the struct (initializers
/// discarded), static fields become package-level variables
fn lower_field_declaration(
    node: Node<'_>,
    source: &[u8],
    ctx: &Ctx<'_>,
    struct_fields: &mut Vec<Field>,
    global_specs: &mut Vec<ValueSpec>,
) {
    let mods = member_modifiers(node, source, ctx);
    if mods.excluded {
        return;
    }

    let Some(declarator) = field(node, "declarator") else { return };
    let Some(name_node) = field(declarator, "name") else { return };
    let field_name = text(name_node, source);

    let Some(def) = ctx.current_class.find_field_by_original_name(field_name) else {
        log::warn!("no symbol for field `{}` in {}", field_name, ctx.class_name);
        return;
    };

    let params = ctx.current_class.type_parameter_names();
    let ty = field(node, "type")
        .map(|t| lower_type_with_params(t, source, &params))
        .unwrap_or(Expr::Bad);
    let doc = mods.annotations.clone();

    if mods.is_static {
        let value = field(declarator, "value").map(|v| {
            let mut init_ctx = ctx.clone();
            init_ctx.expected_type = def.original_type.clone();
            init_ctx.last_type = Some(ty.clone());
            super::expr::lower_expr(v, source, &init_ctx)
        });
        global_specs.push(ValueSpec {
            doc,
            names: vec![def.name.clone()],
            ty: Some(ty),
            values: value.into_iter().collect(),
        });
    } else {
        let mut struct_field = Field::named(def.name.clone(), ty);
        struct_field.doc = doc;
        struct_fields.push(struct_field);
    }
}

/// Walk a class or enum body for constructors, methods, initializers and
/// nested types; nested scopes are matched to subclasses by order
fn lower_body_declarations(body: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    let mut subclass_index = 0;
    for child in named_children(body) {
        match child.kind() {
            "field_declaration" | "comment" | "line_comment" | "block_comment"
            | "enum_constant" => {}
            "constructor_declaration" => lower_constructor(child, source, ctx, out),
            "method_declaration" | "abstract_method_declaration" => {
                lower_method(child, source, ctx, out)
            }
            "static_initializer" => lower_static_initializer(child, source, ctx, out),
            "class_declaration" | "interface_declaration" | "enum_declaration" => {
                let Some(nested) = ctx.current_class.subclasses.get(subclass_index) else {
                    log::warn!("nested class without matching scope in {}", ctx.class_name);
                    continue;
                };
                subclass_index += 1;
                let nested_ctx = ctx.with_class(nested);
                lower_type_declaration(child, source, &nested_ctx, out);
            }
            "enum_body_declarations" => {
                // Reached when an enum body is walked through this path
                lower_body_declarations(child, source, ctx, out);
            }
            _ => {}
        }
    }
}

// Constructors

fn lower_constructor(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    let mods = member_modifiers(node, source, ctx);
    if mods.excluded {
        return;
    }
    let scope = ctx.current_class;

    let Some(parameters) = field(node, "parameters") else { return };
    let param_types: Vec<String> = named_children(parameters)
        .iter()
        .map(|p| constructor_param_type_text(*p, source))
        .collect();

    let Some(def) = scope.methods_by(|m| {
        m.is_constructor
            && m.parameters.len() == param_types.len()
            && m.original_parameter_types() == param_types.iter().map(String::as_str).collect::<Vec<_>>()
    }).first().copied() else {
        log::warn!("no symbol for constructor of {}", ctx.class_name);
        return;
    };

    let mut body_ctx = ctx.clone();
    body_ctx.local_scope = Some(def);
    let mut body = field(node, "body")
        .map(|b| lower_block(b, source, &body_ctx))
        .unwrap_or_default();

    // recv := new(Class[TPs]) ... return recv
    let class_type = instantiated_class(&ctx.class_name, &scope.type_parameters);
    body.stmts.insert(
        0,
        Stmt::Define {
            lhs: vec![Expr::ident(ctx.recv_name())],
            rhs: vec![Expr::call_named("new", vec![class_type.clone()])],
        },
    );
    body.stmts.push(Stmt::Return(vec![Expr::ident(ctx.recv_name())]));

    let type_params = merge_type_params(&scope.type_parameters, &def.type_parameters);
    out.push(Decl::Func(FuncDecl {
        doc: mods.annotations,
        recv: None,
        name: def.name.clone(),
        type_params: type_param_fields(&type_params),
        params: lower_formal_parameters(parameters, source, &body_ctx),
        results: vec![Field::anonymous(Expr::pointer(class_type))],
        body: Some(body),
    }));
}

fn constructor_param_type_text(parameter: Node<'_>, source: &[u8]) -> String {
    if parameter.kind() == "spread_parameter" {
        parameter
            .named_child(0)
            .map(|t| text(t, source).to_string())
            .unwrap_or_default()
    } else {
        field(parameter, "type")
            .map(|t| text(t, source).to_string())
            .unwrap_or_default()
    }
}

// Methods

fn lower_method(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    let mods = member_modifiers(node, source, ctx);
    if mods.excluded {
        return;
    }
    let scope = ctx.current_class;

    let Some(name_node) = field(node, "name") else { return };
    let method_name = text(name_node, source);

    let param_types: Vec<String> = field(node, "parameters")
        .map(|p| {
            named_children(p)
                .iter()
                .map(|param| constructor_param_type_text(*param, source))
                .collect()
        })
        .unwrap_or_default();

    let Some(def) = scope.methods_by(|m| {
        !m.is_constructor
            && m.original_name == method_name
            && m.parameters.len() == param_types.len()
            && m.original_parameter_types() == param_types.iter().map(String::as_str).collect::<Vec<_>>()
    }).first().copied() else {
        log::warn!("no matching definition found for method `{}`", method_name);
        return;
    };

    let mut method_ctx = ctx.clone();
    method_ctx.local_scope = Some(def);
    let combined = method_ctx.type_param_names_in_scope();

    let results: Vec<Field> = field(node, "type")
        .map(|t| lower_type_with_params(t, source, &combined))
        .filter(|t| !t.is_empty())
        .map(|t| vec![Field::anonymous(t)])
        .unwrap_or_default();

    let is_abstract = mods.is_abstract || field(node, "body").is_none();
    if is_abstract {
        out.push(abstract_stub(node, source, &method_ctx, def, mods, results));
        return;
    }

    if def.requires_helper {
        lower_helper_method(node, source, ctx, def, out);
        return;
    }

    let mut params = field(node, "parameters")
        .map(|p| lower_formal_parameters(p, source, &method_ctx))
        .unwrap_or_default();
    let mut body = field(node, "body")
        .map(|b| lower_block(b, source, &method_ctx))
        .unwrap_or_default();

    if def.is_static {
        // The translated main takes its arguments from os.Args instead of a
        // parameter
        if def.original_name == "main" {
            params = Vec::new();
            body.stmts.insert(
                0,
                Stmt::Define {
                    lhs: vec![Expr::ident("args")],
                    rhs: vec![Expr::selector(Expr::ident("os"), "Args")],
                },
            );
            out.imports.insert("os".to_string());
        }
        let type_params = merge_type_params(&scope.type_parameters, &def.type_parameters);
        out.push(Decl::Func(FuncDecl {
            doc: mods.annotations,
            recv: None,
            name: def.name.clone(),
            type_params: type_param_fields(&type_params),
            params,
            results,
            body: Some(body),
        }));
        return;
    }

    out.push(Decl::Func(FuncDecl {
        doc: mods.annotations,
        recv: Some(receiver_field(ctx)),
        name: def.name.clone(),
        type_params: Vec::new(),
        params,
        results,
        body: Some(body),
    }));
}

/// Receiver field reifying the class's full type-parameter list
fn receiver_field(ctx: &Ctx<'_>) -> Field {
    Field::named(
        ctx.recv_name(),
        Expr::pointer(instantiated_class(
            &ctx.class_name,
            &ctx.current_class.type_parameters,
        )),
    )
}

/// Stub for an abstract method: panic, then return the zero value so the
/// signature stays complete
fn abstract_stub(
    node: Node<'_>,
    source: &[u8],
    ctx: &Ctx<'_>,
    def: &Definition,
    mods: Modifiers,
    results: Vec<Field>,
) -> Decl {
    let mut stmts = vec![Stmt::Expr(Expr::call_named(
        "panic",
        vec![Expr::str_lit(&format!(
            "abstract method {} not implemented",
            def.original_name
        ))],
    ))];

    if let Some(result) = results.first() {
        match zero_value(&result.ty) {
            Some(zero) => stmts.push(Stmt::Return(vec![zero])),
            None => {
                stmts.push(Stmt::Var(VarDecl {
                    specs: vec![ValueSpec {
                        doc: Vec::new(),
                        names: vec!["zero".to_string()],
                        ty: Some(result.ty.clone()),
                        values: Vec::new(),
                    }],
                }));
                stmts.push(Stmt::Return(vec![Expr::ident("zero")]));
            }
        }
    }

    let params = field(node, "parameters")
        .map(|p| lower_formal_parameters(p, source, ctx))
        .unwrap_or_default();

    Decl::Func(FuncDecl {
        doc: mods.annotations,
        recv: Some(receiver_field(ctx)),
        name: def.name.clone(),
        type_params: Vec::new(),
        params,
        results,
        body: Some(Block::new(stmts)),
    })
}

/// An instance generic method lowers to a helper type: a struct holding the
/// receiver, a constructor, and the method hosted on the helper
fn lower_helper_method(
    node: Node<'_>,
    source: &[u8],
    ctx: &Ctx<'_>,
    def: &Definition,
    out: &mut LoweredDecls,
) {
    let scope = ctx.current_class;
    let class_params = &scope.type_parameters;
    let all_params = merge_type_params(class_params, &def.type_parameters);
    let helper_name = def.helper_name.clone();
    let helper_recv = short_name(&helper_name);

    let class_type = Expr::pointer(instantiated_class(&ctx.class_name, class_params));
    let helper_type = Expr::pointer(instantiated_class(&helper_name, &all_params));

    // type <Helper>[CTPs..., MTPs...] struct { recv *Class[CTPs...] }
    out.push(gen_struct(
        helper_name.clone(),
        vec![Field::named("recv", class_type.clone())],
        &all_params,
    ));

    // func New<Helper>[...](recv *Class[...]) *Helper[...]
    let ctor_body = Block::new(vec![
        Stmt::Define {
            lhs: vec![Expr::ident(helper_recv.clone())],
            rhs: vec![Expr::call_named(
                "new",
                vec![instantiated_class(&helper_name, &all_params)],
            )],
        },
        Stmt::Assign {
            lhs: vec![Expr::selector(Expr::ident(helper_recv.clone()), "recv")],
            op: "=".to_string(),
            rhs: vec![Expr::ident("recv")],
        },
        Stmt::Return(vec![Expr::ident(helper_recv.clone())]),
    ]);
    out.push(Decl::Func(FuncDecl {
        doc: Vec::new(),
        recv: None,
        name: format!("New{}", helper_name),
        type_params: type_param_fields(&all_params),
        params: vec![Field::named("recv", class_type)],
        results: vec![Field::anonymous(helper_type.clone())],
        body: Some(ctor_body),
    }));

    // The method itself, with the original receiver name rebound from the
    // helper's recv field
    let mut method_ctx = ctx.clone();
    method_ctx.local_scope = Some(def);
    let combined = method_ctx.type_param_names_in_scope();

    let results: Vec<Field> = field(node, "type")
        .map(|t| lower_type_with_params(t, source, &combined))
        .filter(|t| !t.is_empty())
        .map(|t| vec![Field::anonymous(t)])
        .unwrap_or_default();
    let params = field(node, "parameters")
        .map(|p| lower_formal_parameters(p, source, &method_ctx))
        .unwrap_or_default();

    let mut body = field(node, "body")
        .map(|b| lower_block(b, source, &method_ctx))
        .unwrap_or_default();
    body.stmts.insert(
        0,
        Stmt::Define {
            lhs: vec![Expr::ident(ctx.recv_name())],
            rhs: vec![Expr::selector(Expr::ident(helper_recv.clone()), "recv")],
        },
    );

    out.push(Decl::Func(FuncDecl {
        doc: Vec::new(),
        recv: Some(Field::named(helper_recv, helper_type)),
        name: def.name.clone(),
        type_params: Vec::new(),
        params,
        results,
        body: Some(body),
    }));
}

fn lower_static_initializer(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    let mut init_ctx = ctx.clone();
    init_ctx.local_scope = None;
    let body = node
        .named_child(0)
        .map(|b| lower_block(b, source, &init_ctx))
        .unwrap_or_default();
    out.push(Decl::Func(FuncDecl {
        doc: Vec::new(),
        recv: None,
        name: "init".to_string(),
        type_params: Vec::new(),
        params: Vec::new(),
        results: Vec::new(),
        body: Some(body),
    }));
}

// Interfaces

fn lower_interface(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    let scope = ctx.current_class;
    let Some(body) = field(node, "body") else { return };

    let mut members: Vec<Field> = scope
        .implemented_interfaces
        .iter()
        .map(|extended| Field::anonymous(embed_type(ctx, extended, false)))
        .collect();

    for child in named_children(body) {
        if child.kind() != "method_declaration" && child.kind() != "abstract_method_declaration" {
            continue;
        }
        let mods = member_modifiers(child, source, ctx);
        if mods.excluded {
            continue;
        }
        let Some(name_node) = field(child, "name") else { continue };
        let method_name = text(name_node, source);
        let Some(def) = scope.methods_by_original_name(method_name).first().copied() else {
            continue;
        };

        let mut method_ctx = ctx.clone();
        method_ctx.local_scope = Some(def);
        let combined = method_ctx.type_param_names_in_scope();

        let params = field(child, "parameters")
            .map(|p| lower_formal_parameters(p, source, &method_ctx))
            .unwrap_or_default();
        let results: Vec<Field> = field(child, "type")
            .map(|t| lower_type_with_params(t, source, &combined))
            .filter(|t| !t.is_empty())
            .map(|t| vec![Field::anonymous(t)])
            .unwrap_or_default();

        let mut member = Field::named(def.name.clone(), Expr::FuncType { params, results });
        member.doc = mods.annotations;
        members.push(member);
    }

    out.push(gen_interface(
        ctx.class_name.clone(),
        members,
        &scope.type_parameters,
    ));

    // Methods became signatures above; only nested types still lower
    let mut subclass_index = 0;
    for child in named_children(body) {
        match child.kind() {
            "class_declaration" | "interface_declaration" | "enum_declaration" => {
                let Some(nested) = scope.subclasses.get(subclass_index) else {
                    continue;
                };
                subclass_index += 1;
                let nested_ctx = ctx.with_class(nested);
                lower_type_declaration(child, source, &nested_ctx, out);
            }
            _ => {}
        }
    }
}

// Enums

fn lower_enum(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>, out: &mut LoweredDecls) {
    let scope = ctx.current_class;
    let class_name = ctx.class_name.clone();
    let recv = ctx.recv_name();
    let pointer_type = Expr::pointer(Expr::ident(class_name.clone()));
    let Some(body) = field(node, "body") else { return };

    let constant_nodes: Vec<Node<'_>> = named_children(body)
        .into_iter()
        .filter(|n| n.kind() == "enum_constant")
        .collect();
    let body_declarations = named_children(body)
        .into_iter()
        .find(|n| n.kind() == "enum_body_declarations");

    // Struct: Name, Ordinal, embedded interfaces, then declared fields
    let mut struct_fields = vec![
        Field::named("Name", Expr::ident("string")),
        Field::named("Ordinal", Expr::ident("int")),
    ];
    for interface in &scope.implemented_interfaces {
        struct_fields.push(Field::anonymous(embed_type(ctx, interface, false)));
    }
    let mut global_specs = Vec::new();
    if let Some(decls) = body_declarations {
        for child in named_children(decls) {
            if child.kind() == "field_declaration" {
                lower_field_declaration(child, source, ctx, &mut struct_fields, &mut global_specs);
            }
        }
    }
    if !global_specs.is_empty() {
        out.push(Decl::Var(VarDecl { specs: global_specs }));
    }
    out.push(gen_struct(class_name.clone(), struct_fields, &[]));

    // Ordinal constants, iota-style
    if !constant_nodes.is_empty() {
        let specs: Vec<ValueSpec> = scope
            .enum_constants
            .iter()
            .enumerate()
            .map(|(index, constant)| ValueSpec {
                doc: Vec::new(),
                names: vec![format!("_{}_ordinal_{}", class_name, constant.name)],
                ty: None,
                values: if index == 0 { vec![Expr::ident("iota")] } else { Vec::new() },
            })
            .collect();
        out.push(Decl::Const(ConstDecl { specs }));
    }

    // One package-level variable per constant, built by an immediately
    // invoked function literal
    let mut value_names = Vec::new();
    for constant_node in &constant_nodes {
        let Some(name_node) = field(*constant_node, "name") else { continue };
        let constant_name = text(name_node, source).to_string();
        let global_name = format!("{}{}", class_name, constant_name);
        value_names.push(global_name.clone());

        let args = field(*constant_node, "arguments")
            .map(|a| super::expr::lower_arguments(a, source, ctx))
            .unwrap_or_default();
        let construct = match scope
            .methods_by(|m| m.is_constructor && m.parameters.len() == args.len())
            .first()
        {
            Some(constructor) => Expr::call_named(constructor.name.clone(), args),
            None => Expr::call_named("new", vec![Expr::ident(class_name.clone())]),
        };

        let init_body = Block::new(vec![
            Stmt::Define { lhs: vec![Expr::ident(recv.clone())], rhs: vec![construct] },
            Stmt::Assign {
                lhs: vec![Expr::selector(Expr::ident(recv.clone()), "Name")],
                op: "=".to_string(),
                rhs: vec![Expr::str_lit(&constant_name)],
            },
            Stmt::Assign {
                lhs: vec![Expr::selector(Expr::ident(recv.clone()), "Ordinal")],
                op: "=".to_string(),
                rhs: vec![Expr::ident(format!("_{}_ordinal_{}", class_name, constant_name))],
            },
            Stmt::Return(vec![Expr::ident(recv.clone())]),
        ]);

        out.push(super::gen::gen_var(
            global_name,
            None,
            Some(Expr::call(
                Expr::FuncLit {
                    params: Vec::new(),
                    results: vec![Field::anonymous(pointer_type.clone())],
                    body: init_body,
                },
                Vec::new(),
            )),
        ));
    }

    // Values slice, accessor, and ValueOf
    let values_var = format!("_{}Values", class_name);
    out.push(super::gen::gen_var(
        values_var.clone(),
        None,
        Some(Expr::Composite {
            ty: Some(Box::new(Expr::Slice(Box::new(pointer_type.clone())))),
            elts: value_names.iter().map(|n| Expr::ident(n.clone())).collect(),
        }),
    ));
    out.push(Decl::Func(FuncDecl {
        doc: Vec::new(),
        recv: None,
        name: format!("{}Values", class_name),
        type_params: Vec::new(),
        params: Vec::new(),
        results: vec![Field::anonymous(Expr::Slice(Box::new(pointer_type.clone())))],
        body: Some(Block::new(vec![Stmt::Return(vec![Expr::ident(values_var)])])),
    }));

    let valueof_cases: Vec<CaseClause> = scope
        .enum_constants
        .iter()
        .map(|constant| CaseClause {
            exprs: vec![Expr::str_lit(&constant.name)],
            body: vec![Stmt::Return(vec![Expr::ident(format!(
                "{}{}",
                class_name, constant.name
            ))])],
        })
        .chain(std::iter::once(CaseClause {
            exprs: Vec::new(),
            body: vec![Stmt::Expr(Expr::call_named(
                "panic",
                vec![Expr::binary(
                    Expr::str_lit("no enum constant "),
                    "+",
                    Expr::ident("name"),
                )],
            ))],
        }))
        .collect();
    out.push(Decl::Func(FuncDecl {
        doc: Vec::new(),
        recv: None,
        name: format!("{}ValueOf", class_name),
        type_params: Vec::new(),
        params: vec![Field::named("name", Expr::ident("string"))],
        results: vec![Field::anonymous(pointer_type.clone())],
        body: Some(Block::new(vec![Stmt::Switch(SwitchStmt {
            tag: Some(Expr::ident("name")),
            cases: valueof_cases,
        })])),
    }));

    // Receiver methods delegating to the struct fields
    let metadata_method = |name: &str, result: Expr, ret: Expr| {
        Decl::Func(FuncDecl {
            doc: Vec::new(),
            recv: Some(Field::named(recv.clone(), pointer_type.clone())),
            name: name.to_string(),
            type_params: Vec::new(),
            params: Vec::new(),
            results: vec![Field::anonymous(result)],
            body: Some(Block::new(vec![Stmt::Return(vec![ret])])),
        })
    };
    out.push(metadata_method(
        "Name",
        Expr::ident("string"),
        Expr::selector(Expr::ident(recv.clone()), "Name"),
    ));
    out.push(metadata_method(
        "Ordinal",
        Expr::ident("int"),
        Expr::selector(Expr::ident(recv.clone()), "Ordinal"),
    ));
    out.push(Decl::Func(FuncDecl {
        doc: Vec::new(),
        recv: Some(Field::named(recv.clone(), pointer_type.clone())),
        name: "CompareTo".to_string(),
        type_params: Vec::new(),
        params: vec![Field::named("other", pointer_type.clone())],
        results: vec![Field::anonymous(Expr::ident("int"))],
        body: Some(Block::new(vec![Stmt::Return(vec![Expr::binary(
            Expr::selector(Expr::ident(recv.clone()), "Ordinal"),
            "-",
            Expr::selector(Expr::ident("other"), "Ordinal"),
        )])])),
    }));

    // Per-constant method overrides and the remaining body declarations
    lower_enum_methods(node, &constant_nodes, body_declarations, source, ctx, out);
}

/// Per-constant overrides: default implementations and overriding bodies
/// become free functions, with a single dispatching method switching on the
/// constant name. Everything else lowers like a class member.
fn lower_enum_methods(
    _node: Node<'_>,
    constant_nodes: &[Node<'_>],
    body_declarations: Option<Node<'_>>,
    source: &[u8],
    ctx: &Ctx<'_>,
    out: &mut LoweredDecls,
) {
    let scope = ctx.current_class;
    let class_name = &ctx.class_name;

    // Method original name → overriding (constant name, method node)
    let mut overrides: Vec<(String, Vec<(String, Node<'_>)>)> = Vec::new();
    for constant_node in constant_nodes {
        let Some(body) = field(*constant_node, "body") else { continue };
        let constant_name = field(*constant_node, "name")
            .map(|n| text(n, source).to_string())
            .unwrap_or_default();
        for member in named_children(body) {
            if member.kind() != "method_declaration" {
                continue;
            }
            let Some(name_node) = field(member, "name") else { continue };
            let method_name = text(name_node, source).to_string();
            match overrides.iter_mut().find(|(name, _)| *name == method_name) {
                Some((_, list)) => list.push((constant_name.clone(), member)),
                None => overrides.push((method_name, vec![(constant_name.clone(), member)])),
            }
        }
    }

    let overridden =
        |name: &str| overrides.iter().any(|(method_name, _)| method_name == name);

    if let Some(decls) = body_declarations {
        let mut subclass_index = 0;
        for child in named_children(decls) {
            match child.kind() {
                "method_declaration" => {
                    let Some(name_node) = field(child, "name") else { continue };
                    let method_name = text(name_node, source).to_string();
                    if overridden(&method_name) {
                        continue;
                    }
                    lower_method(child, source, ctx, out);
                }
                "constructor_declaration" => lower_constructor(child, source, ctx, out),
                "static_initializer" => lower_static_initializer(child, source, ctx, out),
                "class_declaration" | "interface_declaration" | "enum_declaration" => {
                    let Some(nested) = scope.subclasses.get(subclass_index) else {
                        continue;
                    };
                    subclass_index += 1;
                    let nested_ctx = ctx.with_class(nested);
                    lower_type_declaration(child, source, &nested_ctx, out);
                }
                _ => {}
            }
        }
    }

    // Emit override machinery per overridden method
    for (method_name, overriding) in &overrides {
        let Some(def) = scope.methods_by_original_name(method_name).first().copied() else {
            log::warn!(
                "constant override of `{}` has no enum-level declaration, skipped",
                method_name
            );
            continue;
        };

        // The enum's own declaration of this method, if any
        let enum_decl_node = body_declarations.and_then(|decls| {
            named_children(decls).into_iter().find(|child| {
                child.kind() == "method_declaration"
                    && field(*child, "name")
                        .map(|n| text(n, source) == method_name)
                        .unwrap_or(false)
            })
        });
        let default_is_abstract = enum_decl_node
            .map(|n| {
                member_modifiers(n, source, ctx).is_abstract || field(n, "body").is_none()
            })
            .unwrap_or(true);

        let mut method_ctx = ctx.clone();
        method_ctx.local_scope = Some(def);
        let combined = method_ctx.type_param_names_in_scope();

        let signature_node = enum_decl_node.or_else(|| overriding.first().map(|(_, n)| *n));
        let Some(signature_node) = signature_node else { continue };

        let params = field(signature_node, "parameters")
            .map(|p| lower_formal_parameters(p, source, &method_ctx))
            .unwrap_or_default();
        let results: Vec<Field> = field(signature_node, "type")
            .map(|t| lower_type_with_params(t, source, &combined))
            .filter(|t| !t.is_empty())
            .map(|t| vec![Field::anonymous(t)])
            .unwrap_or_default();
        let has_result = !results.is_empty();

        let recv_param = Field::named(
            ctx.recv_name(),
            Expr::pointer(Expr::ident(class_name.clone())),
        );
        let mut free_params = vec![recv_param.clone()];
        free_params.extend(params.iter().cloned());

        // Default implementation as a free function
        let default_name = format!("_{}_{}_default", class_name, method_name);
        if !default_is_abstract {
            if let Some(default_body) =
                enum_decl_node.and_then(|n| field(n, "body"))
            {
                out.push(Decl::Func(FuncDecl {
                    doc: Vec::new(),
                    recv: None,
                    name: default_name.clone(),
                    type_params: Vec::new(),
                    params: free_params.clone(),
                    results: results.clone(),
                    body: Some(lower_block(default_body, source, &method_ctx)),
                }));
            }
        }

        // One free function per overriding constant
        for (constant_name, override_node) in overriding {
            let Some(override_body) = field(*override_node, "body") else { continue };
            out.push(Decl::Func(FuncDecl {
                doc: Vec::new(),
                recv: None,
                name: format!("_{}_{}_{}", class_name, constant_name, method_name),
                type_params: Vec::new(),
                params: free_params.clone(),
                results: results.clone(),
                body: Some(lower_block(override_body, source, &method_ctx)),
            }));
        }

        // Dispatching method switching on the constant name
        let forward_names: Vec<String> =
            params.iter().flat_map(|p| p.names.clone()).collect();
        let forward_args = |target: String| {
            let mut args = vec![Expr::ident(ctx.recv_name())];
            args.extend(forward_names.iter().map(|n| Expr::ident(n.clone())));
            let call = Expr::call_named(target, args);
            if has_result {
                Stmt::Return(vec![call])
            } else {
                Stmt::Expr(call)
            }
        };

        let mut cases: Vec<CaseClause> = overriding
            .iter()
            .map(|(constant_name, _)| CaseClause {
                exprs: vec![Expr::str_lit(constant_name)],
                body: vec![forward_args(format!(
                    "_{}_{}_{}",
                    class_name, constant_name, method_name
                ))],
            })
            .collect();
        cases.push(CaseClause {
            exprs: Vec::new(),
            body: if default_is_abstract {
                vec![Stmt::Expr(Expr::call_named(
                    "panic",
                    vec![Expr::str_lit("abstract enum method not implemented")],
                ))]
            } else {
                vec![forward_args(default_name.clone())]
            },
        });

        out.push(Decl::Func(FuncDecl {
            doc: Vec::new(),
            recv: Some(recv_param),
            name: def.name.clone(),
            type_params: Vec::new(),
            params,
            results,
            body: Some(Block::new(vec![Stmt::Switch(SwitchStmt {
                tag: Some(Expr::selector(Expr::ident(ctx.recv_name()), "Name")),
                cases,
            })])),
        }));
    }
}
