//! Statement lowering
//!
//! Java statement node → Go statement(s). Most forms translate directly;
//! the exceptions are do-while (infinite loop with a tail check), try/catch
//! (body inlined, catches discarded, finally appended), and Java's
//! fall-through switch (explicit `fallthrough` where a case does not break).
//!
//! Declarations feed `ctx.expected_type` with the declared Java type so
//! diamond-operator constructors on the right-hand side can infer their
//! type arguments.

use tree_sitter::Node;

use crate::cst::{field, named_children, text};
use crate::goast::{Block, CaseClause, Expr, ForStmt, IfStmt, RangeStmt, Stmt, SwitchStmt, ValueSpec, VarDecl};

use super::ctx::Ctx;
use super::expr::{lower_arguments, lower_expr};
use super::gen::go_operator;
use super::hierarchy::{superclass_embed_name, superclass_scope};
use super::types::lower_type_with_params;

/// Lower a statement body into a block, cloning the context so locals and
/// inference hints cannot leak into the enclosing scope
pub fn lower_block(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Block {
    let mut block_ctx = ctx.clone();
    let mut stmts = Vec::new();
    for child in named_children(node) {
        stmts.extend(lower_stmt(child, source, &mut block_ctx));
    }
    Block::new(stmts)
}

/// Lower a node that is either a block or a single statement into a block
fn lower_body(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Block {
    if node.kind() == "block" {
        return lower_block(node, source, ctx);
    }
    let mut body_ctx = ctx.clone();
    Block::new(lower_stmt(node, source, &mut body_ctx))
}

/// Strip the parens tree-sitter keeps around `if (...)` conditions
fn unwrap_condition(expr: Expr) -> Expr {
    match expr {
        Expr::Paren(inner) => *inner,
        other => other,
    }
}

fn lower_condition(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Expr {
    unwrap_condition(lower_expr(node, source, ctx))
}

/// Lower a single statement; a few forms (multi-declarator locals, try
/// statements) expand to several Go statements
pub fn lower_stmt(node: Node<'_>, source: &[u8], ctx: &mut Ctx<'_>) -> Vec<Stmt> {
    match node.kind() {
        "comment" | "line_comment" | "block_comment" => Vec::new(),
        "block" => vec![Stmt::Block(lower_block(node, source, ctx))],
        "expression_statement" => match node.named_child(0) {
            Some(inner) => vec![lower_expression_statement(inner, source, ctx)],
            None => Vec::new(),
        },
        "local_variable_declaration" => lower_local_variable(node, source, ctx),
        "if_statement" => {
            let Some(condition) = field(node, "condition") else { return vec![Stmt::Bad] };
            let cond = lower_condition(condition, source, ctx);
            let then = field(node, "consequence")
                .map(|n| lower_body(n, source, ctx))
                .unwrap_or_default();
            let els = field(node, "alternative").map(|alt| {
                if alt.kind() == "if_statement" {
                    let mut alt_ctx = ctx.clone();
                    Box::new(
                        lower_stmt(alt, source, &mut alt_ctx)
                            .into_iter()
                            .next()
                            .unwrap_or(Stmt::Bad),
                    )
                } else {
                    Box::new(Stmt::Block(lower_body(alt, source, ctx)))
                }
            });
            vec![Stmt::If(IfStmt { cond, then, els })]
        }
        "while_statement" => {
            let Some(condition) = field(node, "condition") else { return vec![Stmt::Bad] };
            let cond = lower_condition(condition, source, ctx);
            let body = field(node, "body")
                .map(|n| lower_body(n, source, ctx))
                .unwrap_or_default();
            vec![Stmt::For(ForStmt { init: None, cond: Some(cond), post: None, body })]
        }
        "do_statement" => {
            // do { body } while (cond) runs at least once; the condition
            // check moves to the loop tail
            let mut body = field(node, "body")
                .map(|n| lower_body(n, source, ctx))
                .unwrap_or_default();
            if let Some(condition) = field(node, "condition") {
                let cond = lower_condition(condition, source, ctx);
                body.stmts.push(Stmt::If(IfStmt {
                    cond: Expr::unary("!", Expr::Paren(Box::new(cond))),
                    then: Block::new(vec![Stmt::Break(None)]),
                    els: None,
                }));
            }
            vec![Stmt::For(ForStmt { init: None, cond: None, post: None, body })]
        }
        "for_statement" => lower_for(node, source, ctx),
        "enhanced_for_statement" => {
            let mut loop_ctx = ctx.clone();
            let name = field(node, "name")
                .map(|n| text(n, source).to_string())
                .unwrap_or_default();
            if let Some(ty) = field(node, "type") {
                loop_ctx.add_local(name.clone(), text(ty, source));
            }
            let value = field(node, "value")
                .map(|n| lower_expr(n, source, &loop_ctx))
                .unwrap_or(Expr::Bad);
            let body = field(node, "body")
                .map(|n| lower_body(n, source, &loop_ctx))
                .unwrap_or_default();
            vec![Stmt::Range(RangeStmt {
                key: Some(Expr::ident("_")),
                value: Some(Expr::ident(name)),
                expr: value,
                body,
            })]
        }
        "labeled_statement" => {
            let mut children = named_children(node).into_iter();
            let Some(label) = children.next() else { return vec![Stmt::Bad] };
            let Some(inner) = children.next() else { return vec![Stmt::Bad] };
            let mut label_ctx = ctx.clone();
            let mut lowered = lower_stmt(inner, source, &mut label_ctx);
            let stmt = if lowered.len() == 1 {
                lowered.remove(0)
            } else {
                Stmt::Block(Block::new(lowered))
            };
            vec![Stmt::Labeled { label: text(label, source).to_string(), stmt: Box::new(stmt) }]
        }
        "break_statement" => {
            let label = node.named_child(0).map(|l| text(l, source).to_string());
            vec![Stmt::Break(label)]
        }
        "continue_statement" => {
            let label = node.named_child(0).map(|l| text(l, source).to_string());
            vec![Stmt::Continue(label)]
        }
        "return_statement" => {
            match node.named_child(0) {
                Some(value) => {
                    // The declared return type drives diamond inference in
                    // `return new C<>(...)`
                    let mut return_ctx = ctx.clone();
                    if let Some(local) = ctx.local_scope {
                        return_ctx.expected_type = local.original_type.clone();
                    }
                    vec![Stmt::Return(vec![lower_expr(value, source, &return_ctx)])]
                }
                None => vec![Stmt::Return(Vec::new())],
            }
        }
        "throw_statement" => {
            // Exceptions are not modeled; a throw aborts via panic
            let value = node
                .named_child(0)
                .map(|n| lower_expr(n, source, ctx))
                .unwrap_or(Expr::Bad);
            vec![Stmt::Expr(Expr::call_named("panic", vec![value]))]
        }
        "switch_expression" | "switch_statement" => lower_switch(node, source, ctx),
        "try_statement" | "try_with_resources_statement" => lower_try(node, source, ctx),
        "synchronized_statement" => {
            log::warn!("synchronized block lowered without locking");
            field(node, "body")
                .map(|n| vec![Stmt::Block(lower_block(n, source, ctx))])
                .unwrap_or_default()
        }
        "explicit_constructor_invocation" => lower_explicit_constructor(node, source, ctx),
        "static_initializer" => {
            // Only reachable for initializers nested oddly; the declaration
            // lowerer handles the top-level form
            node.named_child(0)
                .map(|n| vec![Stmt::Block(lower_block(n, source, ctx))])
                .unwrap_or_default()
        }
        other => {
            log::warn!("unhandled statement kind `{}`", other);
            vec![Stmt::Bad]
        }
    }
}

/// Statement-position expressions: assignments and updates lower to real Go
/// statements here, unlike their expression-position marker forms
fn lower_expression_statement(node: Node<'_>, source: &[u8], ctx: &mut Ctx<'_>) -> Stmt {
    match node.kind() {
        "assignment_expression" => {
            let (Some(target), Some(op), Some(value)) =
                (node.child(0), node.child(1), node.child(2))
            else {
                return Stmt::Bad;
            };
            let target_expr = lower_expr(target, source, ctx);
            let value_expr = lower_expr(value, source, ctx);
            let op_text = text(op, source);

            // Go has no unsigned right shift assignment
            if op_text == ">>>=" {
                return Stmt::Assign {
                    lhs: vec![target_expr.clone()],
                    op: "=".to_string(),
                    rhs: vec![Expr::call_named(
                        "UnsignedRightShift",
                        vec![target_expr, value_expr],
                    )],
                };
            }

            match go_operator(op_text) {
                Some(go_op) => Stmt::Assign {
                    lhs: vec![target_expr],
                    op: go_op.to_string(),
                    rhs: vec![value_expr],
                },
                None => {
                    log::warn!("unknown assignment operator `{}`", op_text);
                    Stmt::Bad
                }
            }
        }
        "update_expression" => lower_update_statement(node, source, ctx),
        _ => {
            let expr = lower_expr(node, source, ctx);
            if expr.is_bad() {
                Stmt::Bad
            } else {
                Stmt::Expr(expr)
            }
        }
    }
}

fn lower_update_statement(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Stmt {
    let Some(operand) = named_children(node).into_iter().next() else {
        return Stmt::Bad;
    };
    let inc = text(node, source).contains("++");
    Stmt::IncDec { target: lower_expr(operand, source, ctx), inc }
}

fn lower_local_variable(node: Node<'_>, source: &[u8], ctx: &mut Ctx<'_>) -> Vec<Stmt> {
    let Some(type_node) = field(node, "type") else { return vec![Stmt::Bad] };
    let params = ctx.type_param_names_in_scope();
    let base_type = lower_type_with_params(type_node, source, &params);
    let base_java = text(type_node, source).to_string();

    let mut cursor = node.walk();
    let declarators: Vec<Node<'_>> = node.children_by_field_name("declarator", &mut cursor).collect();

    let mut stmts = Vec::new();
    for declarator in declarators {
        let Some(name_node) = field(declarator, "name") else { continue };
        let name = text(name_node, source).to_string();

        // Trailing `[]`s on the declarator add array dimensions
        let extra_dims = field(declarator, "dimensions")
            .map(|d| text(d, source).matches("[]").count())
            .unwrap_or(0);
        let mut declared_type = base_type.clone();
        let mut java_type = base_java.clone();
        for _ in 0..extra_dims {
            declared_type = Expr::Slice(Box::new(declared_type));
            java_type.push_str("[]");
        }

        let initializer = field(declarator, "value").map(|value| {
            let mut init_ctx = ctx.clone();
            init_ctx.expected_type = java_type.clone();
            init_ctx.last_type = Some(declared_type.clone());
            lower_expr(value, source, &init_ctx)
        });

        match initializer {
            // An unsupported initializer falls back to a bare declaration
            Some(value) if !value.is_bad() => {
                stmts.push(Stmt::Define {
                    lhs: vec![Expr::ident(name.clone())],
                    rhs: vec![value],
                });
            }
            _ => {
                stmts.push(Stmt::Var(VarDecl {
                    specs: vec![ValueSpec {
                        doc: Vec::new(),
                        names: vec![name.clone()],
                        ty: Some(declared_type),
                        values: Vec::new(),
                    }],
                }));
            }
        }

        ctx.add_local(name, java_type);
    }
    stmts
}

fn lower_for(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Vec<Stmt> {
    let mut loop_ctx = ctx.clone();

    let mut cursor = node.walk();
    let init_nodes: Vec<Node<'_>> = node.children_by_field_name("init", &mut cursor).collect();
    let mut init_stmts = Vec::new();
    for init in init_nodes {
        if init.kind() == "local_variable_declaration" {
            init_stmts.extend(lower_local_variable(init, source, &mut loop_ctx));
        } else {
            init_stmts.push(lower_expression_statement(init, source, &mut loop_ctx));
        }
    }

    let cond = field(node, "condition").map(|c| lower_condition(c, source, &loop_ctx));

    let mut cursor = node.walk();
    let update_nodes: Vec<Node<'_>> = node.children_by_field_name("update", &mut cursor).collect();
    let mut update_stmts: Vec<Stmt> = update_nodes
        .into_iter()
        .map(|u| lower_expression_statement(u, source, &mut loop_ctx))
        .collect();

    let mut body = field(node, "body")
        .map(|n| lower_body(n, source, &loop_ctx))
        .unwrap_or_default();

    // A single init and update fit the for header; anything more hoists
    // before the loop or trails the body
    let header_init = if init_stmts.len() == 1 { Some(Box::new(init_stmts.remove(0))) } else { None };
    let header_post = if update_stmts.len() == 1 {
        Some(Box::new(update_stmts.remove(0)))
    } else {
        body.stmts.append(&mut update_stmts);
        None
    };

    let for_stmt = Stmt::For(ForStmt { init: header_init, cond, post: header_post, body });
    if init_stmts.is_empty() {
        vec![for_stmt]
    } else {
        init_stmts.push(for_stmt);
        vec![Stmt::Block(Block::new(init_stmts))]
    }
}

fn lower_switch(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Vec<Stmt> {
    let Some(condition) = field(node, "condition") else { return vec![Stmt::Bad] };
    let tag = lower_condition(condition, source, ctx);
    let Some(body) = field(node, "body") else { return vec![Stmt::Bad] };

    let groups: Vec<Node<'_>> = named_children(body)
        .into_iter()
        .filter(|n| n.kind() == "switch_block_statement_group" || n.kind() == "switch_rule")
        .collect();
    let group_count = groups.len();

    let mut cases = Vec::new();
    for (group_index, group) in groups.into_iter().enumerate() {
        let is_arrow_rule = group.kind() == "switch_rule";
        let mut exprs = Vec::new();
        let mut body_stmts = Vec::new();
        let mut group_ctx = ctx.clone();

        for child in named_children(group) {
            if child.kind() == "switch_label" {
                // `default` labels carry no expression children
                for label_expr in named_children(child) {
                    exprs.push(lower_expr(label_expr, source, &group_ctx));
                }
            } else {
                body_stmts.extend(lower_stmt(child, source, &mut group_ctx));
            }
        }

        if is_arrow_rule {
            // Arrow cases (`case X -> ...`) never fall through; a block body
            // flattens into the case
            if let [Stmt::Block(_)] = body_stmts.as_slice() {
                if let Some(Stmt::Block(block)) = body_stmts.pop() {
                    body_stmts = block.stmts;
                }
            }
        } else {
            // A trailing break ends a colon case; its absence preserves
            // Java's fall-through with an explicit `fallthrough`
            let ended_with_break = matches!(body_stmts.last(), Some(Stmt::Break(None)));
            if ended_with_break {
                body_stmts.pop();
            } else if group_index + 1 < group_count && !case_terminates(&body_stmts) {
                body_stmts.push(Stmt::Fallthrough);
            }
        }

        cases.push(CaseClause { exprs, body: body_stmts });
    }

    vec![Stmt::Switch(SwitchStmt { tag: Some(tag), cases })]
}

/// Whether a case body already transfers control, making `fallthrough`
/// unreachable
fn case_terminates(stmts: &[Stmt]) -> bool {
    match stmts.last() {
        Some(Stmt::Return(_)) | Some(Stmt::Break(_)) | Some(Stmt::Continue(_)) => true,
        Some(Stmt::Expr(Expr::Call { fun, .. })) => {
            matches!(fun.as_ref(), Expr::Ident(name) if name == "panic")
        }
        _ => false,
    }
}

/// try/catch/finally degrades: the try body is inlined, catch bodies are
/// discarded with a warning, and the finally body runs after
fn lower_try(node: Node<'_>, source: &[u8], ctx: &mut Ctx<'_>) -> Vec<Stmt> {
    let mut stmts = Vec::new();

    if let Some(resources) = field(node, "resources") {
        for resource in named_children(resources) {
            if resource.kind() != "resource" {
                continue;
            }
            let (Some(name), Some(value)) = (field(resource, "name"), field(resource, "value"))
            else {
                continue;
            };
            let name_text = text(name, source).to_string();
            stmts.push(Stmt::Define {
                lhs: vec![Expr::ident(name_text.clone())],
                rhs: vec![lower_expr(value, source, ctx)],
            });
            if let Some(ty) = field(resource, "type") {
                ctx.add_local(name_text, text(ty, source));
            }
        }
    }

    if let Some(body) = field(node, "body") {
        for child in named_children(body) {
            stmts.extend(lower_stmt(child, source, ctx));
        }
    }

    for child in named_children(node) {
        match child.kind() {
            "catch_clause" => {
                log::warn!("catch clause discarded: exceptions are not modeled");
            }
            "finally_clause" => {
                if let Some(block) = named_children(child).into_iter().find(|n| n.kind() == "block")
                {
                    for stmt in named_children(block) {
                        stmts.extend(lower_stmt(stmt, source, ctx));
                    }
                }
            }
            _ => {}
        }
    }

    stmts
}

/// `super(args)` wires up the embedded superclass field; `this(args)`
/// delegates by rebinding the receiver
fn lower_explicit_constructor(node: Node<'_>, source: &[u8], ctx: &Ctx<'_>) -> Vec<Stmt> {
    let args = field(node, "arguments")
        .map(|a| lower_arguments(a, source, ctx))
        .unwrap_or_default();
    let is_super = named_children(node).iter().any(|c| c.kind() == "super")
        || text(node, source).trim_start().starts_with("super");

    if is_super {
        let Some(embed_name) = superclass_embed_name(ctx, ctx.current_class) else {
            log::warn!("super() call without a resolvable superclass in {}", ctx.class_name);
            return vec![Stmt::Bad];
        };
        let constructor_name = superclass_scope(ctx, ctx.current_class)
            .and_then(|scope| {
                scope
                    .methods_by(|m| m.is_constructor && m.parameters.len() == args.len())
                    .first()
                    .map(|def| def.name.clone())
            })
            .unwrap_or_else(|| format!("New{}", embed_name));
        return vec![Stmt::Assign {
            lhs: vec![Expr::selector(Expr::ident(ctx.recv_name()), embed_name)],
            op: "=".to_string(),
            rhs: vec![Expr::call_named(constructor_name, args)],
        }];
    }

    // this(args): replace the receiver with the delegated construction
    let constructor_name = ctx
        .current_class
        .methods_by(|m| m.is_constructor && m.parameters.len() == args.len())
        .first()
        .map(|def| def.name.clone())
        .unwrap_or_else(|| format!("New{}", ctx.class_name));
    vec![Stmt::Assign {
        lhs: vec![Expr::ident(ctx.recv_name())],
        op: "=".to_string(),
        rhs: vec![Expr::call_named(constructor_name, args)],
    }]
}
