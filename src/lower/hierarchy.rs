//! Static hierarchy resolution
//!
//! Java inheritance is modeled structurally: superclasses embed as fields
//! and inherited members resolve at translation time by walking superclass
//! names through the package registry. Resolution is single-level static
//! dispatch; virtual dispatch is deliberately not modeled.

use crate::symbol::{ClassScope, Definition};

use super::ctx::Ctx;
use super::types::{simple_name, split_type_string};

/// A method resolved somewhere in a class hierarchy
pub struct ResolvedMethod<'a> {
    pub def: &'a Definition,
    /// The class that declares the method
    pub owner: &'a ClassScope,
    /// 0 for the starting class, 1 for its superclass, and so on
    pub depth: usize,
}

/// A field resolved somewhere in a class hierarchy
pub struct ResolvedField<'a> {
    pub def: &'a Definition,
    pub owner: &'a ClassScope,
    pub depth: usize,
}

/// Resolve a class scope by simple or qualified name: the current file
/// first, then the imported package, then the file's own package. Failure
/// is an intentional degradation, reported by the caller.
pub fn resolve_class_scope<'a>(ctx: &Ctx<'a>, name: &str) -> Option<&'a ClassScope> {
    let simple = simple_name(name);
    if let Some(scope) = ctx.current_file.find_class_scope(simple) {
        return Some(scope);
    }

    let package = ctx.current_file.package_of(simple);
    if let Some(scope) = ctx.workspace.lookup(package, simple) {
        return Some(scope);
    }
    ctx.workspace.lookup(&ctx.current_file.package, simple)
}

/// The superclass scope of `scope`, when its name resolves
pub fn superclass_scope<'a>(ctx: &Ctx<'a>, scope: &ClassScope) -> Option<&'a ClassScope> {
    if scope.superclass.is_empty() {
        return None;
    }
    let (base, _) = split_type_string(&scope.superclass);
    resolve_class_scope(ctx, &base)
}

/// The exported embed name of a class's superclass: the resolved class's
/// display name, or the raw simple name when the superclass is external
pub fn superclass_embed_name(ctx: &Ctx<'_>, scope: &ClassScope) -> Option<String> {
    if scope.superclass.is_empty() {
        return None;
    }
    let (base, _) = split_type_string(&scope.superclass);
    match resolve_class_scope(ctx, &base) {
        Some(resolved) => Some(resolved.class.name.clone()),
        None => Some(simple_name(&base).to_string()),
    }
}

/// Walk `start` and its superclass chain for an instance method matching
/// the original name and the inferred argument types
pub fn find_instance_method_in_hierarchy<'a>(
    ctx: &Ctx<'a>,
    start: &'a ClassScope,
    name: &str,
    arg_types: &[String],
) -> Option<ResolvedMethod<'a>> {
    find_method_in_hierarchy(ctx, start, name, arg_types, false)
}

/// Walk `start` and its superclass chain for a static method matching the
/// original name and the inferred argument types
pub fn find_static_method_in_hierarchy<'a>(
    ctx: &Ctx<'a>,
    start: &'a ClassScope,
    name: &str,
    arg_types: &[String],
) -> Option<ResolvedMethod<'a>> {
    find_method_in_hierarchy(ctx, start, name, arg_types, true)
}

fn find_method_in_hierarchy<'a>(
    ctx: &Ctx<'a>,
    start: &'a ClassScope,
    name: &str,
    arg_types: &[String],
    want_static: bool,
) -> Option<ResolvedMethod<'a>> {
    let mut current = Some(start);
    let mut depth = 0;
    // Bounded walk: a malformed cycle of `extends` must not hang resolution
    while let Some(scope) = current {
        if depth > 32 {
            log::warn!("superclass chain of `{}` too deep, giving up", start.class.original_name);
            return None;
        }
        if let Some(def) = scope.find_callable(name, arg_types, want_static) {
            return Some(ResolvedMethod { def, owner: scope, depth });
        }
        current = superclass_scope(ctx, scope);
        depth += 1;
    }
    None
}

/// Walk `start` and its superclass chain for a field by original name
pub fn find_field_in_hierarchy<'a>(
    ctx: &Ctx<'a>,
    start: &'a ClassScope,
    name: &str,
) -> Option<ResolvedField<'a>> {
    let mut current = Some(start);
    let mut depth = 0;
    while let Some(scope) = current {
        if depth > 32 {
            return None;
        }
        if let Some(def) = scope.find_field_by_original_name(name) {
            return Some(ResolvedField { def, owner: scope, depth });
        }
        current = superclass_scope(ctx, scope);
        depth += 1;
    }
    None
}

/// A helper-required method anywhere in the hierarchy of `start`, by
/// original name; used to rewrite instance generic method invocations
pub fn find_helper_method_in_hierarchy<'a>(
    ctx: &Ctx<'a>,
    start: &'a ClassScope,
    name: &str,
) -> Option<ResolvedMethod<'a>> {
    let mut current = Some(start);
    let mut depth = 0;
    while let Some(scope) = current {
        if depth > 32 {
            return None;
        }
        let defs = scope.methods_by(|m| m.original_name == name && m.requires_helper);
        if let Some(def) = defs.into_iter().next() {
            return Some(ResolvedMethod { def, owner: scope, depth });
        }
        current = superclass_scope(ctx, scope);
        depth += 1;
    }
    None
}
