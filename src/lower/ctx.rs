//! Lowering context
//!
//! [`Ctx`] is threaded through every lowerer and cloned on entry to nested
//! scopes, so mutations made while lowering a subtree never leak back out.
//! It carries shared references into the frozen workspace plus the
//! per-scope state: the class being emitted, the method being lowered, the
//! locals declared so far, and the inference hints (`expected_type` for
//! diamond constructors, `last_type` for array initializers).

use crate::common::Config;
use crate::goast::Expr;
use crate::symbol::{ClassScope, Definition, FileScope, Workspace};

use super::gen::short_name;

/// A local variable declared while lowering the current method body
#[derive(Debug, Clone)]
pub struct LocalVar {
    pub name: String,
    /// Java type as written at the declaration
    pub java_type: String,
}

/// Traversal context for the lowering phase
#[derive(Clone)]
pub struct Ctx<'a> {
    pub workspace: &'a Workspace,
    pub config: &'a Config,
    pub current_file: &'a FileScope,
    pub current_class: &'a ClassScope,
    /// Exported name of the class currently being emitted
    pub class_name: String,
    /// The method or constructor being lowered; `None` in static initializers
    pub local_scope: Option<&'a Definition>,
    /// The most recent Go type seen, used to type array initializer literals
    pub last_type: Option<Expr>,
    /// Java type string of the assignment target, feeding diamond inference
    pub expected_type: String,
    /// Locals declared so far in the enclosing blocks
    pub locals: Vec<LocalVar>,
}

impl<'a> Ctx<'a> {
    pub fn new(
        workspace: &'a Workspace,
        config: &'a Config,
        current_file: &'a FileScope,
        current_class: &'a ClassScope,
    ) -> Self {
        Self {
            workspace,
            config,
            current_file,
            current_class,
            class_name: current_class.class.name.clone(),
            local_scope: None,
            last_type: None,
            expected_type: String::new(),
            locals: Vec::new(),
        }
    }

    /// Enter a different class scope (nested classes, sibling top-levels)
    pub fn with_class(&self, class: &'a ClassScope) -> Self {
        let mut ctx = self.clone();
        ctx.current_class = class;
        ctx.class_name = class.class.name.clone();
        ctx.local_scope = None;
        ctx.locals.clear();
        ctx
    }

    /// The receiver variable name for the class being emitted
    pub fn recv_name(&self) -> String {
        short_name(&self.class_name)
    }

    /// Whether the surrounding method is static; static initializers count
    pub fn in_static_context(&self) -> bool {
        self.local_scope.map(|d| d.is_static).unwrap_or(true)
    }

    /// Record a declared local so later statements of the block resolve it
    pub fn add_local(&mut self, name: impl Into<String>, java_type: impl Into<String>) {
        self.locals.push(LocalVar { name: name.into(), java_type: java_type.into() });
    }

    pub fn find_local(&self, name: &str) -> Option<&LocalVar> {
        self.locals.iter().rev().find(|l| l.name == name)
    }

    /// Type-parameter names visible at this point: the class's effective
    /// list plus the current method's own parameters
    pub fn type_param_names_in_scope(&self) -> Vec<String> {
        let mut names = self.current_class.type_parameter_names();
        if let Some(local) = self.local_scope {
            for tp in &local.type_parameters {
                if !names.contains(&tp.name) {
                    names.push(tp.name.clone());
                }
            }
        }
        names
    }
}
