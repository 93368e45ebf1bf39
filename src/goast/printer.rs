use super::nodes::*;

/// Go source printer
///
/// Serializes the emitted AST with gofmt-like spacing: tab indentation, one
/// blank line between top-level declarations, inline composite literals.
/// Output is deterministic for a given AST.
pub struct Printer {
    indent_level: usize,
    output: String,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    /// Print a whole file
    pub fn print(&mut self, file: &GoFile) -> String {
        self.output.clear();
        self.push_line(&format!("package {}", file.package));

        if !file.imports.is_empty() {
            self.output.push('\n');
            if file.imports.len() == 1 {
                self.push_line(&format!("import \"{}\"", file.imports[0]));
            } else {
                self.push_line("import (");
                self.indent();
                for path in &file.imports {
                    self.push_line(&format!("\"{}\"", path));
                }
                self.dedent();
                self.push_line(")");
            }
        }

        for decl in &file.decls {
            if decl.is_bad() {
                continue;
            }
            self.output.push('\n');
            self.print_decl(decl);
        }

        self.output.clone()
    }

    /// Render a single expression, used by `Display` and tests
    pub fn print_expr_to_string(&mut self, expr: &Expr) -> String {
        self.expr(expr)
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push('\t');
        }
    }

    fn push_line(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn push_doc(&mut self, doc: &[String]) {
        for line in doc {
            self.push_line(&format!("//{}", line));
        }
    }

    // Declarations

    fn print_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Func(f) => self.print_func(f),
            Decl::Type(t) => self.print_type_decl(t),
            Decl::Var(v) => self.print_var(v),
            Decl::Const(c) => self.print_const(c),
            Decl::Bad => {}
        }
    }

    fn print_func(&mut self, f: &FuncDecl) {
        self.push_doc(&f.doc);
        self.write_indent();
        self.output.push_str("func ");

        if let Some(recv) = &f.recv {
            let rendered = self.field(recv);
            self.output.push_str(&format!("({}) ", rendered));
        }

        self.output.push_str(&f.name);
        let tp = self.type_param_list(&f.type_params);
        self.output.push_str(&tp);

        let params = self.field_list(&f.params);
        self.output.push_str(&format!("({})", params));

        let results = self.result_list(&f.results);
        self.output.push_str(&results);

        match &f.body {
            Some(body) => {
                self.output.push_str(" {\n");
                self.indent();
                self.print_block_contents(body);
                self.dedent();
                self.push_line("}");
            }
            None => self.output.push('\n'),
        }
    }

    fn print_type_decl(&mut self, t: &TypeDecl) {
        self.push_doc(&t.doc);
        self.write_indent();
        self.output.push_str("type ");
        self.output.push_str(&t.name);
        let tp = self.type_param_list(&t.type_params);
        self.output.push_str(&tp);
        self.output.push(' ');

        match &t.ty {
            Expr::StructType(fields) => {
                self.output.push_str("struct {\n");
                self.indent();
                for field in fields {
                    self.push_doc(&field.doc);
                    let rendered = self.field(field);
                    self.push_line(&rendered);
                }
                self.dedent();
                self.push_line("}");
            }
            Expr::InterfaceType(fields) => {
                self.output.push_str("interface {\n");
                self.indent();
                for field in fields {
                    self.push_doc(&field.doc);
                    let rendered = self.interface_member(field);
                    self.push_line(&rendered);
                }
                self.dedent();
                self.push_line("}");
            }
            other => {
                let rendered = self.expr(other);
                self.output.push_str(&rendered);
                self.output.push('\n');
            }
        }
    }

    fn print_var(&mut self, v: &VarDecl) {
        if v.specs.len() == 1 {
            let spec = self.value_spec(&v.specs[0]);
            self.push_line(&format!("var {}", spec));
            return;
        }
        self.push_line("var (");
        self.indent();
        for spec in &v.specs {
            self.push_doc(&spec.doc);
            let rendered = self.value_spec(spec);
            self.push_line(&rendered);
        }
        self.dedent();
        self.push_line(")");
    }

    fn print_const(&mut self, c: &ConstDecl) {
        if c.specs.len() == 1 {
            let spec = self.value_spec(&c.specs[0]);
            self.push_line(&format!("const {}", spec));
            return;
        }
        self.push_line("const (");
        self.indent();
        for spec in &c.specs {
            let rendered = self.value_spec(spec);
            self.push_line(&rendered);
        }
        self.dedent();
        self.push_line(")");
    }

    fn value_spec(&mut self, spec: &ValueSpec) -> String {
        let mut out = spec.names.join(", ");
        if let Some(ty) = &spec.ty {
            out.push(' ');
            out.push_str(&self.expr(ty));
        }
        if !spec.values.is_empty() {
            let values: Vec<String> = spec.values.iter().map(|v| self.expr(v)).collect();
            out.push_str(" = ");
            out.push_str(&values.join(", "));
        }
        out
    }

    // Fields

    fn field(&mut self, field: &Field) -> String {
        let ty = self.expr(&field.ty);
        if field.names.is_empty() {
            ty
        } else {
            format!("{} {}", field.names.join(", "), ty)
        }
    }

    /// Interface members print methods as `Name(params) results`
    fn interface_member(&mut self, field: &Field) -> String {
        match (&field.ty, field.names.first()) {
            (Expr::FuncType { params, results }, Some(name)) => {
                let params = self.field_list(params);
                let results = self.result_list(results);
                format!("{}({}){}", name, params, results)
            }
            _ => self.field(field),
        }
    }

    fn field_list(&mut self, fields: &[Field]) -> String {
        let rendered: Vec<String> = fields.iter().map(|f| self.field(f)).collect();
        rendered.join(", ")
    }

    fn type_param_list(&mut self, fields: &[Field]) -> String {
        if fields.is_empty() {
            return String::new();
        }
        format!("[{}]", self.field_list(fields))
    }

    fn result_list(&mut self, results: &[Field]) -> String {
        let meaningful: Vec<&Field> = results.iter().filter(|f| !f.ty.is_empty()).collect();
        if meaningful.is_empty() {
            return String::new();
        }
        if meaningful.len() == 1 && meaningful[0].names.is_empty() {
            let ty = self.expr(&meaningful[0].ty);
            return format!(" {}", ty);
        }
        let rendered: Vec<String> = meaningful.iter().map(|f| self.field(f)).collect();
        format!(" ({})", rendered.join(", "))
    }

    // Statements

    fn print_block_contents(&mut self, block: &Block) {
        for stmt in &block.stmts {
            if stmt.is_bad() {
                continue;
            }
            self.print_stmt(stmt);
        }
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(e) => {
                let rendered = self.expr(e);
                self.push_line(&rendered);
            }
            Stmt::Assign { lhs, op, rhs } => {
                let rendered = self.assign(lhs, op, rhs);
                self.push_line(&rendered);
            }
            Stmt::Define { lhs, rhs } => {
                let rendered = self.assign(lhs, ":=", rhs);
                self.push_line(&rendered);
            }
            Stmt::IncDec { target, inc } => {
                let target = self.expr(target);
                self.push_line(&format!("{}{}", target, if *inc { "++" } else { "--" }));
            }
            Stmt::Return(values) => {
                if values.is_empty() {
                    self.push_line("return");
                } else {
                    let rendered: Vec<String> = values.iter().map(|v| self.expr(v)).collect();
                    self.push_line(&format!("return {}", rendered.join(", ")));
                }
            }
            Stmt::If(stmt) => {
                self.write_indent();
                self.print_if(stmt);
            }
            Stmt::For(stmt) => self.print_for(stmt),
            Stmt::Range(stmt) => self.print_range(stmt),
            Stmt::Switch(stmt) => self.print_switch(stmt),
            Stmt::Block(block) => {
                self.push_line("{");
                self.indent();
                self.print_block_contents(block);
                self.dedent();
                self.push_line("}");
            }
            Stmt::Break(label) => match label {
                Some(label) => self.push_line(&format!("break {}", label)),
                None => self.push_line("break"),
            },
            Stmt::Continue(label) => match label {
                Some(label) => self.push_line(&format!("continue {}", label)),
                None => self.push_line("continue"),
            },
            Stmt::Fallthrough => self.push_line("fallthrough"),
            Stmt::Labeled { label, stmt } => {
                // gofmt outdents labels to the enclosing block
                self.output.push_str(&format!("{}:\n", label));
                self.print_stmt(stmt);
            }
            Stmt::Var(decl) => self.print_var(decl),
            Stmt::Empty | Stmt::Bad => {}
        }
    }

    fn assign(&mut self, lhs: &[Expr], op: &str, rhs: &[Expr]) -> String {
        let lhs: Vec<String> = lhs.iter().map(|e| self.expr(e)).collect();
        let rhs: Vec<String> = rhs.iter().map(|e| self.expr(e)).collect();
        format!("{} {} {}", lhs.join(", "), op, rhs.join(", "))
    }

    /// Prints an if statement; the caller has already written the indent so
    /// that else-if chains continue on the same line
    fn print_if(&mut self, stmt: &IfStmt) {
        let cond = self.expr(&stmt.cond);
        self.output.push_str(&format!("if {} {{\n", cond));
        self.indent();
        self.print_block_contents(&stmt.then);
        self.dedent();
        self.write_indent();
        self.output.push('}');

        match stmt.els.as_deref() {
            Some(Stmt::If(chained)) => {
                self.output.push_str(" else ");
                self.print_if(chained);
            }
            Some(Stmt::Block(block)) => {
                self.output.push_str(" else {\n");
                self.indent();
                self.print_block_contents(block);
                self.dedent();
                self.push_line("}");
            }
            Some(other) => {
                self.output.push_str(" else {\n");
                self.indent();
                self.print_stmt(other);
                self.dedent();
                self.push_line("}");
            }
            None => self.output.push('\n'),
        }
    }

    fn print_for(&mut self, stmt: &ForStmt) {
        self.write_indent();
        let header = match (&stmt.init, &stmt.cond, &stmt.post) {
            (None, None, None) => "for".to_string(),
            (None, Some(cond), None) => {
                let cond = self.expr(cond);
                format!("for {}", cond)
            }
            (init, cond, post) => {
                let init = init.as_deref().map(|s| self.inline_stmt(s)).unwrap_or_default();
                let cond = cond.as_ref().map(|c| self.expr(c)).unwrap_or_default();
                let post = post.as_deref().map(|s| self.inline_stmt(s)).unwrap_or_default();
                format!("for {}; {}; {}", init, cond, post)
            }
        };
        self.output.push_str(&header);
        self.output.push_str(" {\n");
        self.indent();
        self.print_block_contents(&stmt.body);
        self.dedent();
        self.push_line("}");
    }

    fn print_range(&mut self, stmt: &RangeStmt) {
        self.write_indent();
        let expr = self.expr(&stmt.expr);
        match (&stmt.key, &stmt.value) {
            (Some(key), Some(value)) => {
                let key = self.expr(key);
                let value = self.expr(value);
                self.output.push_str(&format!("for {}, {} := range {}", key, value, expr));
            }
            (Some(key), None) => {
                let key = self.expr(key);
                self.output.push_str(&format!("for {} := range {}", key, expr));
            }
            _ => self.output.push_str(&format!("for range {}", expr)),
        }
        self.output.push_str(" {\n");
        self.indent();
        self.print_block_contents(&stmt.body);
        self.dedent();
        self.push_line("}");
    }

    fn print_switch(&mut self, stmt: &SwitchStmt) {
        self.write_indent();
        match &stmt.tag {
            Some(tag) => {
                let tag = self.expr(tag);
                self.output.push_str(&format!("switch {} {{\n", tag));
            }
            None => self.output.push_str("switch {\n"),
        }
        for case in &stmt.cases {
            if case.exprs.is_empty() {
                self.push_line("default:");
            } else {
                let exprs: Vec<String> = case.exprs.iter().map(|e| self.expr(e)).collect();
                self.push_line(&format!("case {}:", exprs.join(", ")));
            }
            self.indent();
            for stmt in &case.body {
                if !stmt.is_bad() {
                    self.print_stmt(stmt);
                }
            }
            self.dedent();
        }
        self.push_line("}");
    }

    /// Renders a statement on one line, for `for` headers
    fn inline_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Define { lhs, rhs } => self.assign(lhs, ":=", rhs),
            Stmt::Assign { lhs, op, rhs } => self.assign(lhs, op, rhs),
            Stmt::IncDec { target, inc } => {
                let target = self.expr(target);
                format!("{}{}", target, if *inc { "++" } else { "--" })
            }
            Stmt::Expr(e) => self.expr(e),
            _ => String::new(),
        }
    }

    // Expressions

    fn expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::BasicLit(text) => text.clone(),
            Expr::Selector { x, sel } => format!("{}.{}", self.expr(x), sel),
            Expr::Call { fun, args } => {
                let fun = self.expr(fun);
                let args: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
                format!("{}({})", fun, args.join(", "))
            }
            Expr::Index { x, indices } => {
                let x = self.expr(x);
                let indices: Vec<String> = indices.iter().map(|i| self.expr(i)).collect();
                format!("{}[{}]", x, indices.join(", "))
            }
            Expr::Unary { op, x } => format!("{}{}", op, self.expr(x)),
            Expr::Binary { x, op, y } => {
                format!("{} {} {}", self.expr(x), op, self.expr(y))
            }
            Expr::Paren(x) => format!("({})", self.expr(x)),
            Expr::Composite { ty, elts } => {
                let elts: Vec<String> = elts.iter().map(|e| self.expr(e)).collect();
                match ty {
                    Some(ty) => {
                        let ty = self.expr(ty);
                        format!("{}{{{}}}", ty, elts.join(", "))
                    }
                    None => format!("{{{}}}", elts.join(", ")),
                }
            }
            Expr::KeyValue { key, value } => {
                format!("{}: {}", self.expr(key), self.expr(value))
            }
            Expr::FuncLit { params, results, body } => {
                let params = self.field_list(params);
                let results = self.result_list(results);
                let mut out = format!("func({}){} {{\n", params, results);
                let mut inner = Printer {
                    indent_level: self.indent_level + 1,
                    output: String::new(),
                };
                inner.print_block_contents(body);
                out.push_str(&inner.output);
                for _ in 0..self.indent_level {
                    out.push('\t');
                }
                out.push('}');
                out
            }
            Expr::TypeAssert { x, ty } => {
                format!("{}.({})", self.expr(x), self.expr(ty))
            }
            Expr::Pointer(inner) => format!("*{}", self.expr(inner)),
            Expr::Slice(inner) => format!("[]{}", self.expr(inner)),
            Expr::Ellipsis(inner) => format!("...{}", self.expr(inner)),
            Expr::FuncType { params, results } => {
                let params = self.field_list(params);
                let results = self.result_list(results);
                format!("func({}){}", params, results)
            }
            Expr::InterfaceType(fields) => {
                let members: Vec<String> = fields.iter().map(|f| self.interface_member(f)).collect();
                format!("interface{{ {} }}", members.join("; "))
            }
            Expr::StructType(fields) => {
                let members: Vec<String> = fields.iter().map(|f| self.field(f)).collect();
                format!("struct{{ {} }}", members.join("; "))
            }
            Expr::Empty => String::new(),
            Expr::Bad => "/* unsupported */".to_string(),
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_print_generic_struct() {
        let file = GoFile {
            package: "main".into(),
            imports: vec![],
            decls: vec![Decl::Type(TypeDecl {
                doc: vec![],
                name: "Pair".into(),
                type_params: vec![
                    Field::named("K", Expr::pointer(Expr::ident("Number"))),
                    Field::named("V", Expr::ident("any")),
                ],
                ty: Expr::StructType(vec![
                    Field::named("key", Expr::ident("K")),
                    Field::named("value", Expr::ident("V")),
                ]),
            })],
        };
        let out = Printer::new().print(&file);
        assert!(out.contains("type Pair[K *Number, V any] struct {"));
        assert!(flat(&out).contains("key K value V"));
    }

    #[test]
    fn test_print_method_with_receiver() {
        let func = FuncDecl {
            doc: vec![],
            recv: Some(Field::named(
                "pr",
                Expr::pointer(Expr::index(
                    Expr::ident("Pair"),
                    vec![Expr::ident("K"), Expr::ident("V")],
                )),
            )),
            name: "GetKey".into(),
            type_params: vec![],
            params: vec![],
            results: vec![Field::anonymous(Expr::ident("K"))],
            body: Some(Block::new(vec![Stmt::Return(vec![Expr::selector(
                Expr::ident("pr"),
                "key",
            )])])),
        };
        let file = GoFile {
            package: "main".into(),
            imports: vec![],
            decls: vec![Decl::Func(func)],
        };
        let out = Printer::new().print(&file);
        assert!(out.contains("func (pr *Pair[K, V]) GetKey() K {"));
        assert!(out.contains("return pr.key"));
    }

    #[test]
    fn test_print_iota_const_block() {
        let decl = Decl::Const(ConstDecl {
            specs: vec![
                ValueSpec {
                    doc: vec![],
                    names: vec!["_State_ordinal_ON".into()],
                    ty: None,
                    values: vec![Expr::ident("iota")],
                },
                ValueSpec {
                    doc: vec![],
                    names: vec!["_State_ordinal_OFF".into()],
                    ty: None,
                    values: vec![],
                },
            ],
        });
        let file = GoFile { package: "main".into(), imports: vec![], decls: vec![decl] };
        let out = Printer::new().print(&file);
        assert!(out.contains("_State_ordinal_ON = iota"));
        assert!(out.contains("_State_ordinal_OFF\n"));
    }

    #[test]
    fn test_print_else_if_chain() {
        let stmt = Stmt::If(IfStmt {
            cond: Expr::ident("a"),
            then: Block::default(),
            els: Some(Box::new(Stmt::If(IfStmt {
                cond: Expr::ident("b"),
                then: Block::default(),
                els: Some(Box::new(Stmt::Block(Block::default()))),
            }))),
        });
        let func = FuncDecl {
            doc: vec![],
            recv: None,
            name: "f".into(),
            type_params: vec![],
            params: vec![],
            results: vec![],
            body: Some(Block::new(vec![stmt])),
        };
        let file = GoFile { package: "main".into(), imports: vec![], decls: vec![Decl::Func(func)] };
        let out = Printer::new().print(&file);
        assert!(out.contains("if a {"));
        assert!(out.contains("} else if b {"));
        assert!(out.contains("} else {"));
    }

    #[test]
    fn test_print_interface_with_embeds() {
        let decl = Decl::Type(TypeDecl {
            doc: vec![],
            name: "Pet".into(),
            type_params: vec![],
            ty: Expr::InterfaceType(vec![
                Field::anonymous(Expr::ident("Animal")),
                Field::named("play", Expr::FuncType { params: vec![], results: vec![] }),
            ]),
        });
        let file = GoFile { package: "main".into(), imports: vec![], decls: vec![decl] };
        let out = Printer::new().print(&file);
        assert!(flat(&out).contains("type Pet interface { Animal play() }"));
    }
}
