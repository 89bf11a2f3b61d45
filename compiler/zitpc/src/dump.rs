//! Readable tree dump of a parsed program, for `--dump-ast`.

use zitp_ir::{Block, CallExpr, Expr, ExprKind, Name, Program, Stmt, StmtKind, StringInterner};

/// Spaces per nesting level.
const INDENT: usize = 2;

/// Render `program` as an indented tree with identifiers spelled out.
pub fn dump_program(program: &Program, interner: &StringInterner) -> String {
    let mut printer = AstPrinter {
        program,
        interner,
        output: String::new(),
        indent: 0,
    };
    printer.line("Program");
    printer.block(&program.body);
    printer.output
}

struct AstPrinter<'a> {
    program: &'a Program,
    interner: &'a StringInterner,
    output: String,
    indent: usize,
}

impl AstPrinter<'_> {
    fn line(&mut self, text: &str) {
        self.output.push_str(&" ".repeat(self.indent * INDENT));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn names(&self, names: &[Name]) -> String {
        names
            .iter()
            .map(|&name| self.name(name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    fn block(&mut self, block: &Block) {
        self.nested(|p| {
            for stmt in &block.stmts {
                p.stmt(stmt);
            }
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Declaration(names) => {
                let text = format!("Declaration {}", self.names(names));
                self.line(&text);
            }
            StmtKind::Assign { target, value } => {
                let text = format!("Assign {}", self.name(*target));
                self.line(&text);
                self.nested(|p| p.expr(value));
            }
            StmtKind::Read(target) => {
                let text = format!("Read {}", self.name(*target));
                self.line(&text);
            }
            StmtKind::Print(expr) => {
                self.line("Print");
                self.nested(|p| p.expr(expr));
            }
            StmtKind::Call(call) => self.call("Call", call),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.line("If");
                self.nested(|p| {
                    p.expr(cond);
                    p.line("Then");
                    p.block(then_branch);
                    if !else_branch.stmts.is_empty() {
                        p.line("Else");
                        p.block(else_branch);
                    }
                });
            }
            StmtKind::While { cond, body } => {
                self.line("While");
                self.nested(|p| {
                    p.expr(cond);
                    p.line("Do");
                    p.block(body);
                });
            }
            StmtKind::Return(expr) => {
                self.line("Return");
                self.nested(|p| p.expr(expr));
            }
            StmtKind::Function(id) => {
                let program = self.program;
                let def = program.function(*id);
                let text = format!(
                    "Function {}({})",
                    self.name(def.name),
                    self.names(&def.params)
                );
                self.line(&text);
                self.block(&def.body);
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Number(n) => self.line(&format!("Number {n}")),
            ExprKind::Bool(b) => self.line(&format!("Bool {b}")),
            ExprKind::Var(name) => {
                let text = format!("Var {}", self.name(*name));
                self.line(&text);
            }
            ExprKind::Binary { op, left, right } => {
                self.line(&format!("Binary {op}"));
                self.nested(|p| {
                    p.expr(left);
                    p.expr(right);
                });
            }
            ExprKind::Not(operand) => {
                self.line("Not");
                self.nested(|p| p.expr(operand));
            }
            ExprKind::Apply(call) => self.call("Apply", call),
        }
    }

    fn call(&mut self, label: &str, call: &CallExpr) {
        let text = format!("{label} {}", self.name(call.callee));
        self.line(&text);
        self.nested(|p| {
            for arg in &call.args {
                p.expr(arg);
            }
        });
    }
}

#[cfg(test)]
mod tests;
