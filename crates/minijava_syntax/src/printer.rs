//! Pretty Printer
//!
//! 把语法树还原为规范格式的源码：4 空格缩进，每行一个声明或语句。
//! 括号节点原样输出；手工构造的树在重新解析会改变结构的地方才补括号，
//! 因此解析器的输出可以稳定地往返。

use crate::ast::*;
use crate::parser::precedence::{binary_precedence, POSTFIX_PRECEDENCE};

const INDENT: &str = "    ";

/// 打印整个程序
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    printer.visit_program(program);
    printer.finish()
}

/// 打印单个表达式 (不换行)
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::new();
    printer.visit_expr(expr);
    printer.finish()
}

/// 打印单条语句 (顶格缩进)
pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::new();
    printer.visit_stmt(stmt);
    printer.finish()
}

pub struct Printer {
    indent_level: usize,
    output: String,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// 跟在 `if (...)` / `while (...)` / `else` 之后的子语句
    ///
    /// 块语句接在同一行的 `{` 之后，返回 `true` 时由调用方写出 `}`。
    fn open_body(&mut self, body: &Stmt) -> bool {
        match body {
            Stmt::Block { statements, .. } => {
                self.write(" {\n");
                self.indent();
                for stmt in statements {
                    self.visit_stmt(stmt);
                }
                self.dedent();
                true
            }
            other => {
                self.write("\n");
                self.indent();
                self.visit_stmt(other);
                self.dedent();
                false
            }
        }
    }

    /// 必要时给子表达式加括号
    fn operand(&mut self, expr: &Expr, parenthesize: bool) {
        if parenthesize {
            self.write("(");
            self.visit_expr(expr);
            self.write(")");
        } else {
            self.visit_expr(expr);
        }
    }

    fn expr_list(&mut self, items: &[Expr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.visit_expr(item);
        }
    }

    fn typed_name(&mut self, ty: &Type, name: &str) {
        self.write(&format!("{} {}", ty, name));
    }

    fn recur(&mut self, recur: &Recur) {
        self.write_indent();
        self.write("recur (");
        self.visit_expr(&recur.condition);
        self.write(") ? (");
        self.expr_list(&recur.args);
        self.write(") : ");
        self.visit_expr(&recur.fallback);
        self.write(";\n");
    }
}

/// 表达式的结合力；primary、`!` 与括号视为最紧
fn precedence_of(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Binary(_, op, _) => binary_precedence(*op),
        ExprKind::ArrayIndex { .. } | ExprKind::ArrayLength(_) | ExprKind::MethodCall { .. } => {
            POSTFIX_PRECEDENCE
        }
        _ => u8::MAX,
    }
}

impl Visitor<()> for Printer {
    fn visit_program(&mut self, program: &Program) {
        self.visit_main_class(&program.main);
        for class in &program.classes {
            self.write("\n");
            self.visit_class(class);
        }
    }

    fn visit_main_class(&mut self, main: &MainClass) {
        self.writeln(&format!("class {} {{", main.name));
        self.indent();
        self.writeln(&format!(
            "public static void main(String[] {}) {{",
            main.args_name
        ));
        self.indent();
        self.visit_stmt(&main.body);
        self.dedent();
        self.writeln("}");
        self.dedent();
        self.writeln("}");
    }

    fn visit_class(&mut self, class: &ClassDecl) {
        match &class.superclass {
            Some(parent) => self.writeln(&format!("class {} extends {} {{", class.name, parent)),
            None => self.writeln(&format!("class {} {{", class.name)),
        }
        self.indent();
        for field in &class.fields {
            self.writeln(&format!("{} {};", field.ty, field.name));
        }
        for (i, method) in class.methods.iter().enumerate() {
            if i > 0 || !class.fields.is_empty() {
                self.write("\n");
            }
            self.visit_method(method);
        }
        self.dedent();
        self.writeln("}");
    }

    fn visit_method(&mut self, method: &MethodDecl) {
        self.write_indent();
        self.write("public ");
        self.typed_name(&method.return_type, &method.name);
        self.write("(");
        for (i, param) in method.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.typed_name(&param.ty, &param.name);
        }
        self.write(") {\n");

        self.indent();
        for local in &method.locals {
            self.writeln(&format!("{} {};", local.ty, local.name));
        }
        for stmt in &method.body {
            self.visit_stmt(stmt);
        }
        match &method.result {
            MethodResult::Return { value, .. } => {
                self.write_indent();
                self.write("return ");
                self.visit_expr(value);
                self.write(";\n");
            }
            MethodResult::Recur(recur) => self.recur(recur),
        }
        self.dedent();
        self.writeln("}");
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block { statements, .. } => {
                self.writeln("{");
                self.indent();
                for s in statements {
                    self.visit_stmt(s);
                }
                self.dedent();
                self.writeln("}");
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.write_indent();
                self.write("if (");
                self.visit_expr(condition);
                self.write(")");
                let braced = self.open_body(then_branch);
                self.write_indent();
                self.write(if braced { "} else" } else { "else" });
                if self.open_body(else_branch) {
                    self.writeln("}");
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.write_indent();
                self.write("while (");
                self.visit_expr(condition);
                self.write(")");
                if self.open_body(body) {
                    self.writeln("}");
                }
            }
            Stmt::Print { value, .. } => {
                self.write_indent();
                self.write("System.out.println(");
                self.visit_expr(value);
                self.write(");\n");
            }
            Stmt::Assign { name, value, .. } => {
                self.write_indent();
                self.write(&format!("{} = ", name));
                self.visit_expr(value);
                self.write(";\n");
            }
            Stmt::ArrayAssign {
                name, index, value, ..
            } => {
                self.write_indent();
                self.write(&format!("{}[", name));
                self.visit_expr(index);
                self.write("] = ");
                self.visit_expr(value);
                self.write(";\n");
            }
            Stmt::Recur(recur) => self.recur(recur),
            Stmt::Error { .. } => self.writeln("/* error */"),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntLiteral(value) => self.write(&value.to_string()),
            ExprKind::BoolLiteral(value) => self.write(if *value { "true" } else { "false" }),
            ExprKind::Identifier(name) => self.write(name),
            ExprKind::This => self.write("this"),
            ExprKind::NewArray(size) => {
                self.write("new int[");
                self.visit_expr(size);
                self.write("]");
            }
            ExprKind::NewObject(name) => self.write(&format!("new {}()", name)),
            ExprKind::ArrayIndex { array, index } => {
                self.operand(array, precedence_of(array) < POSTFIX_PRECEDENCE);
                self.write("[");
                self.visit_expr(index);
                self.write("]");
            }
            ExprKind::ArrayLength(array) => {
                self.operand(array, precedence_of(array) < POSTFIX_PRECEDENCE);
                self.write(".length");
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                self.operand(receiver, precedence_of(receiver) < POSTFIX_PRECEDENCE);
                self.write(&format!(".{}(", method));
                self.expr_list(args);
                self.write(")");
            }
            // `!` 只吃一个 primary，其余形式都需要括号
            ExprKind::Not(inner) => {
                self.write("!");
                self.operand(inner, precedence_of(inner) < u8::MAX);
            }
            ExprKind::Binary(left, op, right) => {
                let level = binary_precedence(*op);
                self.operand(left, precedence_of(left) < level);
                self.write(&format!(" {} ", op.symbol()));
                // 左结合：同级的右操作数需要括号
                self.operand(right, precedence_of(right) <= level);
            }
            ExprKind::Paren(inner) => {
                self.write("(");
                self.visit_expr(inner);
                self.write(")");
            }
            ExprKind::Error => self.write("/* error */"),
        }
    }
}
