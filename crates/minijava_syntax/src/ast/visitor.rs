use super::*;

// 泛型 R: 返回值
// 只读遍历，由实现者决定如何下降到子节点 (例如打印器)
pub trait Visitor<R> {
    // 访问程序
    fn visit_program(&mut self, program: &Program) -> R;

    // 访问主类
    fn visit_main_class(&mut self, main: &MainClass) -> R;

    // 访问类声明
    fn visit_class(&mut self, class: &ClassDecl) -> R;

    // 访问方法
    fn visit_method(&mut self, method: &MethodDecl) -> R;

    // 访问语句
    fn visit_stmt(&mut self, stmt: &Stmt) -> R;

    // 访问表达式
    fn visit_expr(&mut self, expr: &Expr) -> R;
}

/// 可变遍历
///
/// 每个方法默认调用对应的 `walk_*` 完整下降，实现者只需覆盖关心的节点。
pub trait VisitorMut {
    fn visit_program_mut(&mut self, program: &mut Program) {
        walk_program_mut(self, program);
    }

    fn visit_class_mut(&mut self, class: &mut ClassDecl) {
        walk_class_mut(self, class);
    }

    fn visit_method_mut(&mut self, method: &mut MethodDecl) {
        walk_method_mut(self, method);
    }

    fn visit_var_decl_mut(&mut self, _decl: &mut VarDecl) {}

    fn visit_param_mut(&mut self, _param: &mut Param) {}

    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) {
        walk_stmt_mut(self, stmt);
    }

    fn visit_recur_mut(&mut self, recur: &mut Recur) {
        walk_recur_mut(self, recur);
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        walk_expr_mut(self, expr);
    }
}

pub fn walk_program_mut<V: VisitorMut + ?Sized>(v: &mut V, program: &mut Program) {
    v.visit_stmt_mut(&mut program.main.body);
    for class in &mut program.classes {
        v.visit_class_mut(class);
    }
}

pub fn walk_class_mut<V: VisitorMut + ?Sized>(v: &mut V, class: &mut ClassDecl) {
    for field in &mut class.fields {
        v.visit_var_decl_mut(field);
    }
    for method in &mut class.methods {
        v.visit_method_mut(method);
    }
}

pub fn walk_method_mut<V: VisitorMut + ?Sized>(v: &mut V, method: &mut MethodDecl) {
    for param in &mut method.params {
        v.visit_param_mut(param);
    }
    for local in &mut method.locals {
        v.visit_var_decl_mut(local);
    }
    for stmt in &mut method.body {
        v.visit_stmt_mut(stmt);
    }
    match &mut method.result {
        MethodResult::Return { value, .. } => v.visit_expr_mut(value),
        MethodResult::Recur(recur) => v.visit_recur_mut(recur),
    }
}

pub fn walk_stmt_mut<V: VisitorMut + ?Sized>(v: &mut V, stmt: &mut Stmt) {
    match stmt {
        Stmt::Block { statements, .. } => {
            for s in statements {
                v.visit_stmt_mut(s);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            v.visit_expr_mut(condition);
            v.visit_stmt_mut(then_branch);
            v.visit_stmt_mut(else_branch);
        }
        Stmt::While {
            condition, body, ..
        } => {
            v.visit_expr_mut(condition);
            v.visit_stmt_mut(body);
        }
        Stmt::Print { value, .. } | Stmt::Assign { value, .. } => v.visit_expr_mut(value),
        Stmt::ArrayAssign { index, value, .. } => {
            v.visit_expr_mut(index);
            v.visit_expr_mut(value);
        }
        Stmt::Recur(recur) => v.visit_recur_mut(recur),
        Stmt::Error { .. } => {}
    }
}

pub fn walk_recur_mut<V: VisitorMut + ?Sized>(v: &mut V, recur: &mut Recur) {
    v.visit_expr_mut(&mut recur.condition);
    for arg in &mut recur.args {
        v.visit_expr_mut(arg);
    }
    v.visit_expr_mut(&mut recur.fallback);
}

pub fn walk_expr_mut<V: VisitorMut + ?Sized>(v: &mut V, expr: &mut Expr) {
    match &mut expr.kind {
        ExprKind::IntLiteral(_)
        | ExprKind::BoolLiteral(_)
        | ExprKind::Identifier(_)
        | ExprKind::This
        | ExprKind::NewObject(_)
        | ExprKind::Error => {}
        ExprKind::NewArray(inner)
        | ExprKind::ArrayLength(inner)
        | ExprKind::Not(inner)
        | ExprKind::Paren(inner) => v.visit_expr_mut(inner),
        ExprKind::ArrayIndex { array, index } => {
            v.visit_expr_mut(array);
            v.visit_expr_mut(index);
        }
        ExprKind::MethodCall { receiver, args, .. } => {
            v.visit_expr_mut(receiver);
            for arg in args {
                v.visit_expr_mut(arg);
            }
        }
        ExprKind::Binary(left, _, right) => {
            v.visit_expr_mut(left);
            v.visit_expr_mut(right);
        }
    }
}
