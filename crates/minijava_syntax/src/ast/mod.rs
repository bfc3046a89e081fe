pub mod expr;
pub mod stmt;
pub mod types;
pub mod visitor;

// 重新导出核心类型，方便外部直接使用 minijava_syntax::ast::Expr 等
pub use expr::{BinaryOp, Expr, ExprKind, Span};
pub use stmt::{ClassDecl, MainClass, MethodDecl, MethodResult, Param, Recur, Stmt, VarDecl};
pub use types::Type;
pub use visitor::{Visitor, VisitorMut};

// 整个编译单元: 一个主类，随后零个或多个普通类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub span: Span,
    pub main: MainClass,
    pub classes: Vec<ClassDecl>,
}

impl Program {
    /// 忽略位置信息比较两棵树
    pub fn structurally_eq(&self, other: &Program) -> bool {
        self.without_spans() == other.without_spans()
    }

    /// 所有 span 清零后的副本
    pub fn without_spans(&self) -> Program {
        let mut program = self.clone();
        SpanEraser.visit_program_mut(&mut program);
        program
    }
}

struct SpanEraser;

impl VisitorMut for SpanEraser {
    fn visit_program_mut(&mut self, program: &mut Program) {
        program.span = 0..0;
        program.main.span = 0..0;
        visitor::walk_program_mut(self, program);
    }

    fn visit_class_mut(&mut self, class: &mut ClassDecl) {
        class.span = 0..0;
        visitor::walk_class_mut(self, class);
    }

    fn visit_method_mut(&mut self, method: &mut MethodDecl) {
        method.span = 0..0;
        if let MethodResult::Return { span, .. } = &mut method.result {
            *span = 0..0;
        }
        visitor::walk_method_mut(self, method);
    }

    fn visit_var_decl_mut(&mut self, decl: &mut VarDecl) {
        decl.span = 0..0;
    }

    fn visit_param_mut(&mut self, param: &mut Param) {
        param.span = 0..0;
    }

    fn visit_stmt_mut(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Block { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Print { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::ArrayAssign { span, .. }
            | Stmt::Error { span } => *span = 0..0,
            // recur 的 span 由 visit_recur_mut 处理
            Stmt::Recur(_) => {}
        }
        visitor::walk_stmt_mut(self, stmt);
    }

    fn visit_recur_mut(&mut self, recur: &mut Recur) {
        recur.span = 0..0;
        visitor::walk_recur_mut(self, recur);
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        expr.span = 0..0;
        visitor::walk_expr_mut(self, expr);
    }
}
