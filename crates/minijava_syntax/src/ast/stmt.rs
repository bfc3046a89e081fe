use crate::ast::expr::{Expr, Span};
use crate::ast::types::Type;

// 主类: class Main { public static void main(String[] args) { ... } }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainClass {
    pub span: Span,
    pub name: String,
    pub args_name: String,
    pub body: Stmt, // 恰好一条语句
}

// 普通类: class B extends A { ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub span: Span,
    pub name: String,
    pub superclass: Option<String>, // 只保留名字，继承关系由语义分析解析
    pub fields: Vec<VarDecl>,
    pub methods: Vec<MethodDecl>,
}

// 方法: public int f(int n) { locals; stmts; return e; }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub span: Span,
    pub name: String,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub result: MethodResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub span: Span,
    pub name: String,
    pub ty: Type,
}

// 字段与局部变量: int x;
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub span: Span,
    pub name: String,
    pub ty: Type,
}

// 方法末尾的结果：return 或 recur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodResult {
    Return { span: Span, value: Expr },
    Recur(Recur),
}

impl MethodResult {
    pub fn span(&self) -> &Span {
        match self {
            Self::Return { span, .. } => span,
            Self::Recur(recur) => &recur.span,
        }
    }
}

// 尾递归语法糖: recur (cond) ? (a, b) : fallback;
// 条件为真时以 args 重新绑定参数并从头执行方法体，否则 fallback 即结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recur {
    pub span: Span,
    pub condition: Expr,
    pub args: Vec<Expr>,
    pub fallback: Expr,
}

// 语句：出现在方法体内部
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    // 块: { ... }
    Block { span: Span, statements: Vec<Stmt> },

    // 控制流: if (expr) stmt else stmt，两个分支都必须存在
    If {
        span: Span,
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },

    // 循环: while (expr) stmt
    While {
        span: Span,
        condition: Expr,
        body: Box<Stmt>,
    },

    // 打印: System.out.println(expr);
    Print { span: Span, value: Expr },

    // 赋值: x = expr;
    Assign {
        span: Span,
        name: String,
        value: Expr,
    },

    // 数组元素赋值: a[i] = expr;
    ArrayAssign {
        span: Span,
        name: String,
        index: Expr,
        value: Expr,
    },

    // 尾递归 (只应出现在方法结果的位置)
    Recur(Recur),

    // 错误占位符 (被跳过的 token 区间)
    Error { span: Span },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Self::Block { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::Print { span, .. }
            | Self::Assign { span, .. }
            | Self::ArrayAssign { span, .. }
            | Self::Error { span } => span,
            Self::Recur(recur) => &recur.span,
        }
    }
}
