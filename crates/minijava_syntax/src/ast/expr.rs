pub use minijava_diagnostics::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// 解析失败处的占位节点
    pub fn error(span: Span) -> Self {
        Self::new(ExprKind::Error, span)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    // 字面量: 42, true
    IntLiteral(i32),
    BoolLiteral(bool),

    // 变量使用: x, count
    Identifier(String),

    This,

    // 数组构造: new int[n]
    NewArray(Box<Expr>),

    // 对象构造: new Foo()
    NewObject(String),

    // 数组下标: a[i]
    ArrayIndex {
        array: Box<Expr>,
        index: Box<Expr>,
    },

    // 数组长度: a.length
    ArrayLength(Box<Expr>),

    // 方法调用: obj.m(1, 2)
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },

    // 逻辑非: !b
    Not(Box<Expr>),

    // 二元操作: a + b, a < b
    Binary(Box<Expr>, BinaryOp, Box<Expr>),

    // 括号: (a + b)，保留下来以便打印回原样
    Paren(Box<Expr>),

    // 错误占位符
    Error,
}

impl ExprKind {
    /// 附上位置，构成完整节点
    pub fn at(self, span: Span) -> Expr {
        Expr::new(self, span)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,      // &&
    LessThan, // <
    Plus,     // +
    Minus,    // -
    Times,    // *
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::LessThan => "<",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
        }
    }
}
