//! Diagnostic - 诊断信息
//!
//! 表示一个前端诊断（词法错误或语法错误）

use crate::kind::DiagnosticKind;
use crate::span::{Position, Span};
use std::fmt;

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断种类
    pub kind: DiagnosticKind,
    /// 主要消息
    pub message: String,
    /// 源码字节区间
    pub span: Span,
    /// 起始位置的行列坐标
    pub position: Position,
    /// 该处可以接受的 token
    pub expected: Vec<String>,
    /// 实际遇到的 token
    pub found: Option<String>,
    /// 补充注释
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// 创建新的诊断
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: 0..0,
            position: Position::default(),
            expected: Vec::new(),
            found: None,
            notes: Vec::new(),
        }
    }

    /// 创建词法错误诊断
    pub fn lexical(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Lexical, message)
    }

    /// 创建语法错误诊断
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Syntax, message)
    }

    /// 设置位置信息
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// 设置行列坐标
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// 设置期望的 token 集合
    pub fn expected<I, S>(mut self, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected = expected.into_iter().map(Into::into).collect();
        self
    }

    /// 设置实际遇到的 token
    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// 添加注释
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// "expected X, Y or Z" 形式的描述，没有期望集合时返回 None
    pub fn expected_summary(&self) -> Option<String> {
        match self.expected.as_slice() {
            [] => None,
            [only] => Some(format!("expected {}", only)),
            [init @ .., last] => Some(format!("expected one of {} or {}", init.join(", "), last)),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} error: {}", self.position, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::syntax("unexpected token")
            .span(0..10)
            .at(Position::new(1, 1, 0))
            .expected(["`;`"])
            .found("`}`")
            .with_note("test note");

        assert_eq!(diag.kind, DiagnosticKind::Syntax);
        assert_eq!(diag.message, "unexpected token");
        assert_eq!(diag.span, 0..10);
        assert_eq!(diag.expected, vec!["`;`".to_string()]);
        assert_eq!(diag.found.as_deref(), Some("`}`"));
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn test_different_kinds() {
        assert_eq!(Diagnostic::lexical("x").kind, DiagnosticKind::Lexical);
        assert_eq!(Diagnostic::syntax("x").kind, DiagnosticKind::Syntax);
    }

    #[test]
    fn test_expected_summary() {
        let none = Diagnostic::syntax("x");
        assert_eq!(none.expected_summary(), None);

        let one = Diagnostic::syntax("x").expected(["`;`"]);
        assert_eq!(one.expected_summary().as_deref(), Some("expected `;`"));

        let many = Diagnostic::syntax("x").expected(["`{`", "`if`", "identifier"]);
        assert_eq!(
            many.expected_summary().as_deref(),
            Some("expected one of `{`, `if` or identifier")
        );
    }

    #[test]
    fn test_display_includes_position() {
        let diag = Diagnostic::lexical("unrecognized character `#`").at(Position::new(3, 7, 40));
        assert_eq!(
            diag.to_string(),
            "3:7: lexical error: unrecognized character `#`"
        );
    }
}
