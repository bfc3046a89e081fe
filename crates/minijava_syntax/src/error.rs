//! Frontend Error Types
//!
//! 词法错误与语法错误。两者都可恢复：解析器记录诊断后继续，
//! 最终统一转换为 [`Diagnostic`] 交给调用方。

use crate::lexer::Token;
use minijava_diagnostics::{Diagnostic, Position, Span};
use thiserror::Error;

/// 词法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    /// 无法识别的字符 (跳过后继续)
    #[error("unrecognized character `{ch}`")]
    UnrecognizedCharacter {
        ch: char,
        span: Span,
        position: Position,
    },

    /// 超出 32 位范围的整数字面量 (替换为 0 后继续)
    #[error("integer literal `{literal}` does not fit in 32 bits")]
    IntegerOutOfRange {
        literal: String,
        span: Span,
        position: Position,
    },

    /// 未闭合的块注释 (吞掉剩余输入)
    #[error("unterminated block comment")]
    UnterminatedComment { span: Span, position: Position },
}

impl LexicalError {
    /// 获取错误发生的位置
    pub fn span(&self) -> &Span {
        match self {
            Self::UnrecognizedCharacter { span, .. }
            | Self::IntegerOutOfRange { span, .. }
            | Self::UnterminatedComment { span, .. } => span,
        }
    }

    /// 获取行列坐标
    pub fn position(&self) -> Position {
        match self {
            Self::UnrecognizedCharacter { position, .. }
            | Self::IntegerOutOfRange { position, .. }
            | Self::UnterminatedComment { position, .. } => *position,
        }
    }

    /// 转换为诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::lexical(self.to_string())
            .span(self.span().clone())
            .at(self.position());

        match self {
            Self::UnrecognizedCharacter { .. } => {
                diagnostic.with_note("the character was skipped")
            }
            Self::IntegerOutOfRange { .. } => {
                diagnostic.with_note("integer literals range from 0 to 2147483647")
            }
            Self::UnterminatedComment { .. } => {
                diagnostic.with_note("block comments are closed with `*/`")
            }
        }
    }
}

/// 语法错误
///
/// `expected` 为空表示无法用一组 token 描述期望 (例如声明顺序错误)。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    /// 实际遇到的 token 描述
    pub found: String,
    /// 该处可以接受的 token 描述
    pub expected: Vec<String>,
    pub span: Span,
    pub position: Position,
    pub note: Option<String>,
}

impl SyntaxError {
    /// 在 `at` 处遇到意外 token
    pub fn unexpected(at: &Token, expected: &[&str]) -> Self {
        Self {
            message: format!("unexpected {}", at.describe()),
            found: at.describe(),
            expected: expected.iter().map(|e| e.to_string()).collect(),
            span: at.span.clone(),
            position: at.position,
            note: None,
        }
    }

    /// 自定义消息的语法错误
    pub fn custom(message: impl Into<String>, at: &Token) -> Self {
        Self {
            message: message.into(),
            found: at.describe(),
            expected: Vec::new(),
            span: at.span.clone(),
            position: at.position,
            note: None,
        }
    }

    /// 针对整段语法结构 (而非单个 token) 的错误
    pub fn spanning(message: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            message: message.into(),
            found: String::new(),
            expected: Vec::new(),
            span,
            position,
            note: None,
        }
    }

    /// 覆盖位置 (用于报告一个比当前 token 更大的结构)
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// 转换为诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::syntax(self.message.clone())
            .span(self.span.clone())
            .at(self.position)
            .expected(self.expected.iter().cloned());
        if !self.found.is_empty() {
            diagnostic = diagnostic.found(self.found.clone());
        }
        if let Some(note) = &self.note {
            diagnostic = diagnostic.with_note(note.clone());
        }
        diagnostic
    }
}

/// 解析结果类型
pub type ParseResult<T> = Result<T, SyntaxError>;
