//! DiagnosticKind - 诊断种类
//!
//! 前端只产生两类错误：词法错误与语法错误。没有警告级别。

use colored::*;
use std::fmt;

/// 诊断种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// 词法错误 - 无法识别的字符等
    Lexical,
    /// 语法错误 - 意外的 token
    Syntax,
}

impl DiagnosticKind {
    /// 获取种类名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
        }
    }

    /// 获取带颜色的标题，例如 `error[syntax]`
    pub fn colored_header(&self) -> ColoredString {
        format!("error[{}]", self.name()).red().bold()
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_name() {
        assert_eq!(DiagnosticKind::Lexical.name(), "lexical");
        assert_eq!(DiagnosticKind::Syntax.name(), "syntax");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", DiagnosticKind::Syntax), "syntax");
    }

    #[test]
    fn test_colored_header_text() {
        colored::control::set_override(false);
        assert_eq!(
            DiagnosticKind::Lexical.colored_header().to_string(),
            "error[lexical]"
        );
    }
}
